use contracts::shared::artifacts::{ArtifactStatus, ArtifactStatusResponse, DatasetName};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;

use crate::shared::table::{CsvError, Table};

/// Why an artifact is absent
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: CsvError,
    },

    #[error("{0} has no header row")]
    NoHeader(String),
}

/// Read and parse one artifact
pub fn load_table(path: &Path) -> Result<Table, LoadError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(LoadError::NotFound(display));
    }

    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;

    let table = Table::from_csv(file).map_err(|source| LoadError::Csv {
        path: display.clone(),
        source,
    })?;

    if table.columns().is_empty() {
        return Err(LoadError::NoHeader(display));
    }

    Ok(table)
}

/// Outcome of loading every known artifact once. Immutable after construction.
#[derive(Debug)]
pub struct Datasets {
    root: PathBuf,
    entries: BTreeMap<DatasetName, Result<Table, LoadError>>,
}

impl Datasets {
    /// Load every artifact under `root`. Never fails: unreadable artifacts are
    /// recorded as absent.
    pub fn load(root: &Path) -> Self {
        let mut entries = BTreeMap::new();

        for dataset in DatasetName::ALL {
            let path = root.join(dataset.relative_path());
            let result = load_table(&path);

            match &result {
                Ok(table) => tracing::info!(
                    "Artifact '{}' loaded: {} rows, {} columns",
                    dataset,
                    table.len(),
                    table.columns().len()
                ),
                Err(e) => tracing::warn!("Artifact '{}' unavailable: {}", dataset, e),
            }

            entries.insert(dataset, result);
        }

        Self {
            root: root.to_path_buf(),
            entries,
        }
    }

    /// In-memory datasets; names not given are absent
    pub fn from_tables(tables: impl IntoIterator<Item = (DatasetName, Table)>) -> Self {
        let mut entries: BTreeMap<DatasetName, Result<Table, LoadError>> = DatasetName::ALL
            .iter()
            .map(|&d| (d, Err(LoadError::NotFound(d.relative_path().to_string()))))
            .collect();

        for (dataset, table) in tables {
            entries.insert(dataset, Ok(table));
        }

        Self {
            root: PathBuf::new(),
            entries,
        }
    }

    /// The table, or `None` when the artifact is absent
    pub fn get(&self, dataset: DatasetName) -> Option<&Table> {
        self.entries.get(&dataset).and_then(|r| r.as_ref().ok())
    }

    pub fn error(&self, dataset: DatasetName) -> Option<&LoadError> {
        self.entries.get(&dataset).and_then(|r| r.as_ref().err())
    }

    pub fn status(&self) -> ArtifactStatusResponse {
        let artifacts = DatasetName::ALL
            .iter()
            .map(|&dataset| {
                let table = self.get(dataset);
                ArtifactStatus {
                    dataset,
                    path: dataset.relative_path().to_string(),
                    available: table.is_some(),
                    rows: table.map(Table::len),
                    columns: table.map(|t| t.columns().len()),
                    reason: self.error(dataset).map(|e| e.to_string()),
                }
            })
            .collect();

        ArtifactStatusResponse {
            root: self.root.display().to_string(),
            artifacts,
        }
    }
}

/// Process-wide memo of the loaded artifacts.
///
/// The first `snapshot()` reads disk; later calls share the same `Arc` until
/// `reload()` replaces it.
#[derive(Debug)]
pub struct ArtifactCache {
    root: PathBuf,
    snapshot: RwLock<Option<Arc<Datasets>>>,
}

impl ArtifactCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            snapshot: RwLock::new(None),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn snapshot(&self) -> Arc<Datasets> {
        {
            let cached = self.snapshot.read().unwrap_or_else(|e| e.into_inner());
            if let Some(datasets) = cached.as_ref() {
                return Arc::clone(datasets);
            }
        }

        let mut slot = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        // Another request may have loaded while we waited for the write lock
        if let Some(datasets) = slot.as_ref() {
            return Arc::clone(datasets);
        }

        tracing::info!("Loading artifacts from {}", self.root.display());
        let datasets = Arc::new(Datasets::load(&self.root));
        *slot = Some(Arc::clone(&datasets));
        datasets
    }

    /// Drop the memo and read every artifact again
    pub fn reload(&self) -> Arc<Datasets> {
        tracing::info!("Reloading artifacts from {}", self.root.display());
        let datasets = Arc::new(Datasets::load(&self.root));
        let mut slot = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Arc::clone(&datasets));
        datasets
    }
}

static ARTIFACTS: OnceCell<ArtifactCache> = OnceCell::new();

/// Install the process-wide cache rooted at `root`
pub fn initialize_artifacts(root: PathBuf) -> anyhow::Result<()> {
    ARTIFACTS
        .set(ArtifactCache::new(root))
        .map_err(|_| anyhow::anyhow!("artifact cache is already initialized"))
}

/// Process-wide cache; rooted at the working directory if never initialized
pub fn get_artifacts() -> &'static ArtifactCache {
    ARTIFACTS.get_or_init(|| ArtifactCache::new("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, dataset: DatasetName, contents: &str) {
        let path = root.join(dataset.relative_path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_every_dataset_absent_in_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        let datasets = Datasets::load(dir.path());

        for dataset in DatasetName::ALL {
            assert!(datasets.get(dataset).is_none());
            assert!(matches!(datasets.error(dataset), Some(LoadError::NotFound(_))));
        }
        assert!(datasets.status().artifacts.iter().all(|a| !a.available));
    }

    #[test]
    fn test_present_and_malformed_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), DatasetName::Baseline, "Description,revenue,avg_price\nX,100,5\n");
        write(dir.path(), DatasetName::Rules, "support,confidence,lift\n");
        write(dir.path(), DatasetName::Promo, "a,b\n1,2\n1,2,3\n");
        write(dir.path(), DatasetName::Audit, "");

        let datasets = Datasets::load(dir.path());

        assert_eq!(datasets.get(DatasetName::Baseline).map(Table::len), Some(1));
        assert_eq!(datasets.get(DatasetName::Rules).map(Table::len), Some(0));
        assert!(matches!(datasets.error(DatasetName::Promo), Some(LoadError::Csv { .. })));
        assert!(matches!(datasets.error(DatasetName::Audit), Some(LoadError::NoHeader(_))));
        assert!(datasets.get(DatasetName::Transactions).is_none());

        let status = datasets.status();
        let rules = status
            .artifacts
            .iter()
            .find(|a| a.dataset == DatasetName::Rules)
            .unwrap();
        assert!(rules.available);
        assert_eq!(rules.rows, Some(0));
        assert_eq!(rules.columns, Some(3));
    }

    #[test]
    fn test_short_row_keeps_artifact_available() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), DatasetName::Baseline, "Description,revenue,avg_price\nX,100,5\nY,50\n");

        let datasets = Datasets::load(dir.path());
        let baseline = datasets.get(DatasetName::Baseline).unwrap();

        assert_eq!(baseline.len(), 2);
        assert_eq!(baseline.rows()[1][2], contracts::shared::table::CellValue::Null);
    }

    #[test]
    fn test_cache_memoizes_until_reload() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ArtifactCache::new(dir.path());

        let first = cache.snapshot();
        assert!(first.get(DatasetName::Baseline).is_none());

        write(dir.path(), DatasetName::Baseline, "Description,revenue\nX,100\n");

        let second = cache.snapshot();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(second.get(DatasetName::Baseline).is_none());

        let reloaded = cache.reload();
        assert!(reloaded.get(DatasetName::Baseline).is_some());
        assert!(Arc::ptr_eq(&reloaded, &cache.snapshot()));
    }

    #[test]
    fn test_from_tables_marks_others_absent() {
        let table = Table::from_csv("x\n1\n".as_bytes()).unwrap();
        let datasets = Datasets::from_tables([(DatasetName::Promo, table)]);

        assert!(datasets.get(DatasetName::Promo).is_some());
        assert!(datasets.get(DatasetName::Rules).is_none());
    }
}
