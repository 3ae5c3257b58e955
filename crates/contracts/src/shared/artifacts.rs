use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical name of an upstream artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetName {
    Transactions,
    Products,
    Customers,
    Baseline,
    Rules,
    Promo,
    Audit,
}

impl DatasetName {
    pub const ALL: [DatasetName; 7] = [
        DatasetName::Transactions,
        DatasetName::Products,
        DatasetName::Customers,
        DatasetName::Baseline,
        DatasetName::Rules,
        DatasetName::Promo,
        DatasetName::Audit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetName::Transactions => "transactions",
            DatasetName::Products => "products",
            DatasetName::Customers => "customers",
            DatasetName::Baseline => "baseline",
            DatasetName::Rules => "rules",
            DatasetName::Promo => "promo",
            DatasetName::Audit => "audit",
        }
    }

    /// Canonical path relative to the artifacts root
    pub fn relative_path(&self) -> &'static str {
        match self {
            DatasetName::Transactions => "data_clean/transactions.csv",
            DatasetName::Products => "data_clean/products.csv",
            DatasetName::Customers => "data_clean/customers.csv",
            DatasetName::Baseline => "outputs/sku_baseline.csv",
            DatasetName::Rules => "outputs/assoc_rules_pairs.csv",
            DatasetName::Promo => "outputs/promo_scenarios_summary.csv",
            DatasetName::Audit => "outputs/data_quality_audit.csv",
        }
    }

    /// Notebook that produces this artifact
    pub fn upstream_step(&self) -> Option<&'static str> {
        match self {
            DatasetName::Transactions | DatasetName::Products | DatasetName::Customers => {
                Some("notebooks/01_data_cleaning.ipynb")
            }
            DatasetName::Baseline => Some("notebooks/02_baseline_analysis.ipynb"),
            DatasetName::Rules => Some("notebooks/03_market_basket_analysis.ipynb"),
            DatasetName::Promo => Some("notebooks/04_promo_simulation.ipynb"),
            DatasetName::Audit => None,
        }
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatasetName::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown dataset: {}", s))
    }
}

/// Load outcome of a single artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactStatus {
    pub dataset: DatasetName,
    /// Path relative to the artifacts root
    pub path: String,
    pub available: bool,
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    /// Why the artifact is absent (missing file, parse error)
    pub reason: Option<String>,
}

/// Response of GET /api/artifacts and POST /api/artifacts/reload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactStatusResponse {
    /// Resolved artifacts root directory
    pub root: String,
    pub artifacts: Vec<ArtifactStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_names_round_trip_through_str() {
        for dataset in DatasetName::ALL {
            assert_eq!(dataset.as_str().parse::<DatasetName>(), Ok(dataset));
        }
        assert!("inventory".parse::<DatasetName>().is_err());
    }

    #[test]
    fn test_paths_are_under_known_directories() {
        assert_eq!(DatasetName::Rules.relative_path(), "outputs/assoc_rules_pairs.csv");
        for dataset in DatasetName::ALL {
            let path = dataset.relative_path();
            assert!(path.starts_with("data_clean/") || path.starts_with("outputs/"));
            assert!(path.ends_with(".csv"));
        }
    }
}
