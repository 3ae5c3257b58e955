use contracts::dashboards::common::{Metric, Notice, NoticeLevel, Section, SectionBody};
use contracts::shared::table::TableData;
use thiserror::Error;

use crate::shared::view::ViewError;

/// Why one section of a page could not be built
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    View(#[from] ViewError),

    /// Nothing usable to draw; shown as a warning rather than an error
    #[error("{0}")]
    NoData(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Build one section, turning a failure into a notice in its place.
/// Sibling sections are unaffected.
pub fn render_or_notice<F>(id: &str, title: &str, build: F) -> Section
where
    F: FnOnce() -> RenderResult<SectionBody>,
{
    render_with_fallback(id, title, build, || None)
}

/// Like [`render_or_notice`], attaching a raw preview under the notice
pub fn render_with_fallback<F, P>(id: &str, title: &str, build: F, preview: P) -> Section
where
    F: FnOnce() -> RenderResult<SectionBody>,
    P: FnOnce() -> Option<TableData>,
{
    let error = match build() {
        Ok(body) => return Section::new(id, title, body),
        Err(e) => e,
    };

    tracing::warn!("Section '{}' replaced by notice: {}", id, error);

    let (level, message) = match error {
        RenderError::View(e) => (
            NoticeLevel::Error,
            format!("Error creating {}: {}", title.to_lowercase(), e),
        ),
        RenderError::NoData(message) => (NoticeLevel::Warning, message),
    };

    Section::new(
        id,
        title,
        SectionBody::Notice(Notice {
            level,
            message,
            fallback: preview(),
        }),
    )
}

/// Headline figure that degrades to `N/A` when it cannot be computed
pub fn metric<F>(label: &str, compute: F) -> Metric
where
    F: FnOnce() -> Result<Option<String>, ViewError>,
{
    match compute() {
        Ok(Some(value)) => Metric::new(label, value),
        Ok(None) => Metric::new(label, "N/A"),
        Err(e) => {
            tracing::debug!("Metric '{}' not available: {}", label, e);
            Metric::new(label, "N/A")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::table::CellValue;

    #[test]
    fn test_success_keeps_body() {
        let section = render_or_notice("avg", "Averages", || Ok(SectionBody::Metrics(vec![])));
        assert_eq!(section.id, "avg");
        assert!(!section.body.is_notice());
    }

    #[test]
    fn test_missing_column_becomes_error_notice() {
        let section = render_or_notice("lift_chart", "Top Rules by Lift", || {
            Err(ViewError::MissingColumn("lift".to_string()).into())
        });

        let SectionBody::Notice(notice) = section.body else {
            panic!("expected a notice");
        };
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(
            notice.message,
            "Error creating top rules by lift: column 'lift' not found"
        );
        assert!(notice.fallback.is_none());
    }

    #[test]
    fn test_no_data_becomes_warning_with_preview() {
        let preview = TableData {
            columns: vec!["x".to_string()],
            rows: vec![vec![CellValue::from(1i64)]],
        };
        let section = render_with_fallback(
            "box",
            "Revenue Impact by Discount Level",
            || Err(RenderError::NoData("No valid data available for plotting.".to_string())),
            || Some(preview.clone()),
        );

        let SectionBody::Notice(notice) = section.body else {
            panic!("expected a notice");
        };
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.fallback, Some(preview));
    }

    #[test]
    fn test_metric_falls_back_to_na() {
        assert_eq!(metric("Total", || Ok(Some("3".to_string()))).value, "3");
        assert_eq!(metric("Avg", || Ok(None)).value, "N/A");
        assert_eq!(
            metric("Avg Lift", || Err(ViewError::MissingColumn("lift".to_string()))).value,
            "N/A"
        );
    }
}
