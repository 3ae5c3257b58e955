use contracts::dashboards::common::{
    DashboardPage, Notice, NoticeLevel, PageView, Section, SectionBody,
};
use contracts::shared::artifacts::DatasetName;

use crate::shared::data::artifacts::{Datasets, LoadError};

/// Headline and noun used when a page's dataset has not been produced yet
fn missing_wording(dataset: DatasetName) -> (&'static str, &'static str) {
    match dataset {
        DatasetName::Transactions | DatasetName::Products | DatasetName::Customers => {
            ("No Cleaned Data Available", "cleaned data")
        }
        DatasetName::Baseline => ("No Baseline Data Available", "baseline metrics"),
        DatasetName::Rules => ("No Association Rules Available", "association rules"),
        DatasetName::Promo => ("No Promotional Scenarios Available", "promotional scenarios"),
        DatasetName::Audit => ("No Data Quality Audit Available", "the data quality audit"),
    }
}

/// Guidance shown in place of a page whose dataset is absent
pub fn missing_artifact_notice(datasets: &Datasets, dataset: DatasetName) -> Notice {
    let (headline, noun) = missing_wording(dataset);

    let mut message = match dataset.upstream_step() {
        Some(step) => format!("{}. Please run {} to generate {} first.", headline, step, noun),
        None => format!("{}.", headline),
    };

    // A file that exists but cannot be read deserves more than "run the notebook"
    if let Some(error) = datasets.error(dataset) {
        if !matches!(error, LoadError::NotFound(_)) {
            message.push_str(&format!(" ({})", error));
        }
    }

    Notice {
        level: NoticeLevel::Warning,
        message,
        fallback: None,
    }
}

/// Page consisting only of the missing-artifact guidance
pub fn unavailable_page(page: DashboardPage, datasets: &Datasets, dataset: DatasetName) -> PageView {
    tracing::info!("Page '{}' skipped: artifact '{}' is absent", page.id(), dataset);

    let mut view = PageView::new(page);
    view.push(Section::new(
        "missing_artifact",
        missing_wording(dataset).0,
        SectionBody::Notice(missing_artifact_notice(datasets, dataset)),
    ));
    view
}
