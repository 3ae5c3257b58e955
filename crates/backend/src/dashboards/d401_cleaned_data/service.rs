use contracts::dashboards::common::{
    ChartKind, ChartSpec, DashboardPage, PageView, Section, SectionBody, TableSection,
};
use contracts::shared::artifacts::DatasetName;

use crate::dashboards::common::{metric, render_or_notice, unavailable_page, RenderError};
use crate::shared::data::artifacts::Datasets;
use crate::shared::format::format_number;
use crate::shared::table::Table;
use crate::shared::view::profile::{daily_counts, date_range, distinct_count, kind_counts, missing_counts};

const PREVIEW_ROWS: usize = 100;

pub fn render(datasets: &Datasets) -> PageView {
    let Some(transactions) = datasets.get(DatasetName::Transactions) else {
        return unavailable_page(DashboardPage::CleanedData, datasets, DatasetName::Transactions);
    };

    let mut view = PageView::new(DashboardPage::CleanedData);
    view.push(overview_metrics(transactions));

    view.push(Section::new(
        "preview",
        "Data Preview",
        SectionBody::Table(TableSection {
            caption: Some(format!("First {} rows", PREVIEW_ROWS.min(transactions.len()))),
            data: transactions.head(PREVIEW_ROWS).into_data(),
        }),
    ));

    // === DATA QUALITY ===
    view.push(render_or_notice("missing_values", "Missing Values by Column", || {
        let data = missing_counts(transactions).into_data();
        Ok(SectionBody::Chart(
            ChartSpec::new(ChartKind::Bar, "Missing Values by Column", "column", data)
                .y("missing")
                .labels("Column", "Missing Values"),
        ))
    }));

    view.push(render_or_notice("column_kinds", "Data Types Distribution", || {
        let data = kind_counts(transactions).into_data();
        if data.is_empty() {
            return Err(RenderError::NoData("The dataset has no columns.".to_string()));
        }
        Ok(SectionBody::Chart(
            ChartSpec::new(ChartKind::Pie, "Data Types Distribution", "kind", data).y("count"),
        ))
    }));

    // === TRENDS ===
    view.push(render_or_notice("daily_volume", "Transaction Trends", || {
        let data = daily_counts(transactions, "InvoiceDate")?.into_data();
        Ok(SectionBody::Chart(
            ChartSpec::new(ChartKind::Line, "Daily Transaction Volume", "date", data)
                .y("transactions")
                .labels("Date", "Number of Transactions"),
        ))
    }));

    view
}

fn overview_metrics(transactions: &Table) -> Section {
    Section::new(
        "overview",
        "Transaction Data Overview",
        SectionBody::Metrics(vec![
            metric("Total Transactions", || Ok(Some(format_number(transactions.len())))),
            metric("Unique Products", || {
                distinct_count(transactions, "StockCode").map(|n| Some(format_number(n)))
            }),
            metric("Unique Customers", || {
                distinct_count(transactions, "Customer ID").map(|n| Some(format_number(n)))
            }),
            metric("Date Range", || {
                Ok(date_range(transactions, "InvoiceDate")?.map(|(first, last)| {
                    format!("{} to {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d"))
                }))
            }),
        ]),
    )
}
