use contracts::dashboards::common::{
    ChartKind, ChartSpec, DashboardPage, PageView, Section, SectionBody, TableSection,
};
use contracts::dashboards::d402_top_products::ProductExplorerParams;
use contracts::shared::artifacts::DatasetName;
use contracts::shared::table::TableData;

use crate::dashboards::common::{
    render_or_notice, render_with_fallback, threshold_controls, unavailable_page, SliderSpec,
};
use crate::shared::data::artifacts::Datasets;
use crate::shared::table::Table;
use crate::shared::view::coerce::numeric_frame;
use crate::shared::view::filter::RowFilter;
use crate::shared::view::rank::top_n;

const TOP_PRODUCTS: usize = 20;
const HISTOGRAM_BINS: u32 = 30;
const FALLBACK_ROWS: usize = 50;

pub fn render(datasets: &Datasets, params: &ProductExplorerParams) -> PageView {
    let Some(baseline) = datasets.get(DatasetName::Baseline) else {
        return unavailable_page(DashboardPage::TopProducts, datasets, DatasetName::Baseline);
    };

    let mut view = PageView::new(DashboardPage::TopProducts);

    // === TOP PRODUCTS ===
    view.push(render_with_fallback(
        "top_products",
        "Top Products by Revenue",
        || {
            let top = top_n(baseline, TOP_PRODUCTS, "revenue")?;
            let data = top.select(&["Description", "revenue"])?.into_data();
            Ok(SectionBody::Chart(
                ChartSpec::new(
                    ChartKind::HorizontalBar,
                    "Top 20 Products by Revenue",
                    "revenue",
                    data,
                )
                .y("Description")
                .color("revenue")
                .labels("Revenue ($)", "Product Description"),
            ))
        },
        || Some(top_preview(baseline)),
    ));

    // === DISTRIBUTIONS ===
    view.push(histogram(baseline, "revenue_distribution", "Revenue Distribution", "revenue", "Revenue ($)"));
    view.push(histogram(
        baseline,
        "price_distribution",
        "Average Price Distribution",
        "avg_price",
        "Average Price ($)",
    ));

    // === EXPLORER ===
    let (controls, filter) = threshold_controls(
        baseline,
        &[
            SliderSpec {
                id: "min_revenue",
                label: "Minimum Revenue ($)",
                column: "revenue",
                requested: params.min_revenue,
            },
            SliderSpec {
                id: "min_avg_price",
                label: "Minimum Average Price ($)",
                column: "avg_price",
                requested: params.min_avg_price,
            },
        ],
        RowFilter::new(),
    );

    view.push(Section::new("explorer_controls", "Product Explorer", SectionBody::Controls(controls)));
    view.push(render_with_fallback(
        "explorer_table",
        "Filtered Products",
        || {
            let filtered = filter.apply(baseline)?;
            Ok(SectionBody::Table(TableSection {
                caption: None,
                data: filtered.into_data(),
            }))
        },
        || Some(baseline.head(FALLBACK_ROWS).into_data()),
    ));

    view
}

/// Top rows by revenue for display when the chart cannot be built
fn top_preview(baseline: &Table) -> TableData {
    top_n(baseline, TOP_PRODUCTS, "revenue")
        .and_then(|t| t.select(&["Description", "revenue"]))
        .unwrap_or_else(|_| baseline.head(TOP_PRODUCTS))
        .into_data()
}

fn histogram(baseline: &Table, id: &str, title: &str, column: &str, x_label: &str) -> Section {
    render_or_notice(id, title, || {
        let data = numeric_frame(baseline, &[column], &[])?.into_data();
        Ok(SectionBody::Chart(
            ChartSpec::new(ChartKind::Histogram, title, column, data)
                .bins(HISTOGRAM_BINS)
                .labels(x_label, "Count"),
        ))
    })
}
