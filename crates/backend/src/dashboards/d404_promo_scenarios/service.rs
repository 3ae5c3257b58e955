use contracts::dashboards::common::{
    ChartKind, ChartSpec, DashboardPage, PageView, Section, SectionBody, TableSection,
};
use contracts::dashboards::d404_promo_scenarios::ScenarioExplorerParams;
use contracts::shared::artifacts::DatasetName;

use crate::dashboards::common::{
    metric, render_or_notice, render_with_fallback, selection_control, threshold_controls,
    unavailable_page, RenderError, RenderResult, SliderSpec,
};
use crate::shared::data::artifacts::Datasets;
use crate::shared::format::{format_currency, format_decimal, format_number};
use crate::shared::table::Table;
use crate::shared::view::aggregate::grouped_mean;
use crate::shared::view::coerce::numeric_frame;
use crate::shared::view::filter::RowFilter;
use crate::shared::view::profile::column_mean;
use crate::shared::view::rank::top_n;
use crate::shared::view::ViewError;

const TOP_SCENARIOS: usize = 5;
const CROSS_SELL_BINS: u32 = 20;
const FALLBACK_ROWS: usize = 50;

const DISCOUNT: &str = "discount_pct";
const REVENUE_IMPACT: &str = "total_revenue_impact";
const MARGIN_IMPACT: &str = "total_margin_impact";
const CROSS_SELL_ITEMS: &str = "cross_sell_items";
const CROSS_SELL_REVENUE: &str = "cross_sell_revenue_impact";
const ANCHOR: &str = "anchor_description";

pub fn render(datasets: &Datasets, params: &ScenarioExplorerParams) -> PageView {
    let Some(promo) = datasets.get(DatasetName::Promo) else {
        return unavailable_page(DashboardPage::PromoScenarios, datasets, DatasetName::Promo);
    };

    let mut view = PageView::new(DashboardPage::PromoScenarios);
    view.push(promo_metrics(promo));

    // === PERFORMANCE SUMMARY ===
    view.push(render_or_notice("discount_summary", "Performance by Discount Level", || {
        let summary = grouped_mean(promo, DISCOUNT, &[REVENUE_IMPACT, MARGIN_IMPACT, CROSS_SELL_ITEMS])?;
        Ok(SectionBody::Table(TableSection {
            caption: None,
            data: summary.into_data(),
        }))
    }));

    view.push(render_or_notice("top_scenarios", "Top 5 Revenue Impact Scenarios", || {
        let top = top_n(promo, TOP_SCENARIOS, REVENUE_IMPACT)?
            .select(&[ANCHOR, DISCOUNT, REVENUE_IMPACT, MARGIN_IMPACT])?;
        Ok(SectionBody::Table(TableSection {
            caption: None,
            data: top.into_data(),
        }))
    }));

    // === CHARTS ===
    view.push(render_or_notice("revenue_by_discount", "Revenue Impact by Discount Level", || {
        let data = numeric_frame(promo, &[DISCOUNT, REVENUE_IMPACT], &[])?;
        if data.is_empty() {
            return Err(RenderError::NoData(
                "No valid data available for plotting. Check data types and missing values."
                    .to_string(),
            ));
        }
        Ok(SectionBody::Chart(
            ChartSpec::new(ChartKind::Box, "Revenue Impact by Discount Level", DISCOUNT, data.into_data())
                .y(REVENUE_IMPACT)
                .color(DISCOUNT)
                .labels("Discount Level", "Revenue Impact (£)"),
        ))
    }));

    view.push(render_or_notice("cross_sell_scatter", "Revenue vs Cross-sell Revenue", || {
        cross_sell_scatter(promo)
    }));

    view.push(render_or_notice("cross_sell_distribution", "Cross-sell Items Distribution", || {
        if !promo.has_column(CROSS_SELL_ITEMS) {
            return Err(RenderError::NoData("Cross-sell items column not found.".to_string()));
        }
        let data = numeric_frame(promo, &[CROSS_SELL_ITEMS], &[])?;
        if data.is_empty() {
            return Err(RenderError::NoData(
                "No valid cross-sell items data available.".to_string(),
            ));
        }
        Ok(SectionBody::Chart(
            ChartSpec::new(
                ChartKind::Histogram,
                "Cross-sell Items Distribution",
                CROSS_SELL_ITEMS,
                data.into_data(),
            )
            .bins(CROSS_SELL_BINS)
            .labels("Cross-sell Items", "Count"),
        ))
    }));

    // === EXPLORER ===
    let mut controls = Vec::new();
    let mut filter = RowFilter::new();

    if let Some((control, selected)) = selection_control(
        promo,
        "discount_levels",
        "Discount Levels",
        DISCOUNT,
        params.discount_levels.as_deref(),
    ) {
        controls.push(control);
        filter = filter.one_of(DISCOUNT, selected);
    }

    let (sliders, filter) = threshold_controls(
        promo,
        &[
            SliderSpec {
                id: "min_revenue_impact",
                label: "Minimum Revenue Impact (£)",
                column: REVENUE_IMPACT,
                requested: params.min_revenue_impact,
            },
            SliderSpec {
                id: "min_cross_sell_items",
                label: "Minimum Cross-sell Items",
                column: CROSS_SELL_ITEMS,
                requested: params.min_cross_sell_items,
            },
        ],
        filter,
    );
    controls.extend(sliders);

    view.push(Section::new("explorer_controls", "Scenario Explorer", SectionBody::Controls(controls)));
    view.push(render_with_fallback(
        "explorer_table",
        "Filtered Scenarios",
        || {
            let filtered = filter.apply(promo)?;
            Ok(SectionBody::Table(TableSection {
                caption: Some(format!("Showing {} filtered scenarios", filtered.len())),
                data: filtered.into_data(),
            }))
        },
        || Some(promo.head(FALLBACK_ROWS).into_data()),
    ));

    view
}

fn promo_metrics(promo: &Table) -> Section {
    let mean = |column: &'static str, format: fn(f64) -> String| {
        move || -> Result<Option<String>, ViewError> {
            Ok(column_mean(promo, column)?.map(format))
        }
    };

    Section::new(
        "promo_metrics",
        "Promotional Impact Analysis",
        SectionBody::Metrics(vec![
            metric("Total Scenarios", || Ok(Some(format_number(promo.len())))),
            metric("Avg Revenue Impact", mean(REVENUE_IMPACT, format_currency)),
            metric("Avg Margin Impact", mean(MARGIN_IMPACT, format_currency)),
            metric("Avg Cross-sell Items", mean(CROSS_SELL_ITEMS, |v| format_decimal(v, 1))),
        ]),
    )
}

/// Total vs cross-sell revenue per scenario; item count and discount level
/// feed size and color when present
fn cross_sell_scatter(promo: &Table) -> RenderResult<SectionBody> {
    if !promo.has_column(REVENUE_IMPACT) || !promo.has_column(CROSS_SELL_REVENUE) {
        return Err(RenderError::NoData("Cross-sell columns not found in data.".to_string()));
    }

    let mut numeric = vec![REVENUE_IMPACT, CROSS_SELL_REVENUE];
    numeric.extend([CROSS_SELL_ITEMS, DISCOUNT].into_iter().filter(|c| promo.has_column(c)));
    let carry: Vec<&str> = [ANCHOR].into_iter().filter(|c| promo.has_column(c)).collect();

    let data = numeric_frame(promo, &numeric, &carry)?;
    if data.is_empty() {
        return Err(RenderError::NoData(
            "No valid cross-sell data available for plotting.".to_string(),
        ));
    }

    let mut chart = ChartSpec::new(
        ChartKind::Scatter,
        "Revenue vs Cross-sell Revenue",
        REVENUE_IMPACT,
        data.into_data(),
    )
    .y(CROSS_SELL_REVENUE)
    .hover(carry.iter().map(|c| c.to_string()).collect())
    .labels("Total Revenue Impact (£)", "Cross-sell Revenue Impact (£)");

    if numeric.contains(&CROSS_SELL_ITEMS) {
        chart = chart.size(CROSS_SELL_ITEMS);
    }
    if numeric.contains(&DISCOUNT) {
        chart = chart.color(DISCOUNT);
    }

    Ok(SectionBody::Chart(chart))
}
