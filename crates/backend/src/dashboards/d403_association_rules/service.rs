use contracts::dashboards::common::{
    ChartKind, ChartSpec, DashboardPage, PageView, Section, SectionBody, TableSection,
};
use contracts::dashboards::d403_association_rules::RuleExplorerParams;
use contracts::shared::artifacts::DatasetName;

use crate::dashboards::common::{
    metric, render_or_notice, render_with_fallback, threshold_controls, unavailable_page,
    RenderResult, SliderSpec,
};
use crate::shared::data::artifacts::Datasets;
use crate::shared::format::{format_decimal, format_number};
use crate::shared::table::Table;
use crate::shared::view::coerce::numeric_frame;
use crate::shared::view::filter::RowFilter;
use crate::shared::view::profile::column_mean;
use crate::shared::view::rank::top_n;
use crate::shared::view::ViewError;

const TOP_RULES: usize = 20;
const HISTOGRAM_BINS: u32 = 30;
const FALLBACK_ROWS: usize = 50;

/// Rule sides shown on hover, when the artifact has them
const RULE_SIDES: [&str; 2] = ["antecedent", "consequent"];

pub fn render(datasets: &Datasets, params: &RuleExplorerParams) -> PageView {
    let Some(rules) = datasets.get(DatasetName::Rules) else {
        return unavailable_page(DashboardPage::AssociationRules, datasets, DatasetName::Rules);
    };

    let mut view = PageView::new(DashboardPage::AssociationRules);
    view.push(rule_metrics(rules));

    // === TOP RULES ===
    view.push(render_with_fallback(
        "top_rules",
        "Top Rules by Lift",
        || {
            let top = top_n(rules, TOP_RULES, "lift")?;
            let mut columns = vec!["antecedent", "lift"];
            if top.has_column("consequent") {
                columns.push("consequent");
            }
            let data = top.select(&columns)?.into_data();

            let mut chart = ChartSpec::new(ChartKind::HorizontalBar, "Top 20 Rules by Lift", "lift", data)
                .y("antecedent")
                .color("lift")
                .labels("Lift", "Antecedent → Consequent");
            if columns.len() == 3 {
                chart = chart.hover(vec!["consequent".to_string()]);
            }
            Ok(SectionBody::Chart(chart))
        },
        || Some(rules.head(TOP_RULES).into_data()),
    ));

    view.push(render_or_notice("support_confidence", "Support vs Confidence Analysis", || {
        support_confidence_chart(rules)
    }));

    // === DISTRIBUTIONS ===
    view.push(histogram(rules, "support_distribution", "Support Distribution", "support", "Support"));
    view.push(histogram(
        rules,
        "confidence_distribution",
        "Confidence Distribution",
        "confidence",
        "Confidence",
    ));

    // === EXPLORER ===
    let (controls, filter) = threshold_controls(
        rules,
        &[
            SliderSpec {
                id: "min_support",
                label: "Minimum Support",
                column: "support",
                requested: params.min_support,
            },
            SliderSpec {
                id: "min_confidence",
                label: "Minimum Confidence",
                column: "confidence",
                requested: params.min_confidence,
            },
            SliderSpec {
                id: "min_lift",
                label: "Minimum Lift",
                column: "lift",
                requested: params.min_lift,
            },
        ],
        RowFilter::new(),
    );

    view.push(Section::new("explorer_controls", "Rule Explorer", SectionBody::Controls(controls)));
    view.push(render_with_fallback(
        "explorer_table",
        "Filtered Rules",
        || {
            let filtered = filter.apply(rules)?;
            Ok(SectionBody::Table(TableSection {
                caption: None,
                data: filtered.into_data(),
            }))
        },
        || Some(rules.head(FALLBACK_ROWS).into_data()),
    ));

    view
}

fn rule_metrics(rules: &Table) -> Section {
    let mean = |column: &'static str, decimals: usize| {
        move || -> Result<Option<String>, ViewError> {
            Ok(column_mean(rules, column)?.map(|v| format_decimal(v, decimals)))
        }
    };

    Section::new(
        "rule_metrics",
        "Market Basket Analysis Results",
        SectionBody::Metrics(vec![
            metric("Total Rules", || Ok(Some(format_number(rules.len())))),
            metric("Avg Support", mean("support", 4)),
            metric("Avg Confidence", mean("confidence", 4)),
            metric("Avg Lift", mean("lift", 2)),
        ]),
    )
}

/// Scatter of every rule; lift drives point size and color when the artifact has it
fn support_confidence_chart(rules: &Table) -> RenderResult<SectionBody> {
    let with_lift = rules.has_column("lift");
    let hover: Vec<&str> = RULE_SIDES.iter().copied().filter(|c| rules.has_column(c)).collect();

    let numeric: &[&str] = if with_lift {
        &["support", "confidence", "lift"]
    } else {
        &["support", "confidence"]
    };
    let data = numeric_frame(rules, numeric, &hover)?.into_data();

    let title = if with_lift {
        "Support vs Confidence (Size = Lift)"
    } else {
        "Support vs Confidence"
    };

    let mut chart = ChartSpec::new(ChartKind::Scatter, title, "support", data)
        .y("confidence")
        .hover(hover.iter().map(|c| c.to_string()).collect())
        .labels("Support", "Confidence");
    if with_lift {
        chart = chart.size("lift").color("lift");
    }

    Ok(SectionBody::Chart(chart))
}

fn histogram(rules: &Table, id: &str, title: &str, column: &str, x_label: &str) -> Section {
    render_or_notice(id, title, || {
        let data = numeric_frame(rules, &[column], &[])?.into_data();
        Ok(SectionBody::Chart(
            ChartSpec::new(ChartKind::Histogram, title, column, data)
                .bins(HISTOGRAM_BINS)
                .labels(x_label, "Count"),
        ))
    })
}
