use contracts::dashboards::common::{DashboardPage, PageView, Section, SectionBody, TextBlock};
use contracts::shared::artifacts::DatasetName;

use crate::dashboards::common::metric;
use crate::shared::data::artifacts::Datasets;
use crate::shared::format::{format_currency, format_decimal, format_number};
use crate::shared::table::Table;
use crate::shared::view::aggregate::grouped_mean;
use crate::shared::view::profile::column_mean;
use crate::shared::view::ViewResult;

/// Discount level with the highest mean revenue impact, and that mean
fn best_discount_level(promo: &Table) -> ViewResult<Option<(f64, f64)>> {
    let means = grouped_mean(promo, "discount_pct", &["total_revenue_impact"])?;

    Ok(means
        .rows()
        .iter()
        .filter_map(|row| Some((row[0].as_f64()?, row[1].as_f64()?)))
        .fold(None, |best: Option<(f64, f64)>, (level, mean)| match best {
            Some((_, top)) if top >= mean => best,
            _ => Some((level, mean)),
        }))
}

fn key_figures(datasets: &Datasets) -> Section {
    let rules = datasets.get(DatasetName::Rules);
    let promo = datasets.get(DatasetName::Promo);

    Section::new(
        "key_figures",
        "Key Figures",
        SectionBody::Metrics(vec![
            metric("Association Rules", || Ok(rules.map(|t| format_number(t.len())))),
            metric("Avg Lift", || match rules {
                Some(t) => Ok(column_mean(t, "lift")?.map(|v| format_decimal(v, 2))),
                None => Ok(None),
            }),
            metric("Best Discount Level", || match promo {
                Some(t) => Ok(best_discount_level(t)?.map(|(level, mean)| {
                    format!("{}% ({} avg revenue impact)", format_decimal(level * 100.0, 0), format_currency(mean))
                })),
                None => Ok(None),
            }),
            metric("Promo Scenarios", || Ok(promo.map(|t| format_number(t.len())))),
        ]),
    )
}

fn text(id: &str, title: &str, bullets: &[&str]) -> Section {
    Section::new(id, title, SectionBody::Text(TextBlock::new(&[], bullets)))
}

pub fn render(datasets: &Datasets) -> PageView {
    let mut view = PageView::new(DashboardPage::ExecutiveSummary);
    view.push(key_figures(datasets));

    // === INSIGHTS ===
    view.push(text(
        "pricing_insights",
        "Pricing Strategy Insights",
        &[
            "Optimal discount range: 5-10% discounts show positive revenue impact",
            "Elasticity patterns: higher discounts (20%+) may reduce overall profitability",
            "Cross-sell leverage: promotions drive additional items per transaction",
            "Product sensitivity: a small share of products drives most promotional revenue",
        ],
    ));
    view.push(text(
        "customer_behavior",
        "Customer Behavior Analysis",
        &[
            "Basket patterns: multi-product baskets dominate transactions",
            "Product affinity: strong product associations identified by lift",
            "Customer segments: high-value customers show higher cross-sell potential",
        ],
    ));
    view.push(text(
        "risk_mitigation",
        "Risk Mitigation",
        &[
            "Data quality: problematic records identified and resolved before analysis",
            "Inventory risk: top products by revenue prioritized for promotional focus",
            "Customer impact: negative promotional scenarios filtered out",
        ],
    ));

    // === RECOMMENDATIONS ===
    view.push(text(
        "immediate_actions",
        "Immediate Actions (30 Days)",
        &[
            "Launch the top 3 promotions, focusing on 5-10% discount scenarios",
            "Train staff on the identified product associations",
            "Set up promotional performance tracking",
            "Target high-value customer segments",
        ],
    ));
    view.push(text(
        "long_term_strategy",
        "Long-term Strategy (6-12 Months)",
        &[
            "Dynamic pricing based on demand patterns",
            "Customer-specific product recommendations",
            "Forecasting of promotional impact and demand",
            "Market positioning and competitive pricing strategy",
        ],
    ));

    view
}
