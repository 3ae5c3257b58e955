pub mod common;
pub mod d400_overview;
pub mod d401_cleaned_data;
pub mod d402_top_products;
pub mod d403_association_rules;
pub mod d404_promo_scenarios;
pub mod d405_executive_summary;

use contracts::dashboards::common::{DashboardPage, PageView, RenderRequest};

use crate::shared::data::artifacts::Datasets;

/// Evaluate one page against a dataset snapshot.
///
/// Pure: the same snapshot and request always give the same view, and
/// nothing in the snapshot is modified.
pub fn render_page(datasets: &Datasets, request: &RenderRequest) -> PageView {
    match request.page {
        DashboardPage::Overview => d400_overview::service::render(datasets),
        DashboardPage::CleanedData => d401_cleaned_data::service::render(datasets),
        DashboardPage::TopProducts => {
            d402_top_products::service::render(datasets, &request.params.top_products)
        }
        DashboardPage::AssociationRules => {
            d403_association_rules::service::render(datasets, &request.params.association_rules)
        }
        DashboardPage::PromoScenarios => {
            d404_promo_scenarios::service::render(datasets, &request.params.promo_scenarios)
        }
        DashboardPage::ExecutiveSummary => d405_executive_summary::service::render(datasets),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::artifacts::DatasetName;

    use crate::shared::table::Table;

    #[test]
    fn test_every_page_renders_without_artifacts() {
        let datasets = Datasets::from_tables(Vec::<(DatasetName, Table)>::new());

        for page in DashboardPage::ALL {
            let view = render_page(&datasets, &RenderRequest::defaults(page));
            assert_eq!(view.page, page);
            assert!(!view.sections.is_empty());

            match page {
                DashboardPage::Overview | DashboardPage::ExecutiveSummary => {
                    assert!(view.notice_ids().is_empty())
                }
                _ => assert_eq!(view.notice_ids(), vec!["missing_artifact"]),
            }
        }
    }

    #[test]
    fn test_render_is_repeatable() {
        let promo = Table::from_csv(
            "discount_pct,total_revenue_impact,cross_sell_items\n0.05,100,1\n0.1,50,2\n".as_bytes(),
        )
        .unwrap();
        let datasets = Datasets::from_tables([(DatasetName::Promo, promo)]);
        let request = RenderRequest::defaults(DashboardPage::PromoScenarios);

        let first = serde_json::to_value(render_page(&datasets, &request)).unwrap();
        let second = serde_json::to_value(render_page(&datasets, &request)).unwrap();
        assert_eq!(first, second);
    }
}
