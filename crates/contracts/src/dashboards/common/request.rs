use serde::{Deserialize, Serialize};

use super::page::DashboardPage;
use crate::dashboards::d402_top_products::ProductExplorerParams;
use crate::dashboards::d403_association_rules::RuleExplorerParams;
use crate::dashboards::d404_promo_scenarios::ScenarioExplorerParams;

/// Control values for every interactive page. Omitted values fall back to
/// defaults derived from the loaded data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageParams {
    pub top_products: ProductExplorerParams,
    pub association_rules: RuleExplorerParams,
    pub promo_scenarios: ScenarioExplorerParams,
}

/// Body of POST /api/dashboard/render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    pub page: DashboardPage,
    #[serde(default)]
    pub params: PageParams,
}

impl RenderRequest {
    /// Request for a page with all controls at their defaults
    pub fn defaults(page: DashboardPage) -> Self {
        Self {
            page,
            params: PageParams::default(),
        }
    }
}
