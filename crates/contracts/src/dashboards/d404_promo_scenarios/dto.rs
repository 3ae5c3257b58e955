use serde::{Deserialize, Serialize};

/// Scenario explorer control values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioExplorerParams {
    /// Selected discount levels.
    /// `None` selects the first three levels; an empty list disables the filter.
    pub discount_levels: Option<Vec<f64>>,
    pub min_revenue_impact: Option<f64>,
    pub min_cross_sell_items: Option<f64>,
}
