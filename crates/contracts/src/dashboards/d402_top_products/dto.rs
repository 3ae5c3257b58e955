use serde::{Deserialize, Serialize};

/// Product explorer slider values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductExplorerParams {
    /// Minimum revenue; defaults to the lowest observed revenue
    pub min_revenue: Option<f64>,
    /// Minimum average price; defaults to the lowest observed price
    pub min_avg_price: Option<f64>,
}
