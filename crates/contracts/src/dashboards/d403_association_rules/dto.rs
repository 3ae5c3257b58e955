use serde::{Deserialize, Serialize};

/// Rule explorer slider values. Each defaults to the column's observed minimum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleExplorerParams {
    pub min_support: Option<f64>,
    pub min_confidence: Option<f64>,
    pub min_lift: Option<f64>,
}
