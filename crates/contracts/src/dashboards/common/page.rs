use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Navigable dashboard pages, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardPage {
    Overview,
    CleanedData,
    TopProducts,
    AssociationRules,
    PromoScenarios,
    ExecutiveSummary,
}

impl DashboardPage {
    pub const ALL: [DashboardPage; 6] = [
        DashboardPage::Overview,
        DashboardPage::CleanedData,
        DashboardPage::TopProducts,
        DashboardPage::AssociationRules,
        DashboardPage::PromoScenarios,
        DashboardPage::ExecutiveSummary,
    ];

    /// Identifier used in URLs and request bodies
    pub fn id(&self) -> &'static str {
        match self {
            DashboardPage::Overview => "overview",
            DashboardPage::CleanedData => "cleaned_data",
            DashboardPage::TopProducts => "top_products",
            DashboardPage::AssociationRules => "association_rules",
            DashboardPage::PromoScenarios => "promo_scenarios",
            DashboardPage::ExecutiveSummary => "executive_summary",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DashboardPage::Overview => "Overview",
            DashboardPage::CleanedData => "Cleaned Data",
            DashboardPage::TopProducts => "Top Products",
            DashboardPage::AssociationRules => "Association Rules",
            DashboardPage::PromoScenarios => "Promo Scenarios",
            DashboardPage::ExecutiveSummary => "Executive Summary",
        }
    }
}

impl FromStr for DashboardPage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DashboardPage::ALL
            .iter()
            .copied()
            .find(|p| p.id() == s)
            .ok_or_else(|| format!("unknown page: {}", s))
    }
}

/// Navigation entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub id: String,
    pub title: String,
}

impl From<DashboardPage> for PageInfo {
    fn from(page: DashboardPage) -> Self {
        Self {
            id: page.id().to_string(),
            title: page.title().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids_match_serde_names() {
        for page in DashboardPage::ALL {
            let json = serde_json::to_string(&page).unwrap();
            assert_eq!(json, format!("\"{}\"", page.id()));
            assert_eq!(page.id().parse::<DashboardPage>(), Ok(page));
        }
    }
}
