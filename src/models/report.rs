//! Dashboard reporting types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Dashboard summary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_assets: i64,
    /// Share of assets in use, in percent with one decimal
    pub utilization_rate: f64,
    /// Warranties ending within the next 30 days
    pub upcoming_expiries: i64,
    pub total_value: Decimal,
    pub assets_by_status: Vec<StatusCount>,
    pub assets_by_category: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryCount {
    pub name: String,
    pub count: i64,
}

/// Raw asset counters the summary is computed from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetTotals {
    pub total: i64,
    pub in_use: i64,
    pub upcoming_expiries: i64,
    pub total_value: Decimal,
    pub by_status: Vec<(String, i64)>,
    pub by_category: Vec<(String, i64)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_value_is_a_json_number() {
        let summary = DashboardSummary {
            total_assets: 2,
            utilization_rate: 50.0,
            upcoming_expiries: 0,
            total_value: Decimal::new(450050, 2),
            assets_by_status: vec![],
            assets_by_category: vec![],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalValue"].as_f64(), Some(4500.5));
    }
}
