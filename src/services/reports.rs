//! Dashboard reporting

use crate::{
    error::AppResult,
    models::report::{AssetTotals, CategoryCount, DashboardSummary, StatusCount},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn dashboard_summary(&self) -> AppResult<DashboardSummary> {
        let totals = self.repository.reports.asset_totals().await?;
        Ok(summarize(totals))
    }
}

fn summarize(totals: AssetTotals) -> DashboardSummary {
    let utilization_rate = if totals.total > 0 {
        (totals.in_use as f64 / totals.total as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    };

    let mut assets_by_category: Vec<CategoryCount> = totals
        .by_category
        .into_iter()
        .map(|(name, count)| CategoryCount { name, count })
        .collect();
    assets_by_category.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    DashboardSummary {
        total_assets: totals.total,
        utilization_rate,
        upcoming_expiries: totals.upcoming_expiries,
        total_value: totals.total_value,
        assets_by_status: totals
            .by_status
            .into_iter()
            .map(|(name, value)| StatusCount { name, value })
            .collect(),
        assets_by_category,
    }
}
