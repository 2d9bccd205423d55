//! Read-only aggregates for the dashboard

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::AppResult,
    models::{enums::AssetStatus, report::AssetTotals},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportsRepository: Send + Sync {
    async fn asset_totals(&self) -> AppResult<AssetTotals>;
}

#[derive(Clone)]
pub struct PgReportsRepository {
    pool: Pool<Postgres>,
}

impl PgReportsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportsRepository for PgReportsRepository {
    async fn asset_totals(&self) -> AppResult<AssetTotals> {
        let today = Utc::now().date_naive();
        let horizon = today + Duration::days(30);

        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = $1) AS in_use,
                   COUNT(*) FILTER (WHERE warranty_end BETWEEN $2 AND $3) AS upcoming_expiries,
                   COALESCE(SUM(cost), 0) AS total_value
            FROM assets
            "#,
        )
        .bind(AssetStatus::InUse)
        .bind(today)
        .bind(horizon)
        .fetch_one(&self.pool)
        .await?;

        let by_status = sqlx::query(
            "SELECT status, COUNT(*) AS count FROM assets GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|r| (r.get::<String, _>("status"), r.get::<i64, _>("count")))
        .collect();

        let by_category = sqlx::query(
            "SELECT category, COUNT(*) AS count FROM assets GROUP BY category ORDER BY count DESC, category",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|r| (r.get::<String, _>("category"), r.get::<i64, _>("count")))
        .collect();

        Ok(AssetTotals {
            total: row.get("total"),
            in_use: row.get("in_use"),
            upcoming_expiries: row.get("upcoming_expiries"),
            total_value: row.get::<Decimal, _>("total_value"),
            by_status,
            by_category,
        })
    }
}
