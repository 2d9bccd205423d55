//! Maintenance repository for database operations

use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, Pool, Postgres, Row};
use uuid::Uuid;

use super::assets::write_status;
use crate::{
    error::{AppError, AppResult},
    models::{
        asset::AssetSummary,
        enums::{AssetStatus, MaintenanceStatus},
        maintenance::{MaintenanceChanges, MaintenanceDetails, MaintenanceRecord, NewMaintenance},
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// Insert a ticket and put its asset into maintenance, in one transaction
    async fn create(&self, data: NewMaintenance) -> AppResult<MaintenanceRecord>;

    /// Tickets newest first with their asset, optionally restricted to `asset_ids`
    async fn list(&self, asset_ids: Option<Vec<Uuid>>) -> AppResult<Vec<MaintenanceDetails>>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<MaintenanceRecord>>;

    /// Apply `changes`, releasing the asset in the same transaction when asked
    async fn update(&self, id: Uuid, changes: MaintenanceChanges) -> AppResult<MaintenanceRecord> {
        let mut tx = self.pool.begin().await?;

        // $3 says whether the cost is part of the update, $4 is the new value (possibly NULL).
        // $6 guards against a concurrent transition since the caller read the ticket.
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            UPDATE maintenance_records
            SET status = COALESCE($2, status),
                cost = CASE WHEN $3 THEN $4 ELSE cost END,
                completion_date = COALESCE($5, completion_date),
                updated_at = NOW()
            WHERE id = $1 AND status = $6
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.status)
        .bind(changes.cost.is_some())
        .bind(changes.cost.flatten())
        .bind(changes.completion_date)
        .bind(changes.expected_status)
        .fetch_optional(&mut *tx)
        .await?;

        let record = match record {
            Some(record) => record,
            None => {
                let exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS (SELECT 1 FROM maintenance_records WHERE id = $1)",
                )
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

                return Err(if exists {
                    AppError::InvalidState("Maintenance ticket was changed concurrently".to_string())
                } else {
                    AppError::NotFound("Maintenance record not found".to_string())
                });
            }
        };

        if let Some(asset_id) = changes.release_asset {
            // A ticket whose asset has disappeared is still closed
            write_status(&mut tx, asset_id, AssetStatus::Available, None, None).await?;
        }

        tx.commit().await?;
        Ok(record)
    }
}
