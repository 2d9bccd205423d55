//! Asset requests repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::{assets::write_status, unique_violation};
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{AssetStatus, RequestStatus},
        request::{AssetRequest, NewAssetRequest, RequestDecision},
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestsRepository: Send + Sync {
    async fn create(&self, data: NewAssetRequest) -> AppResult<AssetRequest>;

    /// Requests newest first, optionally only those filed by `requested_by`
    async fn list(&self, requested_by: Option<Uuid>) -> AppResult<Vec<AssetRequest>>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<AssetRequest>>;

    /// Record a decision on a pending request, together with the asset
    /// hand-over when there is one. Both writes commit or neither does.
    async fn decide(&self, id: Uuid, decision: RequestDecision) -> AppResult<AssetRequest>;
}

#[derive(Clone)]
pub struct PgRequestsRepository {
    pool: Pool<Postgres>,
}

impl PgRequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestsRepository for PgRequestsRepository {
    async fn create(&self, data: NewAssetRequest) -> AppResult<AssetRequest> {
        let result = sqlx::query_as::<_, AssetRequest>(
            r#"
            INSERT INTO asset_requests (
                id, request_code, requested_by, employee_name, department,
                asset_type, reason, specific_asset, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.request_code)
        .bind(data.requested_by)
        .bind(&data.employee_name)
        .bind(&data.department)
        .bind(&data.asset_type)
        .bind(&data.reason)
        .bind(data.specific_asset)
        .bind(RequestStatus::Pending)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(request) => Ok(request),
            Err(e) if unique_violation(&e).as_deref() == Some("asset_requests_request_code_key") => {
                Err(AppError::Conflict(format!("Request {} already exists", data.request_code)))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self, requested_by: Option<Uuid>) -> AppResult<Vec<AssetRequest>> {
        let requests = sqlx::query_as::<_, AssetRequest>(
            r#"
            SELECT * FROM asset_requests
            WHERE ($1::uuid IS NULL OR requested_by = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(requested_by)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<AssetRequest>> {
        let request = sqlx::query_as::<_, AssetRequest>("SELECT * FROM asset_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(request)
    }

    async fn decide(&self, id: Uuid, decision: RequestDecision) -> AppResult<AssetRequest> {
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, AssetRequest>(
            r#"
            UPDATE asset_requests
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = $3
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(decision.status)
        .bind(RequestStatus::Pending)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::InvalidState("Request has already been decided".to_string()))?;

        if let Some(assignment) = &decision.assignment {
            let changed = write_status(
                &mut tx,
                assignment.asset_id,
                AssetStatus::InUse,
                Some(&assignment.owner),
                Some(AssetStatus::Available),
            )
            .await?;

            // Dropping the transaction rolls the request update back
            if changed == 0 {
                return Err(AppError::Conflict(
                    "Requested asset is no longer available".to_string(),
                ));
            }
        }

        tx.commit().await?;
        Ok(request)
    }
}
