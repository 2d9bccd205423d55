//! Audit log repository

use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        asset::AssetSummary,
        audit::{AuditEntry, AuditEntryDetails, NewAuditEntry},
        user::UserSummary,
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditRepository: Send + Sync {
    async fn create(&self, data: NewAuditEntry) -> AppResult<AuditEntry>;

    /// Entries newest first, with asset and performer, optionally only those by `performed_by`
    async fn list(&self, performed_by: Option<Uuid>) -> AppResult<Vec<AuditEntryDetails>>;
}

#[derive(Clone)]
pub struct PgAuditRepository {
    pool: Pool<Postgres>,
}

impl PgAuditRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn details_from_row(row: &PgRow) -> Result<AuditEntryDetails, sqlx::Error> {
    let entry = AuditEntry::from_row(row)?;

    let asset = match row.try_get::<Option<Uuid>, _>("a_id")? {
        Some(id) => Some(AssetSummary {
            id,
            asset_tag: row.try_get("a_asset_tag")?,
            name: row.try_get("a_name")?,
            serial_number: row.try_get("a_serial_number")?,
            location: row.try_get("a_location")?,
        }),
        None => None,
    };

    let performer = match row.try_get::<Option<Uuid>, _>("u_id")? {
        Some(id) => Some(UserSummary {
            id,
            name: row.try_get("u_name")?,
            email: row.try_get("u_email")?,
        }),
        None => None,
    };

    Ok(AuditEntryDetails { entry, asset, performer })
}

#[async_trait]
impl AuditRepository for PgAuditRepository {
    async fn create(&self, data: NewAuditEntry) -> AppResult<AuditEntry> {
        let entry = sqlx::query_as::<_, AuditEntry>(
            r#"
            INSERT INTO audit_entries (id, asset_id, performed_by, action, status, location, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.asset_id)
        .bind(data.performed_by)
        .bind(data.action)
        .bind(data.status)
        .bind(&data.location)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(entry)
    }

    async fn list(&self, performed_by: Option<Uuid>) -> AppResult<Vec<AuditEntryDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT e.*,
                   a.id AS a_id, a.asset_tag AS a_asset_tag, a.name AS a_name,
                   a.serial_number AS a_serial_number, a.location AS a_location,
                   u.id AS u_id, u.name AS u_name, u.email AS u_email
            FROM audit_entries e
            LEFT JOIN assets a ON a.id = e.asset_id
            LEFT JOIN users u ON u.id = e.performed_by
            WHERE ($1::uuid IS NULL OR e.performed_by = $1)
            ORDER BY e.created_at DESC
            "#,
        )
        .bind(performed_by)
        .fetch_all(&self.pool)
        .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            entries.push(details_from_row(row)?);
        }
        Ok(entries)
    }
}
