//! Audit log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::asset::AssetSummary;
use super::enums::{AuditAction, AuditStatus};
use super::user::UserSummary;

/// Audit log entry. Entries are never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub performed_by: Uuid,
    pub action: AuditAction,
    pub status: AuditStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Audit entry with asset and performer, for listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditEntryDetails {
    #[serde(flatten)]
    pub entry: AuditEntry,
    pub asset: Option<AssetSummary>,
    #[serde(rename = "performedByUser")]
    pub performer: Option<UserSummary>,
}

/// Create audit entry request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuditEntry {
    pub asset_id: Option<Uuid>,
    pub action: Option<AuditAction>,
    pub status: Option<AuditStatus>,
    pub location: Option<String>,
    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Audit entry ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEntry {
    pub asset_id: Uuid,
    pub performed_by: Uuid,
    pub action: AuditAction,
    pub status: AuditStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
}
