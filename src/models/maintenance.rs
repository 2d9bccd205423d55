//! Maintenance ticket model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::asset::AssetSummary;
use super::enums::{MaintenancePriority, MaintenanceStatus};

/// Maintenance ticket from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub issue: String,
    pub description: Option<String>,
    pub priority: MaintenancePriority,
    pub status: MaintenanceStatus,
    pub assigned_to: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
    pub cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Maintenance ticket with its asset, for listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceDetails {
    #[serde(flatten)]
    pub record: MaintenanceRecord,
    pub asset: Option<AssetSummary>,
}

/// Create maintenance ticket request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenance {
    pub asset_id: Option<Uuid>,
    #[validate(length(max = 200, message = "Issue must be at most 200 characters"))]
    pub issue: Option<String>,
    pub description: Option<String>,
    pub priority: Option<MaintenancePriority>,
    pub assigned_to: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
}

/// Update maintenance ticket request (administrators only).
/// A field that is absent is left unchanged; `"cost": null` clears the cost.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaintenance {
    pub status: Option<MaintenanceStatus>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<f64>)]
    pub cost: Option<Option<Decimal>>,
    pub completion_date: Option<DateTime<Utc>>,
}

/// Ticket ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenance {
    pub asset_id: Uuid,
    pub issue: String,
    pub description: Option<String>,
    pub priority: MaintenancePriority,
    pub assigned_to: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
}

/// Column changes applied by a ticket update
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceChanges {
    /// Status the ticket must still have for the update to apply
    pub expected_status: MaintenanceStatus,
    pub status: Option<MaintenanceStatus>,
    pub cost: Option<Option<Decimal>>,
    pub completion_date: Option<DateTime<Utc>>,
    /// Asset to put back to `available` in the same transaction
    pub release_asset: Option<Uuid>,
}
