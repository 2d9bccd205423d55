//! Asset request model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::RequestStatus;

/// An employee's request to be assigned an asset
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetRequest {
    pub id: Uuid,
    /// Human-readable identifier, e.g. REQ-7263512093347840
    #[serde(rename = "requestID")]
    pub request_code: String,
    /// User who filed the request
    pub requested_by: Uuid,
    pub employee_name: String,
    pub department: String,
    /// Requested category. For a specific-asset request this is the asset's
    /// category at the time the request was filed.
    pub asset_type: String,
    pub reason: String,
    pub specific_asset: Option<Uuid>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create request payload. Exactly one of `assetType` / `specificAssetId`.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest {
    pub asset_type: Option<String>,
    pub specific_asset_id: Option<Uuid>,
    #[validate(length(max = 2000, message = "Reason must be at most 2000 characters"))]
    pub reason: Option<String>,
}

/// Status update payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRequestStatus {
    pub status: Option<RequestStatus>,
}

/// Request ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssetRequest {
    pub request_code: String,
    pub requested_by: Uuid,
    pub employee_name: String,
    pub department: String,
    pub asset_type: String,
    pub reason: String,
    pub specific_asset: Option<Uuid>,
}

/// Asset hand-over performed together with an approval
#[derive(Debug, Clone, PartialEq)]
pub struct AssetAssignment {
    pub asset_id: Uuid,
    pub owner: String,
}

/// Decision recorded on a pending request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDecision {
    pub status: RequestStatus,
    pub assignment: Option<AssetAssignment>,
}
