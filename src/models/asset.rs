//! Asset model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::{AssetCategory, AssetStatus};

/// Asset record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: Uuid,
    /// Human-readable asset identifier (unique)
    #[serde(rename = "assetID")]
    pub asset_tag: String,
    /// Manufacturer serial number (unique)
    pub serial_number: String,
    pub name: String,
    pub category: AssetCategory,
    pub status: AssetStatus,
    /// Name or email of the person holding the asset
    pub current_owner: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_end: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    /// Whether `identities` (a principal's lower-cased email and name) designate the current owner
    pub fn is_owned_by(&self, identities: &[String]) -> bool {
        match self.current_owner.as_deref().map(str::trim) {
            Some(owner) if !owner.is_empty() => {
                let owner = owner.to_lowercase();
                identities.iter().any(|id| *id == owner)
            }
            _ => false,
        }
    }
}

/// Asset without purchasing information, as shown to employees
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestrictedAsset {
    pub id: Uuid,
    #[serde(rename = "assetID")]
    pub asset_tag: String,
    pub serial_number: String,
    pub name: String,
    pub category: AssetCategory,
    pub status: AssetStatus,
    pub current_owner: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub warranty_end: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Asset> for RestrictedAsset {
    fn from(asset: Asset) -> Self {
        RestrictedAsset {
            id: asset.id,
            asset_tag: asset.asset_tag,
            serial_number: asset.serial_number,
            name: asset.name,
            category: asset.category,
            status: asset.status,
            current_owner: asset.current_owner,
            location: asset.location,
            department: asset.department,
            warranty_end: asset.warranty_end,
            created_at: asset.created_at,
            updated_at: asset.updated_at,
        }
    }
}

/// One entry of the asset list, projected for the caller's role
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AssetListing {
    Full(Asset),
    Restricted(RestrictedAsset),
}

/// Minimal projection used by request and maintenance pickers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailableAsset {
    pub id: Uuid,
    #[serde(rename = "assetID")]
    pub asset_tag: String,
    pub name: String,
    pub serial_number: String,
}

/// Asset fields embedded in maintenance and audit listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    pub id: Uuid,
    #[serde(rename = "assetID")]
    pub asset_tag: String,
    pub name: String,
    pub serial_number: String,
    pub location: Option<String>,
}

/// Create asset request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAsset {
    #[serde(rename = "assetID")]
    #[validate(length(max = 64, message = "Asset ID must be at most 64 characters"))]
    pub asset_tag: Option<String>,
    #[validate(length(max = 128, message = "Serial number must be at most 128 characters"))]
    pub serial_number: Option<String>,
    pub name: Option<String>,
    pub category: Option<AssetCategory>,
    pub status: Option<AssetStatus>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_end: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub current_owner: Option<String>,
}

/// Fully validated asset ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewAsset {
    pub asset_tag: String,
    pub serial_number: String,
    pub name: String,
    pub category: AssetCategory,
    pub status: AssetStatus,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_end: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub current_owner: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned_by(owner: Option<&str>) -> Asset {
        let now = Utc::now();
        Asset {
            id: Uuid::new_v4(),
            asset_tag: "A-1".to_string(),
            serial_number: "S-1".to_string(),
            name: "Laptop X".to_string(),
            category: AssetCategory::Laptop,
            status: AssetStatus::InUse,
            current_owner: owner.map(str::to_string),
            location: None,
            department: None,
            purchase_date: None,
            warranty_end: None,
            cost: Some(Decimal::new(129900, 2)),
            created_at: now,
            updated_at: now,
        }
    }

    fn identities() -> Vec<String> {
        vec!["dana@example.com".to_string(), "dana reyes".to_string()]
    }

    #[test]
    fn test_owner_match_ignores_case_and_padding() {
        assert!(owned_by(Some("Dana@Example.COM")).is_owned_by(&identities()));
        assert!(owned_by(Some("  Dana Reyes ")).is_owned_by(&identities()));
        assert!(!owned_by(Some("someone@example.com")).is_owned_by(&identities()));
    }

    #[test]
    fn test_unassigned_asset_has_no_owner() {
        assert!(!owned_by(None).is_owned_by(&identities()));
        assert!(!owned_by(Some("   ")).is_owned_by(&identities()));
    }

    #[test]
    fn test_cost_serializes_as_number() {
        let json = serde_json::to_value(owned_by(None)).unwrap();
        assert_eq!(json["cost"].as_f64(), Some(1299.0));
    }
}
