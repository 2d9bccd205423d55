//! Data models for AssetFlow

pub mod asset;
pub mod audit;
pub mod enums;
pub mod maintenance;
pub mod report;
pub mod request;
pub mod user;

// Re-export commonly used types
pub use asset::{Asset, AssetListing, AssetSummary, AvailableAsset, RestrictedAsset};
pub use audit::{AuditEntry, AuditEntryDetails};
pub use enums::{
    AssetCategory, AssetStatus, AuditAction, AuditStatus, MaintenancePriority, MaintenanceStatus,
    RequestStatus, Role,
};
pub use maintenance::{MaintenanceDetails, MaintenanceRecord};
pub use request::AssetRequest;
pub use user::{Principal, User, UserProfile};
