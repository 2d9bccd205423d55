//! Asset request workflow

use snowflaked::sync::Generator;
use uuid::Uuid;
use validator::Validate;

use super::users::non_blank;
use crate::{
    access::{self, Resource, RowScope},
    error::{AppError, AppResult},
    models::{
        enums::{AssetStatus, RequestStatus},
        request::{
            AssetAssignment, AssetRequest, CreateAssetRequest, NewAssetRequest, RequestDecision,
        },
        user::Principal,
    },
    repository::Repository,
};

static REQUEST_IDS: Generator = Generator::new(0);

/// Human-readable request identifier, unique within the process
fn next_request_code() -> String {
    format!("REQ-{}", REQUEST_IDS.generate::<u64>())
}

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// File a request for a category or for one specific available asset
    pub async fn create(&self, principal: &Principal, data: CreateAssetRequest) -> AppResult<AssetRequest> {
        data.validate()?;

        let reason = non_blank(data.reason)
            .ok_or_else(|| AppError::Validation("Please provide a reason".to_string()))?;

        let (asset_type, specific_asset) = match (non_blank(data.asset_type), data.specific_asset_id) {
            (None, Some(asset_id)) => {
                let asset = self
                    .repository
                    .assets
                    .get_by_id(asset_id)
                    .await?
                    .filter(|a| a.status == AssetStatus::Available)
                    .ok_or_else(|| {
                        AppError::InvalidState("This asset is not available for request.".to_string())
                    })?;
                (asset.category.to_string(), Some(asset.id))
            }
            (Some(asset_type), None) => (asset_type, None),
            _ => {
                return Err(AppError::Validation(
                    "Provide either an asset type or a specific asset".to_string(),
                ))
            }
        };

        let request = self
            .repository
            .requests
            .create(NewAssetRequest {
                request_code: next_request_code(),
                requested_by: principal.id,
                employee_name: principal.name.clone(),
                department: principal
                    .department
                    .clone()
                    .unwrap_or_else(|| "General".to_string()),
                asset_type,
                reason,
                specific_asset,
            })
            .await?;

        tracing::info!(request = %request.request_code, requested_by = %principal.id, "Asset request filed");
        Ok(request)
    }

    /// Requests visible to the caller, newest first
    pub async fn list(&self, principal: &Principal) -> AppResult<Vec<AssetRequest>> {
        let requested_by = match access::visibility(principal.role, Resource::Request).rows {
            RowScope::All => None,
            RowScope::Own => Some(principal.id),
        };
        self.repository.requests.list(requested_by).await
    }

    /// Approve or reject a pending request (administrators only).
    /// Approving a specific-asset request hands the asset to the requester.
    pub async fn update_status(
        &self,
        principal: &Principal,
        id: Uuid,
        status: Option<RequestStatus>,
    ) -> AppResult<AssetRequest> {
        principal.require_admin()?;

        let status = status
            .filter(RequestStatus::is_decision)
            .ok_or_else(|| AppError::Validation("Invalid status".to_string()))?;

        let request = self
            .repository
            .requests
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;

        if request.status != RequestStatus::Pending {
            return Err(AppError::InvalidState(format!(
                "Request has already been {}",
                request.status
            )));
        }

        let assignment = match (status, request.specific_asset) {
            (RequestStatus::Approved, Some(asset_id)) => Some(AssetAssignment {
                asset_id,
                owner: request.employee_name.clone(),
            }),
            _ => None,
        };

        let decided = self
            .repository
            .requests
            .decide(id, RequestDecision { status, assignment: assignment.clone() })
            .await?;

        tracing::info!(request = %decided.request_code, status = %decided.status, "Request decided");
        if let Some(assignment) = assignment {
            tracing::info!(
                asset_id = %assignment.asset_id,
                owner = %assignment.owner,
                status = %AssetStatus::InUse,
                "Asset status changed"
            );
        }
        Ok(decided)
    }
}
