//! Asset request endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::request::{AssetRequest, CreateAssetRequest, UpdateRequestStatus},
};

use super::{parse_id, AuthenticatedUser, JsonBody};

/// List requests. Employees only see their own.
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Requests, newest first", body = Vec<AssetRequest>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
) -> AppResult<Json<Vec<AssetRequest>>> {
    let requests = state.services.requests.list(&principal).await?;
    Ok(Json(requests))
}

/// File a request for an asset category or a specific available asset
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateAssetRequest,
    responses(
        (status = 201, description = "Request filed", body = AssetRequest),
        (status = 400, description = "Invalid input or asset not available")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    JsonBody(data): JsonBody<CreateAssetRequest>,
) -> AppResult<(StatusCode, Json<AssetRequest>)> {
    let request = state.services.requests.create(&principal, data).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Approve or reject a pending request
#[utoipa::path(
    put,
    path = "/requests/{id}/status",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = uuid::Uuid, Path, description = "Request ID")
    ),
    request_body = UpdateRequestStatus,
    responses(
        (status = 200, description = "Request decided", body = AssetRequest),
        (status = 400, description = "Invalid status or request already decided"),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Requested asset is no longer available")
    )
)]
pub async fn update_request_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    Path(id): Path<String>,
    JsonBody(data): JsonBody<UpdateRequestStatus>,
) -> AppResult<Json<AssetRequest>> {
    let id = parse_id(&id)?;
    let request = state
        .services
        .requests
        .update_status(&principal, id, data.status)
        .await?;
    Ok(Json(request))
}
