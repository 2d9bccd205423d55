//! Asset registry endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::asset::{Asset, AssetListing, AvailableAsset, CreateAsset},
};

use super::{AuthenticatedUser, JsonBody};

/// List all assets. Employees do not receive `cost` and `purchaseDate`.
#[utoipa::path(
    get,
    path = "/assets",
    tag = "assets",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Assets, newest first", body = Vec<Asset>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_assets(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
) -> AppResult<Json<Vec<AssetListing>>> {
    let assets = state.services.assets.list(&principal).await?;
    Ok(Json(assets))
}

/// List assets that can currently be requested
#[utoipa::path(
    get,
    path = "/assets/available",
    tag = "assets",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Available assets", body = Vec<AvailableAsset>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_available_assets(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_principal): AuthenticatedUser,
) -> AppResult<Json<Vec<AvailableAsset>>> {
    let assets = state.services.assets.list_available().await?;
    Ok(Json(assets))
}

/// Register a new asset
#[utoipa::path(
    post,
    path = "/assets",
    tag = "assets",
    security(("bearer_auth" = [])),
    request_body = CreateAsset,
    responses(
        (status = 201, description = "Asset created", body = Asset),
        (status = 400, description = "Missing or invalid fields"),
        (status = 403, description = "Not an administrator"),
        (status = 409, description = "Asset ID or serial number already in use")
    )
)]
pub async fn create_asset(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    JsonBody(data): JsonBody<CreateAsset>,
) -> AppResult<(StatusCode, Json<Asset>)> {
    let asset = state.services.assets.create(&principal, data).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}
