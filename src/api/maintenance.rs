//! Maintenance ticket endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::maintenance::{CreateMaintenance, MaintenanceDetails, MaintenanceRecord, UpdateMaintenance},
};

use super::{parse_id, AuthenticatedUser, JsonBody};

/// List tickets. Employees only see tickets on assets they hold.
#[utoipa::path(
    get,
    path = "/maintenance",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tickets, newest first", body = Vec<MaintenanceDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
) -> AppResult<Json<Vec<MaintenanceDetails>>> {
    let records = state.services.maintenance.list(&principal).await?;
    Ok(Json(records))
}

/// Open a maintenance ticket; the asset goes into maintenance
#[utoipa::path(
    post,
    path = "/maintenance",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    request_body = CreateMaintenance,
    responses(
        (status = 201, description = "Ticket opened", body = MaintenanceRecord),
        (status = 403, description = "Asset not assigned to the caller"),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn create_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    JsonBody(data): JsonBody<CreateMaintenance>,
) -> AppResult<(StatusCode, Json<MaintenanceRecord>)> {
    let record = state.services.maintenance.create(&principal, data).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Update a ticket's status, cost or completion date
#[utoipa::path(
    put,
    path = "/maintenance/{id}",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(
        ("id" = uuid::Uuid, Path, description = "Maintenance record ID")
    ),
    request_body = UpdateMaintenance,
    responses(
        (status = 200, description = "Ticket updated", body = MaintenanceRecord),
        (status = 400, description = "Transition not allowed"),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "Maintenance record not found")
    )
)]
pub async fn update_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    Path(id): Path<String>,
    JsonBody(data): JsonBody<UpdateMaintenance>,
) -> AppResult<Json<MaintenanceRecord>> {
    let id = parse_id(&id)?;
    let record = state
        .services
        .maintenance
        .update_status(&principal, id, data)
        .await?;
    Ok(Json(record))
}
