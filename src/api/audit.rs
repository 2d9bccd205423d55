//! Audit log endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::audit::{AuditEntry, AuditEntryDetails, CreateAuditEntry},
};

use super::{AuthenticatedUser, JsonBody};

#[utoipa::path(
    get,
    path = "/audit",
    tag = "audit",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Audit entries, newest first", body = Vec<AuditEntryDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_audit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
) -> AppResult<Json<Vec<AuditEntryDetails>>> {
    let entries = state.services.audit.list(&principal).await?;
    Ok(Json(entries))
}

/// Record an audit observation
#[utoipa::path(
    post,
    path = "/audit",
    tag = "audit",
    security(("bearer_auth" = [])),
    request_body = CreateAuditEntry,
    responses(
        (status = 201, description = "Entry recorded", body = AuditEntry),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn create_audit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    JsonBody(data): JsonBody<CreateAuditEntry>,
) -> AppResult<(StatusCode, Json<AuditEntry>)> {
    let entry = state.services.audit.create(&principal, data).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
