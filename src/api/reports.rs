//! Reporting endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, models::report::DashboardSummary};

use super::AuthenticatedUser;

/// Asset counts and value for the dashboard
#[utoipa::path(
    get,
    path = "/reports/dashboard-summary",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn dashboard_summary(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_principal): AuthenticatedUser,
) -> AppResult<Json<DashboardSummary>> {
    let summary = state.services.reports.dashboard_summary().await?;
    Ok(Json(summary))
}
