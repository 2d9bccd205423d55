//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assets, audit, health, maintenance, reports, requests, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AssetFlow API",
        version = "1.0.0",
        description = "IT asset management REST API"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::signup,
        users::login,
        users::me,
        users::get_user,
        // Assets
        assets::list_assets,
        assets::list_available_assets,
        assets::create_asset,
        // Requests
        requests::list_requests,
        requests::create_request,
        requests::update_request_status,
        // Maintenance
        maintenance::list_maintenance,
        maintenance::create_maintenance,
        maintenance::update_maintenance,
        // Audit
        audit::list_audit,
        audit::create_audit,
        // Reports
        reports::dashboard_summary,
    ),
    components(
        schemas(
            // Users
            crate::models::user::UserProfile,
            crate::models::user::UserSummary,
            crate::models::user::RegisterUser,
            crate::models::user::LoginRequest,
            crate::models::user::AuthResponse,
            crate::models::enums::Role,
            // Assets
            crate::models::asset::Asset,
            crate::models::asset::RestrictedAsset,
            crate::models::asset::AvailableAsset,
            crate::models::asset::AssetSummary,
            crate::models::asset::CreateAsset,
            crate::models::enums::AssetCategory,
            crate::models::enums::AssetStatus,
            // Requests
            crate::models::request::AssetRequest,
            crate::models::request::CreateAssetRequest,
            crate::models::request::UpdateRequestStatus,
            crate::models::enums::RequestStatus,
            // Maintenance
            crate::models::maintenance::MaintenanceRecord,
            crate::models::maintenance::MaintenanceDetails,
            crate::models::maintenance::CreateMaintenance,
            crate::models::maintenance::UpdateMaintenance,
            crate::models::enums::MaintenancePriority,
            crate::models::enums::MaintenanceStatus,
            // Audit
            crate::models::audit::AuditEntry,
            crate::models::audit::AuditEntryDetails,
            crate::models::audit::CreateAuditEntry,
            crate::models::enums::AuditAction,
            crate::models::enums::AuditStatus,
            // Reports
            crate::models::report::DashboardSummary,
            crate::models::report::StatusCount,
            crate::models::report::CategoryCount,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "Accounts and authentication"),
        (name = "assets", description = "Asset registry"),
        (name = "requests", description = "Asset requests"),
        (name = "maintenance", description = "Maintenance tickets"),
        (name = "audit", description = "Audit log"),
        (name = "reports", description = "Dashboard reporting")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
