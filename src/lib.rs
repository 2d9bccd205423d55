//! AssetFlow server
//!
//! REST JSON API for IT asset management: the asset registry, the request
//! and maintenance workflows that move assets through their lifecycle, and
//! an append-only audit log.

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod access;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    let api = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Users
        .route("/users/signup", post(api::users::signup))
        .route("/users/login", post(api::users::login))
        .route("/users/me", get(api::users::me))
        .route("/users/:id", get(api::users::get_user))
        // Assets
        .route("/assets", get(api::assets::list_assets).post(api::assets::create_asset))
        .route("/assets/available", get(api::assets::list_available_assets))
        // Requests
        .route("/requests", get(api::requests::list_requests).post(api::requests::create_request))
        .route("/requests/:id/status", put(api::requests::update_request_status))
        // Maintenance
        .route(
            "/maintenance",
            get(api::maintenance::list_maintenance).post(api::maintenance::create_maintenance),
        )
        .route("/maintenance/:id", put(api::maintenance::update_maintenance))
        // Audit
        .route("/audit", get(api::audit::list_audit).post(api::audit::create_audit))
        // Reports
        .route("/reports/dashboard-summary", get(api::reports::dashboard_summary))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(api::openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

/// Allow the configured origins, or any origin when none are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}
