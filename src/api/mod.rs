//! API handlers for AssetFlow REST endpoints

pub mod assets;
pub mod audit;
pub mod health;
pub mod maintenance;
pub mod openapi;
pub mod reports;
pub mod requests;
pub mod users;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::{error::AppError, models::user::Principal, AppState};

/// Extractor for the authenticated principal.
///
/// The bearer token only names the user; the user record is reloaded on
/// every request so that role and identity changes apply immediately.
pub struct AuthenticatedUser(pub Principal);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Not authorized, no token".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let principal = state.services.users.authenticate(token.trim()).await?;
        Ok(AuthenticatedUser(principal))
    }
}

/// JSON body whose rejections are reported as validation errors
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Parse a path identifier before touching the database
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::Validation(format!("Invalid id: {}", raw)))
}
