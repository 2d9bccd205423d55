//! Sign-up, login and user lookup endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::user::{AuthResponse, LoginRequest, RegisterUser, UserProfile},
};

use super::{parse_id, AuthenticatedUser, JsonBody};

/// Create an account
#[utoipa::path(
    post,
    path = "/users/signup",
    tag = "users",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn signup(
    State(state): State<crate::AppState>,
    JsonBody(data): JsonBody<RegisterUser>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let response = state.services.users.register(data).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    JsonBody(data): JsonBody<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = state.services.users.login(data).await?;
    Ok(Json(response))
}

/// Get the authenticated user
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserProfile),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(AuthenticatedUser(principal): AuthenticatedUser) -> AppResult<Json<UserProfile>> {
    Ok(Json(UserProfile::from(&principal)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = uuid::Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserProfile),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<UserProfile>> {
    let id = parse_id(&id)?;
    let user = state.services.users.get_by_id(&principal, id).await?;
    Ok(Json(user))
}
