use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::{LoginRequest, RegisterRequest};
use crate::modules::auth::service::AuthService;
use crate::modules::users::model::UpdateProfileDto;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub error: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered"),
        (status = 400, description = "Validation error or duplicate email", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    Json(dto): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let user = AuthService::register_user(&state.db, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "User registered successfully",
            "data": { "user": user }
        })),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful"),
        (status = 401, description = "Invalid credentials or inactive account", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let response = AuthService::login_user(&state.db, dto, &state.jwt_config).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Login successful",
        "data": response
    })))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user profile"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let user = UserService::get_user(&state.db, auth_user.user_id()?).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "user": user }
    })))
}

#[utoipa::path(
    put,
    path = "/api/auth/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(dto): Json<UpdateProfileDto>,
) -> Result<Json<Value>, AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let user = UserService::update_profile(&state.db, auth_user.user_id()?, dto).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Profile updated successfully",
        "data": { "user": user }
    })))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Logout acknowledged")),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument]
pub async fn logout(_auth_user: AuthUser) -> Json<Value> {
    // Stateless JWTs: nothing to revoke server-side.
    Json(json!({
        "status": "success",
        "message": "Logout successful"
    }))
}
