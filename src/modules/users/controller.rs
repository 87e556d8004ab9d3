use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::{Value, json};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::modules::users::model::{CreateUserDto, UpdateUserDto, UserFilterParams};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(("role" = Option<String>, Query, description = "Filter by role slug")),
    responses(
        (status = 200, description = "Paginated list of users"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    Query(params): Query<UserFilterParams>,
) -> Result<Json<Value>, AppError> {
    let page = params.pagination.page();
    let limit = params.pagination.limit();
    let offset = params.pagination.offset();

    let (users, total) =
        UserService::list_users(&state.db, params.role, params.is_active, limit, offset).await?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "users": users,
            "meta": PaginationMeta::new(total, page, limit),
        }
    })))
}

#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Validation error or duplicate email"),
        (status = 403, description = "Forbidden - admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(dto): Json<CreateUserDto>,
) -> Result<(axum::http::StatusCode, Json<Value>), AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let user = UserService::create_user(&state.db, dto).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "User created successfully",
            "data": { "user": user }
        })),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateUserDto>,
) -> Result<Json<Value>, AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let user = UserService::update_user(&state.db, id, dto).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "User updated successfully",
        "data": { "user": user }
    })))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    UserService::delete_user(&state.db, id).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "User deleted successfully"
    })))
}
