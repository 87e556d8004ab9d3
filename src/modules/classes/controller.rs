use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::auth::AuthUser;
use crate::modules::classes::model::{CreateClassDto, UpdateClassDto};
use crate::modules::classes::service::ClassService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[utoipa::path(
    get,
    path = "/api/admin/classes",
    responses((status = 200, description = "All classes with teacher and subjects")),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_classes(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let classes = ClassService::list_classes(&state.db).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "classes": classes }
    })))
}

#[utoipa::path(
    post,
    path = "/api/admin/classes",
    request_body = CreateClassDto,
    responses(
        (status = 201, description = "Class created"),
        (status = 400, description = "Validation error or duplicate class")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, dto))]
pub async fn create_class(
    State(state): State<AppState>,
    Json(dto): Json<CreateClassDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let class = ClassService::create_class(&state.db, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Class created successfully",
            "data": { "class": class }
        })),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/classes/{id}",
    params(("id" = Uuid, Path, description = "Class ID")),
    request_body = UpdateClassDto,
    responses(
        (status = 200, description = "Class updated"),
        (status = 404, description = "Class not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, dto))]
pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateClassDto>,
) -> Result<Json<Value>, AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let class = ClassService::update_class(&state.db, id, dto).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Class updated successfully",
        "data": { "class": class }
    })))
}

#[utoipa::path(
    delete,
    path = "/api/admin/classes/{id}",
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class deleted"),
        (status = 404, description = "Class not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    ClassService::delete_class(&state.db, id).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Class deleted successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/teacher/classes",
    responses((status = 200, description = "Classes assigned to the caller")),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_my_classes(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let classes = ClassService::classes_for_teacher(&state.db, auth_user.user_id()?).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "classes": classes }
    })))
}
