use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::auth::AuthUser;
use crate::modules::classes::service::ClassService;
use crate::modules::subjects::model::{CreateSubjectDto, UpdateSubjectDto};
use crate::modules::subjects::service::SubjectService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignSubjectsDto {
    pub teacher_id: Uuid,
    pub subject_ids: Vec<Uuid>,
}

#[utoipa::path(
    get,
    path = "/api/admin/subjects",
    responses((status = 200, description = "All subjects")),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn get_subjects(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let subjects = SubjectService::list_subjects(&state.db).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "subjects": subjects }
    })))
}

#[utoipa::path(
    post,
    path = "/api/admin/subjects",
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject created"),
        (status = 400, description = "Validation error or duplicate code")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state, dto))]
pub async fn create_subject(
    State(state): State<AppState>,
    Json(dto): Json<CreateSubjectDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let subject = SubjectService::create_subject(&state.db, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Subject created successfully",
            "data": { "subject": subject }
        })),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/subjects/{id}",
    params(("id" = Uuid, Path, description = "Subject ID")),
    request_body = UpdateSubjectDto,
    responses(
        (status = 200, description = "Subject updated"),
        (status = 404, description = "Subject not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state, dto))]
pub async fn update_subject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateSubjectDto>,
) -> Result<Json<Value>, AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let subject = SubjectService::update_subject(&state.db, id, dto).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Subject updated successfully",
        "data": { "subject": subject }
    })))
}

#[utoipa::path(
    delete,
    path = "/api/admin/subjects/{id}",
    params(("id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject deleted"),
        (status = 404, description = "Subject not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn delete_subject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    SubjectService::delete_subject(&state.db, id).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Subject deleted successfully"
    })))
}

#[utoipa::path(
    post,
    path = "/api/admin/subjects/assign",
    request_body = AssignSubjectsDto,
    responses(
        (status = 200, description = "Teacher subject assignments replaced"),
        (status = 404, description = "Subject or teacher not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state, dto))]
pub async fn assign_subjects(
    State(state): State<AppState>,
    Json(dto): Json<AssignSubjectsDto>,
) -> Result<Json<Value>, AppError> {
    SubjectService::assign_teacher_subjects(&state.db, dto.teacher_id, &dto.subject_ids).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Subjects assigned successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/teacher/subjects",
    responses((status = 200, description = "Subjects assigned to the caller")),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn get_my_subjects(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let subjects = SubjectService::subjects_for_teacher(&state.db, auth_user.user_id()?).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "subjects": subjects }
    })))
}

#[utoipa::path(
    get,
    path = "/api/teacher/assignments",
    responses((status = 200, description = "Classes and subjects assigned to the caller")),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn get_my_assignments(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let teacher_id = auth_user.user_id()?;
    let classes = ClassService::classes_for_teacher(&state.db, teacher_id).await?;
    let subjects = SubjectService::subjects_for_teacher(&state.db, teacher_id).await?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "classes": classes,
            "subjects": subjects,
        }
    })))
}
