use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::auth::AuthUser;
use crate::modules::classes::service::ClassService;
use crate::modules::students::model::{CreateStudentDto, StudentFilterParams, UpdateStudentDto};
use crate::modules::students::service::StudentService;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

#[utoipa::path(
    get,
    path = "/api/admin/students",
    params(("classId" = Option<Uuid>, Query, description = "Filter by class")),
    responses((status = 200, description = "Paginated list of students")),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    Query(params): Query<StudentFilterParams>,
) -> Result<Json<Value>, AppError> {
    let page = params.pagination.page();
    let limit = params.pagination.limit();
    let offset = params.pagination.offset();

    let (students, total) =
        StudentService::list_students(&state.db, params.class_id, params.is_active, limit, offset)
            .await?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "students": students,
            "meta": PaginationMeta::new(total, page, limit),
        }
    })))
}

#[utoipa::path(
    post,
    path = "/api/admin/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created"),
        (status = 400, description = "Validation error or duplicate roll/admission number")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    Json(dto): Json<CreateStudentDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let student = StudentService::create_student(&state.db, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Student created successfully",
            "data": { "student": student }
        })),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated"),
        (status = 404, description = "Student not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateStudentDto>,
) -> Result<Json<Value>, AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let student = StudentService::update_student(&state.db, id, dto).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Student updated successfully",
        "data": { "student": student }
    })))
}

#[utoipa::path(
    delete,
    path = "/api/admin/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 404, description = "Student not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    StudentService::delete_student(&state.db, id).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Student deleted successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/teacher/students/{class_id}",
    params(("class_id" = Uuid, Path, description = "Class ID")),
    responses((status = 200, description = "Active roster with parent contact info")),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students_by_class(
    State(state): State<AppState>,
    Path(class_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let students = StudentService::get_class_roster(&state.db, class_id).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "students": students }
    })))
}

#[utoipa::path(
    get,
    path = "/api/teacher/student/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student with class and parent details"),
        (status = 404, description = "Student not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    let class = ClassService::get_class(&state.db, student.class_id).await?;
    let parent = match student.parent_id {
        Some(parent_id) => Some(UserService::get_user(&state.db, parent_id).await?),
        None => None,
    };

    Ok(Json(json!({
        "status": "success",
        "data": {
            "student": student,
            "class": class,
            "parent": parent,
        }
    })))
}

#[utoipa::path(
    get,
    path = "/api/parent/children",
    responses((status = 200, description = "The caller's active children")),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_children(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let students = StudentService::children_of_parent(&state.db, auth_user.user_id()?).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "students": students }
    })))
}
