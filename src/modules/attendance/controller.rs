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
use crate::modules::attendance::day;
use crate::modules::attendance::model::{
    AttendanceRangeParams, BulkMarkDto, MarkAttendanceDto, WindowParams,
};
use crate::modules::attendance::service::{self, AttendanceService};
use crate::modules::classes::service::ClassService;
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::errors::AppError;

const DEFAULT_WINDOW_DAYS: i64 = 7;
const PARENT_WINDOW_DAYS: i64 = 30;
const PROGRESS_RECORD_LIMIT: i64 = 30;

#[utoipa::path(
    post,
    path = "/api/teacher/attendance",
    request_body = MarkAttendanceDto,
    responses(
        (status = 200, description = "Existing record for that day overwritten"),
        (status = 201, description = "New record created"),
        (status = 400, description = "Invalid date or status"),
        (status = 403, description = "Student is not in the caller's classes")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, dto))]
pub async fn mark_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(dto): Json<MarkAttendanceDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let teacher_id = auth_user.user_id()?;
    if !StudentService::student_in_teacher_classes(&state.db, dto.student_id, teacher_id).await? {
        return Err(AppError::forbidden("Student is not in your classes"));
    }

    let (attendance, created) = AttendanceService::mark(&state.db, teacher_id, dto).await?;

    let (code, message) = if created {
        (StatusCode::CREATED, "Attendance marked successfully")
    } else {
        (StatusCode::OK, "Attendance updated successfully")
    };

    Ok((
        code,
        Json(json!({
            "status": "success",
            "message": message,
            "data": { "attendance": attendance }
        })),
    ))
}

#[utoipa::path(
    post,
    path = "/api/teacher/attendance/bulk",
    request_body = BulkMarkDto,
    responses(
        (status = 200, description = "Batch applied; per-entry failures listed"),
        (status = 400, description = "Invalid date or empty batch"),
        (status = 403, description = "Class is not assigned to the caller")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, dto))]
pub async fn mark_bulk_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(dto): Json<BulkMarkDto>,
) -> Result<Json<Value>, AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let teacher_id = auth_user.user_id()?;
    ensure_teacher_class(&state, teacher_id, dto.class_id).await?;

    let outcome = AttendanceService::mark_bulk(&state.db, teacher_id, dto).await?;

    Ok(Json(json!({
        "status": "success",
        "message": format!("Attendance marked for {} students", outcome.applied),
        "data": { "result": outcome }
    })))
}

#[utoipa::path(
    get,
    path = "/api/teacher/attendance",
    params(
        ("classId" = Uuid, Query, description = "Class ID"),
        ("startDate" = Option<String>, Query, description = "Inclusive range start"),
        ("endDate" = Option<String>, Query, description = "Inclusive range end")
    ),
    responses(
        (status = 200, description = "Class attendance, newest day first"),
        (status = 403, description = "Class is not assigned to the caller")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_class_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<AttendanceRangeParams>,
) -> Result<Json<Value>, AppError> {
    let teacher_id = auth_user.user_id()?;
    ensure_teacher_class(&state, teacher_id, params.class_id).await?;

    let start = params
        .start_date
        .as_deref()
        .map(day::canonical_day)
        .transpose()?;
    let end = params
        .end_date
        .as_deref()
        .map(day::canonical_day)
        .transpose()?;

    let attendance = AttendanceService::by_class(&state.db, params.class_id, start, end).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "attendance": attendance }
    })))
}

#[utoipa::path(
    get,
    path = "/api/teacher/attendance/today",
    responses((status = 200, description = "Today's tallies across the caller's classes")),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_today_summary(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let classes = ClassService::classes_for_teacher(&state.db, auth_user.user_id()?).await?;
    let class_ids: Vec<Uuid> = classes.iter().map(|c| c.id).collect();

    let summary = AttendanceService::today_summary(&state.db, &class_ids).await?;

    Ok(Json(json!({
        "status": "success",
        "data": summary
    })))
}

#[utoipa::path(
    get,
    path = "/api/teacher/attendance/student/{student_id}",
    params(
        ("student_id" = Uuid, Path, description = "Student ID"),
        ("days" = Option<i64>, Query, description = "Window size in days, default 7")
    ),
    responses(
        (status = 200, description = "Window records and presence percentage"),
        (status = 403, description = "Student is not in the caller's classes")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_student_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(student_id): Path<Uuid>,
    Query(params): Query<WindowParams>,
) -> Result<Json<Value>, AppError> {
    let teacher_id = auth_user.user_id()?;
    if !StudentService::student_in_teacher_classes(&state.db, student_id, teacher_id).await? {
        return Err(AppError::forbidden("Student is not in your classes"));
    }

    let days = params.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    let (attendance, percentage) =
        AttendanceService::student_window(&state.db, student_id, days).await?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "attendance": attendance,
            "attendancePercentage": percentage,
        }
    })))
}

#[utoipa::path(
    get,
    path = "/api/parent/attendance/{student_id}",
    params(
        ("student_id" = Uuid, Path, description = "Student ID"),
        ("days" = Option<i64>, Query, description = "Window size in days, default 30")
    ),
    responses(
        (status = 200, description = "Window records and presence percentage"),
        (status = 403, description = "Student is not the caller's child")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_child_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(student_id): Path<Uuid>,
    Query(params): Query<WindowParams>,
) -> Result<Json<Value>, AppError> {
    ensure_parent_of(&state, auth_user.user_id()?, student_id).await?;

    let days = params.days.unwrap_or(PARENT_WINDOW_DAYS);
    let (attendance, percentage) =
        AttendanceService::student_window(&state.db, student_id, days).await?;
    let stats = service::status_tally(&attendance);

    Ok(Json(json!({
        "status": "success",
        "data": {
            "attendance": attendance,
            "attendancePercentage": percentage,
            "stats": stats,
        }
    })))
}

#[utoipa::path(
    get,
    path = "/api/parent/progress/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Recent attendance with presence percentage"),
        (status = 403, description = "Student is not the caller's child")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_child_progress(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    ensure_parent_of(&state, auth_user.user_id()?, student_id).await?;

    let records =
        AttendanceService::recent_for_student(&state.db, student_id, PROGRESS_RECORD_LIMIT)
            .await?;
    let percentage = service::presence_percentage(&records);

    Ok(Json(json!({
        "status": "success",
        "data": {
            "progress": {
                "attendancePercentage": percentage,
                "recordsConsidered": records.len(),
                "recentAttendance": records,
            }
        }
    })))
}

async fn ensure_teacher_class(
    state: &AppState,
    teacher_id: Uuid,
    class_id: Uuid,
) -> Result<(), AppError> {
    let classes = ClassService::classes_for_teacher(&state.db, teacher_id).await?;
    if !classes.iter().any(|c| c.id == class_id) {
        return Err(AppError::forbidden("Class is not assigned to you"));
    }
    Ok(())
}

async fn ensure_parent_of(
    state: &AppState,
    parent_id: Uuid,
    student_id: Uuid,
) -> Result<(), AppError> {
    if !StudentService::student_belongs_to_parent(&state.db, student_id, parent_id).await? {
        return Err(AppError::forbidden("Student is not linked to your account"));
    }
    Ok(())
}
