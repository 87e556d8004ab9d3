use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::{Value, json};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::attendance::day;
use crate::modules::attendance::service::AttendanceService;
use crate::modules::classes::service::ClassService;
use crate::modules::fees::service::FeeService;
use crate::modules::reports::model::{AttendanceReportParams, FeeReportParams};
use crate::modules::reports::service::ReportService;
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[utoipa::path(
    get,
    path = "/api/admin/reports/dashboard",
    responses((status = 200, description = "Headcounts and today's presence percentage")),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let counts = ReportService::dashboard_counts(&state.db).await?;
    let today_presence = ReportService::today_presence(&state.db).await?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "counts": counts,
            "todayPresence": today_presence,
        }
    })))
}

#[utoipa::path(
    get,
    path = "/api/teacher/dashboard",
    responses((status = 200, description = "Caller's classes, roster size, and today's tallies")),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn get_teacher_dashboard(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let teacher_id = auth_user.user_id()?;

    let classes = ClassService::classes_for_teacher(&state.db, teacher_id).await?;
    let class_ids: Vec<Uuid> = classes.iter().map(|c| c.id).collect();

    let total_students =
        StudentService::count_active_students_in_classes(&state.db, &class_ids).await?;
    let today_attendance = AttendanceService::today_summary(&state.db, &class_ids).await?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "classes": classes,
            "totalStudents": total_students,
            "todayAttendance": today_attendance,
        }
    })))
}

#[utoipa::path(
    get,
    path = "/api/parent/dashboard",
    responses((status = 200, description = "Children, month attendance summary, pending fees")),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn get_parent_dashboard(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let children = StudentService::children_of_parent(&state.db, auth_user.user_id()?).await?;
    let student_ids: Vec<Uuid> = children.iter().map(|s| s.id).collect();

    let attendance_summary =
        ReportService::month_attendance_by_student(&state.db, &student_ids).await?;
    let pending_fees = FeeService::pending_for_students(&state.db, &student_ids).await?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "children": children,
            "attendanceSummary": attendance_summary,
            "pendingFees": pending_fees,
        }
    })))
}

#[utoipa::path(
    get,
    path = "/api/admin/reports/attendance",
    params(
        ("classId" = Option<Uuid>, Query, description = "Filter by class"),
        ("startDate" = Option<String>, Query, description = "Inclusive range start"),
        ("endDate" = Option<String>, Query, description = "Inclusive range end")
    ),
    responses((status = 200, description = "Per-class attendance tallies")),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn get_attendance_report(
    State(state): State<AppState>,
    Query(params): Query<AttendanceReportParams>,
) -> Result<Json<Value>, AppError> {
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

    let report =
        ReportService::attendance_by_class(&state.db, params.class_id, start, end).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "report": report }
    })))
}

#[utoipa::path(
    get,
    path = "/api/admin/reports/fees",
    params(("academicYear" = Option<String>, Query, description = "Filter by academic year")),
    responses((status = 200, description = "Billed versus collected amounts per fee status")),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn get_fee_report(
    State(state): State<AppState>,
    Query(params): Query<FeeReportParams>,
) -> Result<Json<Value>, AppError> {
    let report = ReportService::fees_by_status(&state.db, params.academic_year).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "report": report }
    })))
}
