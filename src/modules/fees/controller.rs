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
use crate::modules::fees::model::{CreateFeeDto, FeeFilterParams, PayFeeDto, UpdateFeeStatusDto};
use crate::modules::fees::service::{self, FeeService};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[utoipa::path(
    get,
    path = "/api/admin/fees",
    params(
        ("studentId" = Option<Uuid>, Query, description = "Filter by student"),
        ("status" = Option<String>, Query, description = "Filter by status")
    ),
    responses((status = 200, description = "Fee records matching the filters")),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn get_fees(
    State(state): State<AppState>,
    Query(params): Query<FeeFilterParams>,
) -> Result<Json<Value>, AppError> {
    let fees = FeeService::list_fees(
        &state.db,
        params.student_id,
        params.status,
        params.academic_year,
    )
    .await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "fees": fees }
    })))
}

#[utoipa::path(
    post,
    path = "/api/admin/fees",
    request_body = CreateFeeDto,
    responses(
        (status = 201, description = "Fee record created"),
        (status = 404, description = "Student not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
#[instrument(skip(state, dto))]
pub async fn create_fee(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(dto): Json<CreateFeeDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let fee = FeeService::create_fee(&state.db, auth_user.user_id()?, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Fee record created successfully",
            "data": { "fee": fee }
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/teacher/fees/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Fee records for the student"),
        (status = 403, description = "Student is not in the caller's classes")
    ),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn get_student_fees(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let teacher_id = auth_user.user_id()?;
    if !StudentService::student_in_teacher_classes(&state.db, id, teacher_id).await? {
        return Err(AppError::forbidden("Student is not in your classes"));
    }

    let fees = FeeService::fees_for_student(&state.db, id).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "fees": fees }
    })))
}

#[utoipa::path(
    put,
    path = "/api/teacher/fees/{id}",
    params(("id" = Uuid, Path, description = "Fee ID")),
    request_body = UpdateFeeStatusDto,
    responses(
        (status = 200, description = "Fee status updated"),
        (status = 400, description = "Invalid status or payment method"),
        (status = 404, description = "Fee record not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
#[instrument(skip(state, dto))]
pub async fn update_fee_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateFeeStatusDto>,
) -> Result<Json<Value>, AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let fee = FeeService::update_fee_status(&state.db, auth_user.user_id()?, id, dto).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Fee status updated successfully",
        "data": { "fee": fee }
    })))
}

#[utoipa::path(
    get,
    path = "/api/parent/fees/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Fee records for the caller's child"),
        (status = 403, description = "Student is not the caller's child")
    ),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn get_child_fees(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let parent_id = auth_user.user_id()?;
    if !StudentService::student_belongs_to_parent(&state.db, student_id, parent_id).await? {
        return Err(AppError::forbidden("Student is not linked to your account"));
    }

    let fees = FeeService::fees_for_student(&state.db, student_id).await?;
    let summary = service::status_summary(&fees);

    Ok(Json(json!({
        "status": "success",
        "data": {
            "fees": fees,
            "summary": summary,
        }
    })))
}

#[utoipa::path(
    post,
    path = "/api/parent/fees/pay",
    request_body = PayFeeDto,
    responses(
        (status = 200, description = "Payment recorded, receipt issued"),
        (status = 400, description = "Invalid amount, method, or already paid"),
        (status = 403, description = "Fee is not for the caller's child")
    ),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
#[instrument(skip(state, dto))]
pub async fn pay_fee(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(dto): Json<PayFeeDto>,
) -> Result<Json<Value>, AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let fee = FeeService::pay_fee(&state.db, auth_user.user_id()?, dto).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Payment recorded successfully",
        "data": { "fee": fee }
    })))
}
