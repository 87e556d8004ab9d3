use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::modules::timetable::model::{CreateTimetableEntryDto, TimetableFilterParams};
use crate::modules::timetable::service::TimetableService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[utoipa::path(
    get,
    path = "/api/admin/timetable",
    params(
        ("classId" = Option<Uuid>, Query, description = "Filter by class"),
        ("dayOfWeek" = Option<String>, Query, description = "Filter by weekday")
    ),
    responses((status = 200, description = "Timetable slots with subject and teacher names")),
    security(("bearer_auth" = [])),
    tag = "Timetable"
)]
#[instrument(skip(state))]
pub async fn get_timetable(
    State(state): State<AppState>,
    Query(params): Query<TimetableFilterParams>,
) -> Result<Json<Value>, AppError> {
    let slots =
        TimetableService::list_slots(&state.db, params.class_id, params.day_of_week).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "timetable": slots }
    })))
}

#[utoipa::path(
    post,
    path = "/api/admin/timetable",
    request_body = CreateTimetableEntryDto,
    responses(
        (status = 201, description = "Timetable entry created"),
        (status = 400, description = "Invalid day of week"),
        (status = 404, description = "Class, subject, or teacher not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Timetable"
)]
#[instrument(skip(state, dto))]
pub async fn create_timetable_entry(
    State(state): State<AppState>,
    Json(dto): Json<CreateTimetableEntryDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let entry = TimetableService::create_entry(&state.db, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Timetable entry created successfully",
            "data": { "entry": entry }
        })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/timetable/{id}",
    params(("id" = Uuid, Path, description = "Timetable entry ID")),
    responses(
        (status = 200, description = "Timetable entry deleted"),
        (status = 404, description = "Timetable entry not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Timetable"
)]
#[instrument(skip(state))]
pub async fn delete_timetable_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    TimetableService::delete_entry(&state.db, id).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Timetable entry deleted successfully"
    })))
}
