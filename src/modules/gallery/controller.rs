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
use crate::modules::gallery::model::{CreateGalleryItemDto, GalleryFilterParams};
use crate::modules::gallery::service::GalleryService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

const GALLERY_PAGE_SIZE: i64 = 20;

#[utoipa::path(
    post,
    path = "/api/admin/gallery",
    request_body = CreateGalleryItemDto,
    responses(
        (status = 201, description = "Gallery item created"),
        (status = 400, description = "Invalid media type or category")
    ),
    security(("bearer_auth" = [])),
    tag = "Gallery"
)]
#[instrument(skip(state, dto))]
pub async fn create_gallery_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(dto): Json<CreateGalleryItemDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    dto.validate()
        .map_err(|e| AppError::bad_request(format!("Validation failed: {}", e)))?;

    let item = GalleryService::create_item(&state.db, auth_user.user_id()?, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Gallery item created successfully",
            "data": { "item": item }
        })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/gallery/{id}",
    params(("id" = Uuid, Path, description = "Gallery item ID")),
    responses(
        (status = 200, description = "Gallery item deleted"),
        (status = 404, description = "Gallery item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Gallery"
)]
#[instrument(skip(state))]
pub async fn delete_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    GalleryService::delete_item(&state.db, id).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Gallery item deleted successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/parent/gallery",
    params(
        ("mediaType" = Option<String>, Query, description = "photo or video"),
        ("category" = Option<String>, Query, description = "Filter by category")
    ),
    responses((status = 200, description = "Public gallery items, newest first")),
    security(("bearer_auth" = [])),
    tag = "Gallery"
)]
#[instrument(skip(state))]
pub async fn get_gallery(
    State(state): State<AppState>,
    Query(params): Query<GalleryFilterParams>,
) -> Result<Json<Value>, AppError> {
    let page = params.pagination.page();
    let limit = params.pagination.limit_or(GALLERY_PAGE_SIZE);
    let offset = (page - 1) * limit;

    let (items, total) = GalleryService::list_public(
        &state.db,
        params.media_type,
        params.category,
        limit,
        offset,
    )
    .await?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "items": items,
            "meta": PaginationMeta::new(total, page, limit),
        }
    })))
}
