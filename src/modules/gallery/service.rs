use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::gallery::model::{
    CATEGORIES, CreateGalleryItemDto, GalleryItem, MEDIA_TYPES,
};
use crate::utils::errors::AppError;

pub struct GalleryService;

impl GalleryService {
    #[instrument(skip(db, dto))]
    pub async fn create_item(
        db: &PgPool,
        uploaded_by: Uuid,
        dto: CreateGalleryItemDto,
    ) -> Result<GalleryItem, AppError> {
        if !MEDIA_TYPES.contains(&dto.media_type.as_str()) {
            return Err(AppError::bad_request(format!(
                "Invalid media type '{}'",
                dto.media_type
            )));
        }
        if let Some(category) = &dto.category {
            if !CATEGORIES.contains(&category.as_str()) {
                return Err(AppError::bad_request(format!(
                    "Invalid category '{}'",
                    category
                )));
            }
        }

        sqlx::query_as::<_, GalleryItem>(
            "INSERT INTO gallery
                 (title, description, media_type, url, thumbnail, category, uploaded_by, is_public)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'general'), $7, COALESCE($8, TRUE))
             RETURNING *",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.media_type)
        .bind(&dto.url)
        .bind(&dto.thumbnail)
        .bind(&dto.category)
        .bind(uploaded_by)
        .bind(dto.is_public)
        .fetch_one(db)
        .await
        .context("Failed to create gallery item")
        .map_err(AppError::database)
    }

    /// Public items only, newest upload first.
    #[instrument(skip(db))]
    pub async fn list_public(
        db: &PgPool,
        media_type: Option<String>,
        category: Option<String>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<GalleryItem>, i64), AppError> {
        let items = sqlx::query_as::<_, GalleryItem>(
            "SELECT * FROM gallery
             WHERE is_public
               AND ($1::text IS NULL OR media_type = $1)
               AND ($2::text IS NULL OR category = $2)
             ORDER BY upload_date DESC
             LIMIT $3 OFFSET $4",
        )
        .bind(&media_type)
        .bind(&category)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .context("Failed to fetch gallery items")
        .map_err(AppError::database)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM gallery
             WHERE is_public
               AND ($1::text IS NULL OR media_type = $1)
               AND ($2::text IS NULL OR category = $2)",
        )
        .bind(&media_type)
        .bind(&category)
        .fetch_one(db)
        .await
        .context("Failed to count gallery items")
        .map_err(AppError::database)?;

        Ok((items, total))
    }

    #[instrument(skip(db))]
    pub async fn delete_item(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM gallery WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete gallery item")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Gallery item not found"));
        }

        Ok(())
    }
}
