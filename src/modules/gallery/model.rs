use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::PaginationParams;

pub const MEDIA_TYPES: &[&str] = &["photo", "video"];
pub const CATEGORIES: &[&str] = &["event", "sports", "academic", "cultural", "general"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub media_type: String,
    pub url: String,
    pub thumbnail: Option<String>,
    pub category: String,
    pub uploaded_by: Uuid,
    pub is_public: bool,
    pub upload_date: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryItemDto {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub media_type: String,
    #[validate(url)]
    pub url: String,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryFilterParams {
    pub media_type: Option<String>,
    pub category: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_dto_requires_valid_url() {
        let dto = CreateGalleryItemDto {
            title: "Sports day".into(),
            description: None,
            media_type: "photo".into(),
            url: "not a url".into(),
            thumbnail: None,
            category: None,
            is_public: None,
        };
        assert!(dto.validate().is_err());
    }
}
