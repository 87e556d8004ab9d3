use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Subject kinds accepted by the schema CHECK constraint.
pub const SUBJECT_KINDS: &[&str] = &["core", "elective", "practical", "activity"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub kind: String,
    pub credits: i32,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectDto {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub code: String,
    pub description: Option<String>,
    pub kind: Option<String>,
    #[validate(range(min = 1))]
    pub credits: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubjectDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<String>,
    #[validate(range(min = 1))]
    pub credits: Option<i32>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_subject_dto_accepts_camel_case() {
        let json = r#"{"name":"Mathematics","code":"MATH-5","kind":"core"}"#;
        let dto: CreateSubjectDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.code, "MATH-5");
        assert!(dto.credits.is_none());
    }

    #[test]
    fn kinds_match_schema_constraint() {
        assert!(SUBJECT_KINDS.contains(&"elective"));
        assert!(!SUBJECT_KINDS.contains(&"optional"));
    }
}
