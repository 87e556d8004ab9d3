use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: Uuid,
    pub class_name: String,
    pub section: String,
    pub class_teacher: Option<Uuid>,
    pub capacity: i32,
    pub academic_year: String,
    pub room: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Class joined with its teacher's name/email for admin listings.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassWithTeacher {
    pub id: Uuid,
    pub class_name: String,
    pub section: String,
    pub class_teacher: Option<Uuid>,
    pub teacher_name: Option<String>,
    pub teacher_email: Option<String>,
    pub capacity: i32,
    pub academic_year: String,
    pub room: Option<String>,
    pub is_active: bool,
}

/// Subject reference attached to class listings.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRef {
    #[serde(skip)]
    pub class_id: Uuid,
    pub id: Uuid,
    pub name: String,
    pub code: String,
}

/// Admin-facing aggregate: class, its teacher, and its subjects.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassWithSubjects {
    #[serde(flatten)]
    pub class: ClassWithTeacher,
    pub subjects: Vec<SubjectRef>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassDto {
    #[validate(length(min = 1))]
    pub class_name: String,
    #[validate(length(min = 1))]
    pub section: String,
    pub class_teacher: Option<Uuid>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    #[validate(length(min = 1))]
    pub academic_year: String,
    pub room: Option<String>,
    #[serde(default)]
    pub subject_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassDto {
    #[validate(length(min = 1))]
    pub class_name: Option<String>,
    #[validate(length(min = 1))]
    pub section: Option<String>,
    pub class_teacher: Option<Uuid>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    pub room: Option<String>,
    pub is_active: Option<bool>,
    /// When present, replaces the class's subject links.
    pub subject_ids: Option<Vec<Uuid>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_class_dto_defaults_subject_ids() {
        let json = r#"{"className":"Grade 5","section":"A","academicYear":"2025-2026"}"#;
        let dto: CreateClassDto = serde_json::from_str(json).unwrap();
        assert!(dto.subject_ids.is_empty());
        assert!(dto.capacity.is_none());
    }

    #[test]
    fn capacity_must_be_positive() {
        let dto = CreateClassDto {
            class_name: "Grade 5".into(),
            section: "A".into(),
            class_teacher: None,
            capacity: Some(0),
            academic_year: "2025-2026".into(),
            room: None,
            subject_ids: vec![],
        };
        assert!(dto.validate().is_err());
    }
}
