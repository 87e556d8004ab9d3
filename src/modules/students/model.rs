use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::PaginationParams;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub roll_number: String,
    pub parent_id: Option<Uuid>,
    pub class_id: Uuid,
    pub admission_number: String,
    pub admission_date: NaiveDate,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Student joined with class identification, for parent and admin listings.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentWithClass {
    pub id: Uuid,
    pub name: String,
    pub roll_number: String,
    pub parent_id: Option<Uuid>,
    pub class_id: Uuid,
    pub class_name: String,
    pub section: String,
    pub admission_number: String,
    pub is_active: bool,
}

/// Student joined with parent contact details, for teacher class rosters.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentWithParent {
    pub id: Uuid,
    pub name: String,
    pub roll_number: String,
    pub class_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_email: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub roll_number: String,
    pub parent_id: Option<Uuid>,
    pub class_id: Uuid,
    #[validate(length(min = 1))]
    pub admission_number: String,
    pub admission_date: Option<NaiveDate>,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub parent_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentFilterParams {
    pub class_id: Option<Uuid>,
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

pub const GENDERS: &[&str] = &["male", "female", "other"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_student_dto_deserializes_camel_case() {
        let json = r#"{
            "name": "Asha Rao",
            "rollNumber": "10A-07",
            "classId": "00000000-0000-0000-0000-000000000001",
            "admissionNumber": "ADM-2025-07",
            "dateOfBirth": "2014-03-12",
            "gender": "female"
        }"#;
        let dto: CreateStudentDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.roll_number, "10A-07");
        assert!(dto.parent_id.is_none());
        assert!(dto.admission_date.is_none());
    }

    #[test]
    fn student_serializes_camel_case() {
        let student = Student {
            id: Uuid::nil(),
            name: "A".into(),
            roll_number: "1".into(),
            parent_id: None,
            class_id: Uuid::nil(),
            admission_number: "ADM-1".into(),
            admission_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            date_of_birth: NaiveDate::from_ymd_opt(2014, 1, 1).unwrap(),
            gender: "male".into(),
            address: None,
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&student).unwrap();
        assert!(json.contains("\"rollNumber\""));
        assert!(json.contains("\"admissionNumber\""));
        assert!(json.contains("\"isActive\""));
    }
}
