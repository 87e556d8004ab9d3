//! User entity and DTOs for the identity store.
//!
//! Every authenticated caller is a [`User`] with one of three roles:
//! admin (full management), teacher (class-scoped operations), or
//! parent (child-scoped reads).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::PaginationParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Teacher,
    Parent,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Teacher => "teacher",
            UserRole::Parent => "parent",
        }
    }
}

/// A user record. The password hash never leaves the service layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub name: String,
    pub phone: String,
    pub avatar: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub role: UserRole,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub phone: String,
    pub avatar: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub address: Option<String>,
    #[validate(length(min = 6))]
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserFilterParams {
    /// Filter by role slug (`admin`, `teacher`, `parent`).
    pub role: Option<String>,
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&UserRole::Teacher).unwrap(),
            "\"teacher\""
        );
        assert_eq!(
            serde_json::to_string(&UserRole::Parent).unwrap(),
            "\"parent\""
        );
    }

    #[test]
    fn create_user_dto_validation() {
        let dto = CreateUserDto {
            email: "not-an-email".to_string(),
            password: "secret123".to_string(),
            role: UserRole::Teacher,
            name: "Jane Doe".to_string(),
            phone: "5551234".to_string(),
            avatar: None,
            address: None,
        };
        assert!(dto.validate().is_err());

        let dto = CreateUserDto {
            email: "jane@school.test".to_string(),
            ..dto
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn create_user_dto_accepts_camel_case() {
        let json = r#"{"email":"a@b.test","password":"secret1","role":"parent","name":"A","phone":"1","isActive":true}"#;
        let dto: CreateUserDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.role, UserRole::Parent);
    }
}
