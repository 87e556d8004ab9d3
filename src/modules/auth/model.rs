use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::users::model::{User, UserRole};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub role: UserRole,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_requires_valid_email() {
        let req = LoginRequest {
            email: "nope".to_string(),
            password: "pw".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn register_request_enforces_password_length() {
        let req = RegisterRequest {
            email: "a@b.test".to_string(),
            password: "short".to_string(),
            role: UserRole::Parent,
            name: "A".to_string(),
            phone: "1".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
