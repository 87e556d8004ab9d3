use classhive::config::jwt::JwtConfig;
use classhive::modules::users::model::UserRole;
use classhive::utils::jwt::{create_access_token, verify_token};
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let result = create_access_token(user_id, "test@example.com", UserRole::Teacher, &jwt_config);

    assert!(result.is_ok());
    let token = result.unwrap();
    assert!(!token.is_empty());
}

#[test]
fn test_create_access_token_all_roles() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    for role in [UserRole::Admin, UserRole::Teacher, UserRole::Parent] {
        let result = create_access_token(user_id, "test@example.com", role, &jwt_config);
        assert!(result.is_ok());
    }
}

#[test]
fn test_verify_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();
    let email = "test@example.com";

    let token = create_access_token(user_id, email, UserRole::Parent, &jwt_config).unwrap();
    let result = verify_token(&token, &jwt_config);

    assert!(result.is_ok());
    let claims = result.unwrap();
    assert_eq!(claims.email, email);
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.role, "parent");
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let other_config = JwtConfig {
        secret: "a_completely_different_secret".to_string(),
        access_token_expiry: 3600,
    };

    let token =
        create_access_token(Uuid::new_v4(), "test@example.com", UserRole::Admin, &jwt_config)
            .unwrap();

    assert!(verify_token(&token, &other_config).is_err());
}

#[test]
fn test_verify_token_garbage() {
    let jwt_config = get_test_jwt_config();

    assert!(verify_token("not.a.token", &jwt_config).is_err());
    assert!(verify_token("", &jwt_config).is_err());
}

#[test]
fn test_tampered_token_is_rejected() {
    let jwt_config = get_test_jwt_config();

    let token =
        create_access_token(Uuid::new_v4(), "test@example.com", UserRole::Admin, &jwt_config)
            .unwrap();
    let mut tampered = token.clone();
    tampered.pop();

    assert!(verify_token(&tampered, &jwt_config).is_err());
}
