use classhive::middleware::role::parse_role;
use classhive::modules::users::model::UserRole;

#[test]
fn test_parse_known_roles() {
    assert_eq!(parse_role("admin").unwrap(), UserRole::Admin);
    assert_eq!(parse_role("teacher").unwrap(), UserRole::Teacher);
    assert_eq!(parse_role("parent").unwrap(), UserRole::Parent);
}

#[test]
fn test_parse_unknown_role_fails() {
    assert!(parse_role("student").is_err());
    assert!(parse_role("").is_err());
    assert!(parse_role("Admin").is_err());
}

#[test]
fn test_role_as_str_round_trip() {
    for role in [UserRole::Admin, UserRole::Teacher, UserRole::Parent] {
        assert_eq!(parse_role(role.as_str()).unwrap(), role);
    }
}
