//! Role-based authorization layers.
//!
//! Each role-scoped route group (`/api/admin`, `/api/teacher`, `/api/parent`)
//! is wrapped in one of these middlewares via
//! `axum::middleware::from_fn_with_state`. The role comes from the verified
//! token claims; no database round-trip is needed.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &[UserRole],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    let user_role = parse_role(&auth_user.0.role)?;

    if !allowed_roles.contains(&user_role) {
        return Err(AppError::forbidden(format!(
            "Access denied. Required roles: {:?}, but user has role: {:?}",
            allowed_roles, user_role
        )));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[UserRole::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[UserRole::Teacher]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_parent(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[UserRole::Parent]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Parse a role claim string into a [`UserRole`].
pub fn parse_role(role_str: &str) -> Result<UserRole, AppError> {
    match role_str {
        "admin" => Ok(UserRole::Admin),
        "teacher" => Ok(UserRole::Teacher),
        "parent" => Ok(UserRole::Parent),
        _ => Err(AppError::unauthorized(format!(
            "Invalid role: {}",
            role_str
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_roles() {
        assert!(matches!(parse_role("admin"), Ok(UserRole::Admin)));
        assert!(matches!(parse_role("teacher"), Ok(UserRole::Teacher)));
        assert!(matches!(parse_role("parent"), Ok(UserRole::Parent)));
    }

    #[test]
    fn parse_unknown_role_is_rejected() {
        assert!(parse_role("student").is_err());
        assert!(parse_role("").is_err());
    }
}
