use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{login, logout, me, register, update_profile};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/profile", put(update_profile))
        .route("/logout", post(logout))
}
