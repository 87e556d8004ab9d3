use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::users::controller::{create_user, delete_user, get_users, update_user};
use crate::state::AppState;

pub fn init_admin_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(get_users).post(create_user))
        .route("/users/{id}", put(update_user).delete(delete_user))
}
