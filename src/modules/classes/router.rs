use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::classes::controller::{
    create_class, delete_class, get_classes, get_my_classes, update_class,
};
use crate::state::AppState;

pub fn init_admin_classes_router() -> Router<AppState> {
    Router::new()
        .route("/classes", get(get_classes).post(create_class))
        .route("/classes/{id}", put(update_class).delete(delete_class))
}

pub fn init_teacher_classes_router() -> Router<AppState> {
    Router::new().route("/classes", get(get_my_classes))
}
