use axum::{
    Router,
    routing::{get, post, put},
};

use crate::modules::subjects::controller::{
    assign_subjects, create_subject, delete_subject, get_my_assignments, get_my_subjects,
    get_subjects, update_subject,
};
use crate::state::AppState;

pub fn init_admin_subjects_router() -> Router<AppState> {
    Router::new()
        .route("/subjects", get(get_subjects).post(create_subject))
        .route("/subjects/assign", post(assign_subjects))
        .route("/subjects/{id}", put(update_subject).delete(delete_subject))
}

pub fn init_teacher_subjects_router() -> Router<AppState> {
    Router::new()
        .route("/subjects", get(get_my_subjects))
        .route("/assignments", get(get_my_assignments))
}
