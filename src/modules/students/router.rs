use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::students::controller::{
    create_student, delete_student, get_children, get_student_details, get_students,
    get_students_by_class, update_student,
};
use crate::state::AppState;

pub fn init_admin_students_router() -> Router<AppState> {
    Router::new()
        .route("/students", get(get_students).post(create_student))
        .route("/students/{id}", put(update_student).delete(delete_student))
}

pub fn init_teacher_students_router() -> Router<AppState> {
    Router::new()
        .route("/students/{class_id}", get(get_students_by_class))
        .route("/student/{id}", get(get_student_details))
}

pub fn init_parent_students_router() -> Router<AppState> {
    Router::new().route("/children", get(get_children))
}
