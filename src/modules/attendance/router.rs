use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::attendance::controller::{
    get_child_attendance, get_child_progress, get_class_attendance, get_student_attendance,
    get_today_summary, mark_attendance, mark_bulk_attendance,
};
use crate::state::AppState;

pub fn init_teacher_attendance_router() -> Router<AppState> {
    Router::new()
        .route(
            "/attendance",
            get(get_class_attendance).post(mark_attendance),
        )
        .route("/attendance/bulk", post(mark_bulk_attendance))
        .route("/attendance/today", get(get_today_summary))
        .route("/attendance/student/{student_id}", get(get_student_attendance))
}

pub fn init_parent_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/attendance/{student_id}", get(get_child_attendance))
        .route("/progress/{student_id}", get(get_child_progress))
}
