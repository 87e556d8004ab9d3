use axum::{Router, routing::get};

use crate::modules::reports::controller::{
    get_attendance_report, get_dashboard, get_fee_report, get_parent_dashboard,
    get_teacher_dashboard,
};
use crate::state::AppState;

pub fn init_admin_reports_router() -> Router<AppState> {
    Router::new()
        .route("/reports/dashboard", get(get_dashboard))
        .route("/reports/attendance", get(get_attendance_report))
        .route("/reports/fees", get(get_fee_report))
}

pub fn init_teacher_reports_router() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_teacher_dashboard))
}

pub fn init_parent_reports_router() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_parent_dashboard))
}
