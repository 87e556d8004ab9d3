use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::fees::controller::{
    create_fee, get_child_fees, get_fees, get_student_fees, pay_fee, update_fee_status,
};
use crate::state::AppState;

pub fn init_admin_fees_router() -> Router<AppState> {
    Router::new().route("/fees", get(get_fees).post(create_fee))
}

pub fn init_teacher_fees_router() -> Router<AppState> {
    // GET reads by student id, PUT corrects by fee id. One route keeps the
    // path parameter name consistent for axum.
    Router::new().route("/fees/{id}", get(get_student_fees).put(update_fee_status))
}

pub fn init_parent_fees_router() -> Router<AppState> {
    Router::new()
        .route("/fees/pay", post(pay_fee))
        .route("/fees/{student_id}", get(get_child_fees))
}
