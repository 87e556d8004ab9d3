use axum::{
    Router,
    routing::{delete, get},
};

use crate::modules::timetable::controller::{
    create_timetable_entry, delete_timetable_entry, get_timetable,
};
use crate::state::AppState;

pub fn init_admin_timetable_router() -> Router<AppState> {
    Router::new()
        .route("/timetable", get(get_timetable).post(create_timetable_entry))
        .route("/timetable/{id}", delete(delete_timetable_entry))
}
