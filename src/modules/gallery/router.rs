use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::modules::gallery::controller::{
    create_gallery_item, delete_gallery_item, get_gallery,
};
use crate::state::AppState;

pub fn init_admin_gallery_router() -> Router<AppState> {
    Router::new()
        .route("/gallery", post(create_gallery_item))
        .route("/gallery/{id}", delete(delete_gallery_item))
}

pub fn init_parent_gallery_router() -> Router<AppState> {
    Router::new().route("/gallery", get(get_gallery))
}
