use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::role::{require_admin, require_parent, require_teacher};
use crate::modules::attendance::router::{
    init_parent_attendance_router, init_teacher_attendance_router,
};
use crate::modules::auth::router::init_auth_router;
use crate::modules::classes::router::{init_admin_classes_router, init_teacher_classes_router};
use crate::modules::fees::router::{
    init_admin_fees_router, init_parent_fees_router, init_teacher_fees_router,
};
use crate::modules::gallery::router::{init_admin_gallery_router, init_parent_gallery_router};
use crate::modules::reports::router::{
    init_admin_reports_router, init_parent_reports_router, init_teacher_reports_router,
};
use crate::modules::students::router::{
    init_admin_students_router, init_parent_students_router, init_teacher_students_router,
};
use crate::modules::subjects::router::{
    init_admin_subjects_router, init_teacher_subjects_router,
};
use crate::modules::timetable::router::init_admin_timetable_router;
use crate::modules::users::router::init_admin_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let admin = init_admin_users_router()
        .merge(init_admin_students_router())
        .merge(init_admin_classes_router())
        .merge(init_admin_subjects_router())
        .merge(init_admin_fees_router())
        .merge(init_admin_timetable_router())
        .merge(init_admin_gallery_router())
        .merge(init_admin_reports_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let teacher = init_teacher_classes_router()
        .merge(init_teacher_subjects_router())
        .merge(init_teacher_students_router())
        .merge(init_teacher_attendance_router())
        .merge(init_teacher_fees_router())
        .merge(init_teacher_reports_router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_teacher,
        ));

    let parent = init_parent_students_router()
        .merge(init_parent_attendance_router())
        .merge(init_parent_fees_router())
        .merge(init_parent_gallery_router())
        .merge(init_parent_reports_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_parent));

    Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/admin", admin)
                .nest("/teacher", teacher)
                .nest("/parent", parent),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
