use alumnet_core::AppError;
use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{delete, get, post, put};
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::state::AppState;
use crate::{auth, handlers, middleware};

mod cors;

use cors::build_cors_layer;

pub fn build_router<S>(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<S>,
) -> Result<Router, AppError>
where
    S: SessionStore + Clone,
{
    let cors_layer = build_cors_layer(frontend_url)?;

    let authenticated_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route(
            "/api/employment",
            get(handlers::employment::list_employment_handler)
                .post(handlers::employment::create_employment_handler),
        )
        .route(
            "/api/employment/trash",
            get(handlers::employment::list_employment_trash_handler),
        )
        .route(
            "/api/employment/alumni/{alumni_id}",
            get(handlers::employment::list_alumni_employment_handler),
        )
        .route(
            "/api/employment/{record_id}",
            get(handlers::employment::get_employment_handler)
                .put(handlers::employment::update_employment_handler)
                .delete(handlers::employment::soft_delete_employment_handler),
        )
        .route(
            "/api/employment/{record_id}/restore",
            put(handlers::employment::restore_employment_handler),
        )
        .route(
            "/api/employment/{record_id}/permanent",
            delete(handlers::employment::hard_delete_employment_handler),
        )
        .route_layer(from_fn(middleware::require_auth));

    let admin_routes = Router::new()
        .route(
            "/api/alumni",
            get(handlers::alumni::list_alumni_handler)
                .post(handlers::alumni::create_alumni_handler),
        )
        .route(
            "/api/alumni/trash",
            get(handlers::alumni::list_alumni_trash_handler),
        )
        .route(
            "/api/alumni/{alumni_id}",
            get(handlers::alumni::get_alumni_handler)
                .put(handlers::alumni::update_alumni_handler)
                .delete(handlers::alumni::soft_delete_alumni_handler),
        )
        .route(
            "/api/alumni/{alumni_id}/restore",
            put(handlers::alumni::restore_alumni_handler),
        )
        .route(
            "/api/alumni/{alumni_id}/permanent",
            delete(handlers::alumni::hard_delete_alumni_handler),
        )
        .route(
            "/api/reports/employment-status",
            get(handlers::reports::employment_status_report_handler),
        )
        .route_layer(from_fn(middleware::require_admin))
        .route_layer(from_fn(middleware::require_auth));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/session", post(auth::issue_session_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .merge(authenticated_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state))
}
