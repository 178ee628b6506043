use crate::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Routes for the user resource and the subjects nested under it.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route(
            "/users/{id}/subjects",
            get(handlers::list_user_subjects)
                .post(handlers::create_subject)
                .delete(handlers::delete_subject_by_name),
        )
        .route(
            "/users/{id}/subjects/{subject_id}",
            get(handlers::get_subject)
                .put(handlers::update_subject)
                .delete(handlers::delete_subject),
        )
}

/// Builds the full application router.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/welcome", get(handlers::welcome_handler))
        // Only POST is routed, anything else is a 405
        .route("/api/users", post(handlers::register_user))
        .route("/subjects", get(handlers::list_subjects))
        .merge(user_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
