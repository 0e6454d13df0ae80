use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::sessions;
use super::state::AppState;

/// Builds the HTTP router over the session façade
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .route("/session", post(sessions::post_session))
        .route(
            "/session/",
            get(sessions::missing_session_id).delete(sessions::missing_session_id),
        )
        .route(
            "/session/{session_id}",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
