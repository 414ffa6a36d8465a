//! API Routes
//!
//! Configures the Axum router with all pastebin endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_handler, delete_handler, get_handler, health_handler, index_handler, list_handler,
    recent_handler, update_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin, method and header
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // `/pastes/recent` is a static segment and takes priority over `:id`
    Router::new()
        .route("/", get(index_handler))
        .route("/pastes", get(list_handler).post(create_handler))
        .route("/pastes/recent", get(recent_handler))
        .route(
            "/pastes/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
