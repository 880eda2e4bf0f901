pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session workflow — one route per user event
        .route("/api/v1/session", get(handlers::handle_view))
        .route("/api/v1/session/login", post(handlers::handle_login))
        .route("/api/v1/session/intake", post(handlers::handle_intake))
        .route("/api/v1/session/previous", post(handlers::handle_previous))
        .route("/api/v1/session/next", post(handlers::handle_next))
        .route("/api/v1/session/finish", post(handlers::handle_finish))
        // Persistence — explicit user actions from Results
        .route(
            "/api/v1/session/save/snapshot",
            post(handlers::handle_save_snapshot),
        )
        .route("/api/v1/session/save/sql", post(handlers::handle_save_sql))
        // Document upload boundary
        .route("/api/v1/extract", post(handlers::handle_extract))
        .with_state(state)
}
