//! Axum router configuration with middleware.
//!
//! Paths keep their trailing slashes, matching existing clients.
//! Middleware: CORS, request tracing.

use axum::Router;
use axum::http::HeaderName;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::http::handlers::generate::SESSION_ID_HEADER;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(SESSION_ID_HEADER)]);

    Router::new()
        .route("/signup/", post(handlers::auth::signup))
        .route("/login/", post(handlers::auth::login))
        .route(
            "/generate-sentence/",
            post(handlers::generate::generate_sentence),
        )
        .route("/sessions/", get(handlers::session::list_sessions))
        .route("/sessions/{id}/", get(handlers::session::get_session))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
