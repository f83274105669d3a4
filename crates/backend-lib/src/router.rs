// ============================
// signup-backend-lib/src/router.rs
// ============================
//! HTTP router construction.
use std::sync::Arc;

use axum::{routing::post, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::AppState;

/// Create the HTTP router.
/// CORS is wide open; the service is meant to sit behind a browser client.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/signup", post(handlers::signup))
        .route("/verify", post(handlers::verify))
        .route("/signin", post(handlers::signin))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
