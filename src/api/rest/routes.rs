//! # REST Routes
//!
//! Router construction.

use crate::api::rest::handlers::{self, AppState};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the router with every endpoint and request tracing.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/buy", get(handlers::buy))
        .route("/sell", get(handlers::sell))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
