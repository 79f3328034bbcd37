//! # REST API
//!
//! HTTP endpoints using axum.
//!
//! # Endpoints
//!
//! - `GET /buy?amount=<f64>&symbol=<str>` - Cost of buying at the lowest ask
//! - `GET /sell?amount=<f64>&symbol=<str>` - Proceeds of selling at the highest bid
//! - `GET /health` - Liveness and configured sources
//!
//! A successful quote answers with
//!
//! ```json
//! {"coin": "BTC", "amount": 1.0, "usdAmount": 9900.0, "exchange": ["coinbase"]}
//! ```
//!
//! and every failure with `{"error": "<message>"}`: 400 for a bad amount or
//! symbol, 500 when no source produced a price.
//!
//! # Usage
//!
//! ```ignore
//! use best_execution::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::new(service, request_timeout, shutdown));
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:4000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use handlers::{AppState, HealthResponse, QuoteParams, QuoteResponse};
pub use routes::create_router;
