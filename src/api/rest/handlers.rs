//! # REST Handlers
//!
//! Request handlers and wire types.

use crate::api::rest::error::ApiError;
use crate::application::services::{BestExecutionService, Execution};
use crate::domain::value_objects::{OrderSide, SourceId, Symbol, TradeAmount};
use crate::infrastructure::sources::{CancelHandle, QuoteContext};
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Shared state of every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The selector.
    pub service: Arc<BestExecutionService>,
    /// Deadline applied to each request.
    pub request_timeout: Duration,
    /// Fired on server shutdown; in-flight source calls observe it.
    pub shutdown: Arc<CancelHandle>,
}

impl AppState {
    /// Creates the handler state.
    #[must_use]
    pub fn new(
        service: Arc<BestExecutionService>,
        request_timeout: Duration,
        shutdown: Arc<CancelHandle>,
    ) -> Self {
        Self {
            service,
            request_timeout,
            shutdown,
        }
    }

    /// Context for one request: the shutdown signal plus the deadline.
    #[must_use]
    pub fn request_context(&self) -> QuoteContext {
        self.shutdown.context().with_timeout(self.request_timeout)
    }
}

/// Query string of `/buy` and `/sell`.
///
/// Fields are kept as raw strings so that a missing or malformed amount
/// produces the API's own error body. A query string that cannot be decoded
/// at all is reported as `invalid amount` too.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteParams {
    /// Units of the asset.
    pub amount: Option<String>,
    /// Asset ticker.
    pub symbol: Option<String>,
}

impl QuoteParams {
    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns a 400 `invalid amount` if the amount is missing, unparsable,
    /// or not positive, then a 400 `invalid symbol` if the symbol is
    /// missing or blank.
    pub fn parse(&self) -> Result<(TradeAmount, Symbol), ApiError> {
        let amount = self
            .amount
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .ok_or_else(|| ApiError::bad_request("invalid amount"))?;
        let amount = TradeAmount::new(amount)?;
        let symbol = Symbol::new(self.symbol.clone().unwrap_or_default())?;
        Ok((amount, symbol))
    }
}

/// Body of a successful quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// Requested symbol.
    pub coin: String,
    /// Requested amount.
    pub amount: f64,
    /// Amount times the winning price.
    #[serde(rename = "usdAmount")]
    pub usd_amount: f64,
    /// Sources quoting the winning price, in consultation order.
    pub exchange: Vec<String>,
}

impl From<&Execution> for QuoteResponse {
    fn from(execution: &Execution) -> Self {
        Self {
            coin: execution.symbol().to_string(),
            amount: execution.amount().get(),
            usd_amount: execution.usd_amount(),
            exchange: execution.winners().iter().map(ToString::to_string).collect(),
        }
    }
}

/// Body of `/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: String,
    /// Configured sources, in consultation order.
    pub sources: Vec<String>,
}

/// # GET /buy
pub async fn buy(
    State(state): State<Arc<AppState>>,
    query: Result<Query<QuoteParams>, QueryRejection>,
) -> Result<Json<QuoteResponse>, ApiError> {
    quote(&state, OrderSide::Buy, query).await
}

/// # GET /sell
pub async fn sell(
    State(state): State<Arc<AppState>>,
    query: Result<Query<QuoteParams>, QueryRejection>,
) -> Result<Json<QuoteResponse>, ApiError> {
    quote(&state, OrderSide::Sell, query).await
}

/// # GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sources = state
        .service
        .sources()
        .iter()
        .map(|source| source.name())
        .map(SourceId::to_string)
        .collect();
    Json(HealthResponse {
        status: "ok".to_string(),
        sources,
    })
}

async fn quote(
    state: &AppState,
    side: OrderSide,
    query: Result<Query<QuoteParams>, QueryRejection>,
) -> Result<Json<QuoteResponse>, ApiError> {
    // An undecodable query string (e.g. a repeated key) never yields an amount.
    let Query(params) = query.map_err(|rejection| {
        tracing::debug!(%rejection, "rejected query string");
        ApiError::bad_request("invalid amount")
    })?;
    let (amount, symbol) = params.parse()?;
    let ctx = state.request_context();
    let execution = state.service.execute(&ctx, side, amount, &symbol).await?;
    Ok(Json(QuoteResponse::from(&execution)))
}
