//! # Kraken Adapter
//!
//! Price source backed by the Kraken public depth endpoint.
//!
//! `GET {base_url}/0/public/Depth?pair={SYMBOL}USD&count=1` answers with a
//! result map keyed by Kraken's own pair name, which does not follow a
//! fixed convention (`BTC` becomes `XXBTZUSD`, `SOL` becomes `SOLUSD`):
//!
//! ```json
//! {"error": [], "result": {"XXBTZUSD": {"asks": [["65000.1", "0.3", 1712000000]], "bids": [["64999.9", "1.1", 1712000000]]}}}
//! ```
//!
//! Failures are reported in the `error` list with an HTTP 200 status, for
//! example `{"error": ["EQuery:Unknown asset pair"]}`.

use crate::config::SourceConfig;
use crate::domain::value_objects::{PricePair, SourceId, Symbol};
use crate::infrastructure::sources::book::{BookLevel, top_of_book};
use crate::infrastructure::sources::context::QuoteContext;
use crate::infrastructure::sources::error::{SourceError, SourceResult};
use crate::infrastructure::sources::http_client::HttpClient;
use crate::infrastructure::sources::traits::PriceSource;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Public REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.kraken.com";

/// Default per-call timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Path of the depth endpoint, relative to the base URL.
const DEPTH_PATH: &str = "/0/public/Depth";

/// Quote currency every symbol is priced in.
const QUOTE_CURRENCY: &str = "USD";

/// Envelope of every Kraken public response.
#[derive(Debug, Deserialize)]
struct DepthResponse {
    #[serde(default)]
    error: Vec<String>,
    #[serde(default)]
    result: BTreeMap<String, DepthBook>,
}

#[derive(Debug, Deserialize)]
struct DepthBook {
    #[serde(default)]
    asks: Vec<BookLevel>,
    #[serde(default)]
    bids: Vec<BookLevel>,
}

impl DepthResponse {
    /// Turns the envelope into a price pair.
    ///
    /// The pair key is never derived from the symbol. The first entry in
    /// key order is used, which for a single-pair query is the only one.
    fn into_price_pair(self, source: &str) -> SourceResult<PricePair> {
        if !self.error.is_empty() {
            return Err(SourceError::rejected(self.error.join(", ")));
        }

        let (_pair, book) = self.result.into_iter().next().ok_or_else(|| {
            SourceError::invalid_data(format!("no order book in {} response", source))
        })?;

        top_of_book(source, &book.asks, &book.bids)
    }
}

/// Kraken price source.
#[derive(Debug, Clone)]
pub struct KrakenSource {
    id: SourceId,
    base_url: String,
    timeout_ms: u64,
}

impl KrakenSource {
    /// Creates an adapter pointed at the public endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: SourceId::from_static("kraken"),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Creates an adapter from its configuration section.
    #[must_use]
    pub fn from_config(config: &SourceConfig) -> Self {
        let source = Self::new().with_timeout_ms(config.timeout_ms);
        match &config.base_url {
            Some(url) => source.with_base_url(url.clone()),
            None => source,
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns the base URL.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-call timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    async fn fetch_depth(&self, symbol: &Symbol) -> SourceResult<PricePair> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), DEPTH_PATH);
        let pair = format!("{}{}", symbol, QUOTE_CURRENCY);
        let params = [("pair", pair.as_str()), ("count", "1")];

        let client = HttpClient::new(self.timeout_ms)?;
        let response: DepthResponse = client.get_with_params(&url, &params).await?;

        response.into_price_pair(self.id.as_str())
    }
}

impl Default for KrakenSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for KrakenSource {
    fn name(&self) -> &SourceId {
        &self.id
    }

    async fn fetch_prices(&self, ctx: &QuoteContext, symbol: &Symbol) -> SourceResult<PricePair> {
        let pair = ctx.run(self.fetch_depth(symbol)).await?;
        tracing::debug!(source = %self.id, %symbol, ask = pair.ask(), bid = pair.bid(), "fetched top of book");
        Ok(pair)
    }
}
