//! # Coinbase Adapter
//!
//! Price source backed by the Coinbase Exchange public order book.
//!
//! `GET {base_url}/products/{SYMBOL}-USD/book` answers with the best level
//! of each side:
//!
//! ```json
//! {"bids": [["64999.99", "0.5", 3]], "asks": [["65000.01", "1.2", 1]], "sequence": 1}
//! ```
//!
//! Coinbase signals failures through the HTTP status (for example
//! `404 {"message":"NotFound"}` for an unknown product).

use crate::config::SourceConfig;
use crate::domain::value_objects::{PricePair, SourceId, Symbol};
use crate::infrastructure::sources::book::{BookLevel, top_of_book};
use crate::infrastructure::sources::context::QuoteContext;
use crate::infrastructure::sources::error::{SourceError, SourceResult};
use crate::infrastructure::sources::http_client::HttpClient;
use crate::infrastructure::sources::traits::PriceSource;
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

/// Public REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.exchange.coinbase.com";

/// Default per-call timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Quote currency every symbol is priced in.
const QUOTE_CURRENCY: &str = "USD";

/// Subset of the `/book` response this adapter reads.
#[derive(Debug, Deserialize)]
struct BookResponse {
    #[serde(default)]
    bids: Vec<BookLevel>,
    #[serde(default)]
    asks: Vec<BookLevel>,
    /// Set instead of the book when the exchange refuses the request.
    #[serde(default)]
    message: Option<String>,
}

/// Coinbase Exchange price source.
#[derive(Debug, Clone)]
pub struct CoinbaseSource {
    id: SourceId,
    base_url: String,
    timeout_ms: u64,
}

impl CoinbaseSource {
    /// Creates an adapter pointed at the public endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: SourceId::from_static("coinbase"),
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

    /// Builds the order book URL for `symbol`.
    fn book_url(&self, symbol: &Symbol) -> SourceResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            SourceError::internal(format!("invalid coinbase base url {}: {}", self.base_url, e))
        })?;
        let product = format!("{}-{}", symbol, QUOTE_CURRENCY);
        url.path_segments_mut()
            .map_err(|()| {
                SourceError::internal(format!("coinbase base url cannot take a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["products", product.as_str(), "book"]);
        Ok(url)
    }

    async fn fetch_book(&self, symbol: &Symbol) -> SourceResult<PricePair> {
        let url = self.book_url(symbol)?;
        // One client per call; nothing is shared between requests.
        let client = HttpClient::new(self.timeout_ms)?;
        let book: BookResponse = client.get(url.as_str()).await?;

        let refused = book.bids.is_empty() && book.asks.is_empty();
        if let Some(message) = book.message.filter(|_| refused) {
            return Err(SourceError::rejected(message));
        }
        top_of_book(self.id.as_str(), &book.asks, &book.bids)
    }
}

impl Default for CoinbaseSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for CoinbaseSource {
    fn name(&self) -> &SourceId {
        &self.id
    }

    async fn fetch_prices(&self, ctx: &QuoteContext, symbol: &Symbol) -> SourceResult<PricePair> {
        let pair = ctx.run(self.fetch_book(symbol)).await?;
        tracing::debug!(source = %self.id, %symbol, ask = pair.ask(), bid = pair.bid(), "fetched top of book");
        Ok(pair)
    }
}
