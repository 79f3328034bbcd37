//! # Price Sources
//!
//! Exchange integrations behind the [`PriceSource`] trait.
//!
//! ## Available Sources
//!
//! - [`CoinbaseSource`]: Coinbase Exchange order book, errors via HTTP status
//! - [`KrakenSource`]: Kraken depth endpoint, errors embedded in the payload
//!
//! ## Shared Pieces
//!
//! - [`QuoteContext`] / [`CancelHandle`]: request deadline and cancellation
//! - [`HttpClient`]: bounded-timeout JSON client
//! - [`SourceError`]: failure taxonomy

pub mod book;
pub mod coinbase;
pub mod context;
pub mod error;
pub mod http_client;
pub mod kraken;
pub mod traits;

pub use coinbase::CoinbaseSource;
pub use context::{CancelHandle, QuoteContext};
pub use error::{SourceError, SourceErrorKind, SourceResult};
pub use http_client::HttpClient;
pub use kraken::KrakenSource;
pub use traits::PriceSource;

use crate::config::SourcesConfig;
use std::sync::Arc;

/// Builds the enabled sources in a fixed order: Coinbase, then Kraken.
///
/// The order is the order in which ties are reported.
#[must_use]
pub fn from_config(config: &SourcesConfig) -> Vec<Arc<dyn PriceSource>> {
    let mut sources: Vec<Arc<dyn PriceSource>> = Vec::with_capacity(2);
    if config.coinbase.enabled {
        sources.push(Arc::new(CoinbaseSource::from_config(&config.coinbase)));
    }
    if config.kraken.enabled {
        sources.push(Arc::new(KrakenSource::from_config(&config.kraken)));
    }
    sources
}
