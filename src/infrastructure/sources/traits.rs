//! # Price Source Trait
//!
//! Port definition for exchange price sources.
//!
//! This module defines the [`PriceSource`] trait that every exchange
//! integration implements. A source turns a symbol into one call against
//! its own pricing API and parses the answer into a [`PricePair`].
//! New exchanges are added by implementing the trait; the selector never
//! branches on which source it is talking to.
//!
//! # Examples
//!
//! ```ignore
//! use best_execution::infrastructure::sources::traits::PriceSource;
//!
//! struct MyExchange { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl PriceSource for MyExchange {
//!     // ... implement required methods
//! }
//! ```

use crate::domain::value_objects::{PricePair, SourceId, Symbol};
use crate::infrastructure::sources::context::QuoteContext;
use crate::infrastructure::sources::error::SourceResult;
use async_trait::async_trait;
use std::fmt;

/// Trait defining the interface for price sources.
///
/// # Contract
///
/// Implementations must:
/// - bound every network call with a timeout and honour the
///   [`QuoteContext`] deadline and cancellation signal;
/// - read only the top of book (best bid, best ask);
/// - return a complete pair or an error, never a placeholder price;
/// - treat an error payload as a failure even when the HTTP status is a
///   success;
/// - keep no mutable state between calls and never retry.
#[async_trait]
pub trait PriceSource: Send + Sync + fmt::Debug {
    /// Returns the stable name of this source.
    fn name(&self) -> &SourceId;

    /// Fetches the current top-of-book ask and bid for `symbol`.
    ///
    /// # Errors
    ///
    /// - `SourceError::Timeout` / `SourceError::Cancelled` - the call or
    ///   the request ran out of time, or the request was cancelled
    /// - `SourceError::Connection` / `SourceError::Status` - transport
    ///   failure or non-success status
    /// - `SourceError::Rejected` - the source reported an error payload
    /// - `SourceError::InvalidData` - the response lacked a usable top of
    ///   book
    async fn fetch_prices(&self, ctx: &QuoteContext, symbol: &Symbol) -> SourceResult<PricePair>;
}
