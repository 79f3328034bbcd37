//! # Application Errors
//!
//! Error types surfaced by the best-execution service.
//!
//! Individual source failures never reach this layer as errors: they are
//! logged and the source is skipped. The only failure produced by the
//! selector itself is [`ExecutionError::NoPriceAvailable`].
//!
//! ```text
//! ExecutionError
//! ├── NoPriceAvailable { symbol }  - every source failed (server side)
//! └── InvalidRequest(String)       - rejected before quoting (client side)
//! ```
//!
//! # Examples
//!
//! ```
//! use best_execution::application::error::ExecutionError;
//! use best_execution::domain::value_objects::Symbol;
//!
//! let err = ExecutionError::no_price_available(&Symbol::new("BTC").unwrap());
//! assert_eq!(err.to_string(), "no price available for BTC");
//! assert!(!err.is_client_error());
//! ```

use crate::domain::errors::DomainError;
use crate::domain::value_objects::Symbol;
use thiserror::Error;

/// Error type for best-execution requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// No source produced a price for the symbol.
    ///
    /// Covers an empty source list, every source being down, and a symbol
    /// that no source knows.
    #[error("no price available for {symbol}")]
    NoPriceAvailable {
        /// The requested symbol.
        symbol: String,
    },

    /// The request was malformed and never reached the selector.
    #[error("{0}")]
    InvalidRequest(String),
}

impl ExecutionError {
    /// Creates a no price available error.
    #[must_use]
    pub fn no_price_available(symbol: &Symbol) -> Self {
        Self::NoPriceAvailable {
            symbol: symbol.to_string(),
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns true if the caller is at fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}

impl From<DomainError> for ExecutionError {
    fn from(error: DomainError) -> Self {
        let message = match error {
            DomainError::EmptySymbol => "invalid symbol".to_string(),
            DomainError::InvalidAmount(_) => "invalid amount".to_string(),
            other @ DomainError::InvalidPrice { .. } => other.to_string(),
        };
        Self::InvalidRequest(message)
    }
}

/// Result type for best-execution requests.
pub type ExecutionResult<T> = Result<T, ExecutionError>;
