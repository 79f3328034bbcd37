//! # Domain Errors
//!
//! Validation failures raised while constructing value objects.

use thiserror::Error;

/// Error type for domain value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Symbol was empty or blank.
    #[error("symbol must not be empty")]
    EmptySymbol,

    /// Trade amount was zero, negative, or not finite.
    #[error("invalid amount: {0}")]
    InvalidAmount(f64),

    /// A price was zero, negative, or not finite.
    #[error("invalid {side} price: {value}")]
    InvalidPrice {
        /// Which side of the book (`ask` or `bid`).
        side: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
