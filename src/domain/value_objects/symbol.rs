//! # Symbol
//!
//! Opaque identifier of a tradeable asset.

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A case-sensitive asset symbol such as `BTC`.
///
/// Only emptiness is checked. Whether a source knows the symbol is
/// discovered by asking it.
///
/// # Examples
///
/// ```
/// use best_execution::domain::value_objects::Symbol;
///
/// let symbol = Symbol::new("BTC").unwrap();
/// assert_eq!(symbol.as_str(), "BTC");
/// assert!(Symbol::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptySymbol` if `value` is empty or whitespace.
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::EmptySymbol);
        }
        Ok(Self(value))
    }

    /// Returns the symbol as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
