//! # Trade Amount
//!
//! Units of the asset a caller wants to buy or sell.

use crate::domain::errors::{DomainError, DomainResult};
use serde::Serialize;
use std::fmt;

/// A strictly positive, finite quantity of the asset.
///
/// The selector only accepts this type, so it is never asked to price a
/// zero or negative trade.
///
/// # Examples
///
/// ```
/// use best_execution::domain::value_objects::TradeAmount;
///
/// let amount = TradeAmount::new(0.5).unwrap();
/// assert_eq!(amount.get(), 0.5);
/// assert!(TradeAmount::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct TradeAmount(f64);

impl TradeAmount {
    /// Creates a new trade amount.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if `value` is not finite or not
    /// greater than zero.
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(DomainError::InvalidAmount(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Notional value of this amount at `unit_price`.
    #[inline]
    #[must_use]
    pub fn notional(self, unit_price: f64) -> f64 {
        self.0 * unit_price
    }
}

impl fmt::Display for TradeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
