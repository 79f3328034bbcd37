//! # Price Pair
//!
//! Top-of-book ask and bid reported by one source at one point in time.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::enums::OrderSide;
use serde::Serialize;
use std::fmt;

/// An immutable (ask, bid) pair of positive prices.
///
/// A pair is either complete or it does not exist: a source that cannot
/// determine both sides reports a failure instead.
///
/// # Examples
///
/// ```
/// use best_execution::domain::value_objects::{OrderSide, PricePair};
///
/// let pair = PricePair::new(10_010.0, 10_000.0).unwrap();
/// assert_eq!(pair.price_for(OrderSide::Buy), 10_010.0);
/// assert_eq!(pair.price_for(OrderSide::Sell), 10_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePair {
    ask: f64,
    bid: f64,
}

impl PricePair {
    /// Creates a new price pair.
    ///
    /// No ordering between ask and bid is enforced; sources occasionally
    /// report crossed books and the selector compares each side on its own.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if either side is not finite or
    /// not greater than zero.
    pub fn new(ask: f64, bid: f64) -> DomainResult<Self> {
        validate("ask", ask)?;
        validate("bid", bid)?;
        Ok(Self { ask, bid })
    }

    /// Price at which the caller could buy.
    #[inline]
    #[must_use]
    pub fn ask(&self) -> f64 {
        self.ask
    }

    /// Price at which the caller could sell.
    #[inline]
    #[must_use]
    pub fn bid(&self) -> f64 {
        self.bid
    }

    /// Returns the side of the pair relevant to `side`.
    #[inline]
    #[must_use]
    pub fn price_for(&self, side: OrderSide) -> f64 {
        match side {
            OrderSide::Buy => self.ask,
            OrderSide::Sell => self.bid,
        }
    }
}

fn validate(side: &'static str, value: f64) -> DomainResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DomainError::InvalidPrice { side, value })
    }
}

impl fmt::Display for PricePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ask={} bid={}", self.ask, self.bid)
    }
}
