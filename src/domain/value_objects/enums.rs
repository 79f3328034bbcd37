//! # Domain Enums
//!
//! - [`OrderSide`] - Buy or Sell direction

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade direction of a quote request.
///
/// A buy is priced off the ask side of each source, a sell off the bid side.
///
/// # Examples
///
/// ```
/// use best_execution::domain::value_objects::enums::OrderSide;
///
/// assert_eq!(OrderSide::Buy.to_string(), "BUY");
/// assert!(OrderSide::Buy.is_better(9_900.0, 10_000.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    /// Buy at the lowest ask.
    Buy,
    /// Sell at the highest bid.
    Sell,
}

impl OrderSide {
    /// Returns true if `candidate` is a strictly better price than
    /// `incumbent` for this side.
    ///
    /// Lower is better when buying, higher is better when selling.
    ///
    /// ```
    /// use best_execution::domain::value_objects::enums::OrderSide;
    ///
    /// assert!(OrderSide::Sell.is_better(10_000.0, 9_900.0));
    /// assert!(!OrderSide::Sell.is_better(10_000.0, 10_000.0));
    /// ```
    #[inline]
    #[must_use]
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Self::Buy => candidate < incumbent,
            Self::Sell => candidate > incumbent,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}
