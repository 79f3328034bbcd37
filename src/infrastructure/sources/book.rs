//! # Order Book Parsing
//!
//! Helpers shared by the exchange adapters for pulling the top of book out
//! of a depth response.
//!
//! Both supported exchanges encode each book level as a JSON array whose
//! first element is the price, usually as a decimal string. Only the first
//! level of each side is read.

use crate::domain::value_objects::PricePair;
use crate::infrastructure::sources::error::{SourceError, SourceResult};
use serde_json::Value;

/// One level of a depth response: `[price, size, ...]`.
pub type BookLevel = Vec<Value>;

/// Builds a [`PricePair`] from the best ask and best bid levels.
///
/// # Errors
///
/// Returns `SourceError::InvalidData` if either side is empty, a price is
/// missing or unparsable, or the resulting pair is not strictly positive.
pub fn top_of_book(source: &str, asks: &[BookLevel], bids: &[BookLevel]) -> SourceResult<PricePair> {
    let bid = level_price(source, "bid", bids)?;
    let ask = level_price(source, "ask", asks)?;

    PricePair::new(ask, bid)
        .map_err(|e| SourceError::invalid_data(format!("{} response: {}", source, e)))
}

fn level_price(source: &str, side: &str, levels: &[BookLevel]) -> SourceResult<f64> {
    let raw = levels.first().and_then(|level| level.first()).ok_or_else(|| {
        SourceError::invalid_data(format!("failed to find {} prices in {} response", side, source))
    })?;

    let parsed = match raw {
        Value::String(text) => text.trim().parse::<f64>().ok(),
        Value::Number(number) => number.as_f64(),
        _ => None,
    };

    parsed.ok_or_else(|| {
        SourceError::invalid_data(format!(
            "failed to parse {} price {} from {} response",
            side, raw, source
        ))
    })
}
