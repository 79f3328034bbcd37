//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`Symbol`]: asset identifier
//! - [`TradeAmount`]: positive quantity to trade
//! - [`PricePair`]: top-of-book ask and bid from one source
//! - [`SourceId`]: stable name of a price source
//! - `OrderSide`: Buy or Sell

pub mod amount;
pub mod enums;
pub mod ids;
pub mod price_pair;
pub mod symbol;

pub use amount::TradeAmount;
pub use enums::OrderSide;
pub use ids::SourceId;
pub use price_pair::PricePair;
pub use symbol::Symbol;
