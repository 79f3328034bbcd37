//! # Best Execution
//!
//! Best-execution price quoting across exchange price sources.
//!
//! Given a symbol, an amount and a direction, the service asks every
//! configured exchange for its top of book, ignores the ones that fail, and
//! reports the best price together with every exchange quoting it:
//!
//! - **buy**: lowest ask, `usdAmount = amount × ask`
//! - **sell**: highest bid, `usdAmount = amount × bid`
//!
//! # Layers
//!
//! - [`domain`]: value objects (`Symbol`, `TradeAmount`, `PricePair`, `OrderSide`)
//! - [`infrastructure`]: the `PriceSource` port and the Coinbase and Kraken adapters
//! - [`application`]: `BestExecutionService` and the pure `select_best` reduction
//! - [`api`]: the axum REST boundary
//! - [`config`] / [`telemetry`]: layered configuration and tracing setup

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
