//! # Application Services
//!
//! - [`BestExecutionService`]: fan-out over price sources and best price selection

pub mod best_execution;

pub use best_execution::{
    BestExecutionService, BestPrice, Execution, FanOutMode, SourceQuote, select_best,
};
