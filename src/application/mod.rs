//! # Application Layer
//!
//! Use cases built on the domain and the price sources.
//!
//! - [`services`]: the best-execution service
//! - [`error`]: errors surfaced to callers

pub mod error;
pub mod services;

pub use error::{ExecutionError, ExecutionResult};
