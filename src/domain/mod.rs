//! # Domain Layer
//!
//! Value objects and validation rules shared by every other layer.

pub mod errors;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
