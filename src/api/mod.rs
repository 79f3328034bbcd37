//! # API Layer
//!
//! External surfaces of the service.
//!
//! - [`rest`]: HTTP endpoints built with axum

pub mod rest;
