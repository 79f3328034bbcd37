//! # Infrastructure Layer
//!
//! Integrations with external price sources.

pub mod sources;
