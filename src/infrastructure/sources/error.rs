//! # Source Errors
//!
//! Error types for price source operations.
//!
//! Every failure a source can report falls into one of two kinds (see
//! [`SourceErrorKind`]): the source could not be reached, or it answered
//! with something that does not contain a usable top of book. Both are
//! handled the same way by the selector: the source is skipped for the
//! current request.
//!
//! # Examples
//!
//! ```
//! use best_execution::infrastructure::sources::error::{SourceError, SourceErrorKind};
//!
//! let error = SourceError::timeout_with_duration("request timed out", 10_000);
//! assert_eq!(error.kind(), SourceErrorKind::Unavailable);
//!
//! let error = SourceError::rejected("EQuery:Unknown asset pair");
//! assert_eq!(error.kind(), SourceErrorKind::DataInvalid);
//! ```

use std::fmt;
use thiserror::Error;

/// Coarse classification of a source failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceErrorKind {
    /// The network or transport call failed: timeout, cancellation,
    /// connection error, or non-success status.
    Unavailable,
    /// A response arrived but the price fields could not be located or
    /// parsed, or the source reported an application-level error.
    DataInvalid,
}

impl fmt::Display for SourceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "SOURCE_UNAVAILABLE"),
            Self::DataInvalid => write!(f, "SOURCE_DATA_INVALID"),
        }
    }
}

/// Error type for price source operations.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// Request exceeded the source's own timeout or the request deadline.
    #[error("source timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// The caller cancelled the request before the source answered.
    #[error("source call cancelled: {message}")]
    Cancelled {
        /// Error message.
        message: String,
    },

    /// Network or connection error.
    #[error("source connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Source answered with a non-success HTTP status.
    #[error("source returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message, usually an excerpt of the response body.
        message: String,
    },

    /// Source reported an application-level error in an otherwise
    /// successful response.
    #[error("source rejected request: {message}")]
    Rejected {
        /// The source's own error text.
        message: String,
    },

    /// Response could not be decoded or lacked a usable top of book.
    #[error("source data invalid: {message}")]
    InvalidData {
        /// Error message.
        message: String,
    },

    /// Local failure before the request was sent.
    #[error("source internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl SourceError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a cancellation error.
    #[must_use]
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::Cancelled {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates a rejected error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates an invalid data error.
    #[must_use]
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns the coarse kind of this error.
    #[must_use]
    pub fn kind(&self) -> SourceErrorKind {
        match self {
            Self::Timeout { .. }
            | Self::Cancelled { .. }
            | Self::Connection { .. }
            | Self::Status { .. }
            | Self::Internal { .. } => SourceErrorKind::Unavailable,
            Self::Rejected { .. } | Self::InvalidData { .. } => SourceErrorKind::DataInvalid,
        }
    }

    /// Returns the HTTP status code, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;
