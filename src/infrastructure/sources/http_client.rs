//! # HTTP Client Utilities
//!
//! Shared HTTP client for price sources.
//!
//! This module provides a thin wrapper over `reqwest` with:
//! - A bounded per-call timeout
//! - JSON deserialization
//! - Mapping of transport and status failures onto [`SourceError`]
//!
//! It deliberately performs no retries.
//!
//! # Examples
//!
//! ```ignore
//! use best_execution::infrastructure::sources::http_client::HttpClient;
//!
//! let client = HttpClient::new(5000)?;
//! let response: MyResponse = client.get("https://api.example.com/endpoint").await?;
//! ```

use crate::infrastructure::sources::error::{SourceError, SourceResult};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Maximum number of body characters kept in a status error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP client wrapper for price sources.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Arguments
    ///
    /// * `timeout_ms` - Request timeout in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Internal` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::internal(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Timeout` or `SourceError::Connection` if the
    /// request fails, `SourceError::Status` on a non-success status, and
    /// `SourceError::InvalidData` if the body cannot be decoded.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> SourceResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Makes a GET request with query parameters and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn get_with_params<T: DeserializeOwned, P: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> SourceResult<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> SourceResult<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| SourceError::invalid_data(format!("failed to parse response: {}", e)))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(SourceError::status(status.as_u16(), truncate(&body)))
        }
    }

    /// Maps a reqwest error to a SourceError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> SourceError {
        if error.is_timeout() {
            SourceError::timeout_with_duration(
                format!("no response within {}ms", self.timeout_ms),
                self.timeout_ms,
            )
        } else if error.is_connect() {
            SourceError::connection(format!("connection failed: {}", error))
        } else if error.is_decode() {
            SourceError::invalid_data(format!("failed to read response: {}", error))
        } else {
            SourceError::connection(format!("HTTP request failed: {}", error))
        }
    }
}

fn truncate(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", trimmed.get(..cut).unwrap_or(trimmed)),
        None => trimmed.to_string(),
    }
}
