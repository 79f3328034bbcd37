//! # Configuration
//!
//! Layered service configuration.
//!
//! Sources, lowest priority first:
//!
//! 1. built-in defaults
//! 2. a TOML file (`best-execution.toml` in the working directory unless a
//!    path is given; only an explicit path is required to exist)
//! 3. environment variables prefixed with `BEST_EXECUTION`, nested with
//!    `__`, e.g. `BEST_EXECUTION__SERVER__PORT=4001`
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 4000
//!
//! [quoting]
//! request_timeout_ms = 15000
//! fan_out = "concurrent"
//!
//! [sources.coinbase]
//! enabled = true
//! timeout_ms = 10000
//!
//! [sources.kraken]
//! enabled = true
//! base_url = "https://api.kraken.com"
//!
//! [log]
//! level = "info"
//! format = "pretty"
//! ```

use crate::application::services::FanOutMode;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// File read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "best-execution.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "BEST_EXECUTION";

const ENV_SEPARATOR: &str = "__";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_SOURCE_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The configuration was read but is unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Request handling.
    pub quoting: QuotingConfig,
    /// Exchange price sources.
    pub sources: SourcesConfig,
    /// Logging.
    pub log: LogConfig,
}

impl AppConfig {
    /// Loads and validates the configuration.
    ///
    /// With `None`, [`DEFAULT_CONFIG_FILE`] is read if present. With a path,
    /// that file must exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a layer cannot be read or has the
    /// wrong shape, and `ConfigError::Invalid` if validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::new(&path.to_string_lossy(), FileFormat::Toml).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            .add_source(environment());

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for a zero timeout, an empty base URL,
    /// or when every source is disabled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quoting.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "quoting.request_timeout_ms must be greater than zero".to_string(),
            ));
        }

        let mut enabled = 0;
        for (name, source) in self.sources.iter() {
            if !source.enabled {
                continue;
            }
            enabled += 1;
            if source.timeout_ms == 0 {
                return Err(ConfigError::Invalid(format!(
                    "sources.{}.timeout_ms must be greater than zero",
                    name
                )));
            }
            if source.base_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "sources.{}.base_url must not be empty",
                    name
                )));
            }
        }

        if enabled == 0 {
            return Err(ConfigError::Invalid(
                "at least one price source must be enabled".to_string(),
            ));
        }

        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl ServerConfig {
    /// Returns `host:port`.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Request handling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotingConfig {
    /// Deadline for one whole request, shared by every source call.
    pub request_timeout_ms: u64,
    /// How sources are consulted.
    pub fan_out: FanOutMode,
}

impl QuotingConfig {
    /// Returns the request deadline as a duration.
    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for QuotingConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            fan_out: FanOutMode::default(),
        }
    }
}

/// Per-exchange source sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Coinbase Exchange.
    pub coinbase: SourceConfig,
    /// Kraken.
    pub kraken: SourceConfig,
}

impl SourcesConfig {
    /// Iterates the sections with their names, in consultation order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SourceConfig)> {
        [("coinbase", &self.coinbase), ("kraken", &self.kraken)].into_iter()
    }
}

/// One exchange source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Whether the source is consulted at all.
    pub enabled: bool,
    /// Endpoint override; the adapter's public endpoint when unset.
    pub base_url: Option<String>,
    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: None,
            timeout_ms: DEFAULT_SOURCE_TIMEOUT_MS,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_builder(
            config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    fn from_env(toml: &str, vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_builder(
            config::Config::builder()
                .add_source(File::from_str(toml, FileFormat::Toml))
                .add_source(environment().source(Some(vars))),
        )
    }

    #[test]
    fn defaults_without_any_layer() {
        let config = AppConfig::from_builder(config::Config::builder()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.address(), "0.0.0.0:4000");
        assert_eq!(config.quoting.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.quoting.fan_out, FanOutMode::Concurrent);
        assert!(config.sources.coinbase.enabled);
        assert_eq!(config.sources.kraken.timeout_ms, 10_000);
        assert_eq!(config.log.format, LogFormat::Pretty);
    }

    #[test]
    fn file_overrides_defaults() {
        let config = from_toml(
            r#"
            [server]
            port = 8080

            [quoting]
            fan_out = "sequential"

            [sources.kraken]
            base_url = "http://localhost:9000"

            [log]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.quoting.fan_out, FanOutMode::Sequential);
        assert_eq!(
            config.sources.kraken.base_url.as_deref(),
            Some("http://localhost:9000")
        );
        assert_eq!(config.sources.coinbase.base_url, None);
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn environment_overrides_file() {
        let config = from_env(
            "[server]\nport = 8080\n",
            &[
                ("BEST_EXECUTION__SERVER__PORT", "4001"),
                ("BEST_EXECUTION__SOURCES__COINBASE__ENABLED", "false"),
                ("BEST_EXECUTION__QUOTING__REQUEST_TIMEOUT_MS", "2500"),
            ],
        )
        .unwrap();
        assert_eq!(config.server.port, 4001);
        assert!(!config.sources.coinbase.enabled);
        assert_eq!(config.quoting.request_timeout_ms, 2_500);
    }

    #[test]
    fn rejects_zero_request_timeout() {
        let err = from_toml("[quoting]\nrequest_timeout_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_source_timeout() {
        let err = from_toml("[sources.coinbase]\ntimeout_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("sources.coinbase.timeout_ms"));
    }

    #[test]
    fn ignores_disabled_source_settings() {
        let config = from_toml("[sources.coinbase]\nenabled = false\ntimeout_ms = 0\n").unwrap();
        assert!(!config.sources.coinbase.enabled);
    }

    #[test]
    fn rejects_empty_base_url() {
        let err = from_toml("[sources.kraken]\nbase_url = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("sources.kraken.base_url"));
    }

    #[test]
    fn rejects_no_enabled_sources() {
        let err = from_toml(
            "[sources.coinbase]\nenabled = false\n[sources.kraken]\nenabled = false\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("at least one price source"));
    }

    #[test]
    fn rejects_unknown_fan_out() {
        let err = from_toml("[quoting]\nfan_out = \"sideways\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/best-execution.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
