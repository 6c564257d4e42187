//! Subscriber installation for the `tracing` facade.

use serde::Deserialize;
use std::io;
use thiserror::Error;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum LogFormat {
    /// Multi-line human readable output
    Pretty,
    /// One JSON object per event
    Json,
    /// Single-line text output
    Compact,
}

impl From<&str> for LogFormat {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

impl From<String> for LogFormat {
    fn from(value: String) -> Self {
        LogFormat::from(value.as_str())
    }
}

/// Logging configuration, read from the `log` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "warn")
    pub level: String,
    pub format: LogFormat,
    /// Environment filter (supports directives like "strata_core=debug,hyper=warn")
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Set environment filter
    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    fn filter(&self) -> Result<EnvFilter, LoggingError> {
        let directives = self.env_filter.as_deref().unwrap_or(&self.level);

        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(directives))
            .map_err(|e| LoggingError::InvalidFilter {
                filter: directives.to_string(),
                message: e.to_string(),
            })
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },
}

/// Install the global subscriber described by `config`
///
/// Returns `Ok(false)` when a subscriber was already installed, which leaves
/// the existing one in place.
pub fn init_logging(config: &LoggingConfig) -> Result<bool, LoggingError> {
    let filter = config.filter()?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Json => registry
            .with(Layer::new().with_writer(io::stdout).json())
            .try_init(),
        LogFormat::Pretty => registry
            .with(Layer::new().with_writer(io::stdout).pretty())
            .try_init(),
        LogFormat::Compact => registry
            .with(Layer::new().with_writer(io::stdout).compact())
            .try_init(),
    }
    .is_ok();

    if installed {
        tracing::info!(
            target: "strata::logging",
            "Structured logging initialized (level: {}, format: {:?})",
            config.level,
            config.format
        );
    }

    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_parsing() {
        assert_eq!(LogFormat::from("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::from("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from("logfmt"), LogFormat::Compact);
    }

    #[test]
    fn test_deserialize_from_section() {
        let config: LoggingConfig =
            serde_json::from_value(json!({"level": "debug", "format": "json"})).unwrap();

        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.env_filter, None);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: LoggingConfig = serde_json::from_value(json!({})).unwrap();

        assert_eq!(config, LoggingConfig::default());
    }

    #[test]
    fn test_invalid_filter_is_reported() {
        let config = LoggingConfig::default().with_env_filter("strata_core=notalevel");

        // RUST_LOG takes precedence when set, only assert on the fallback path
        if std::env::var("RUST_LOG").is_err() {
            assert!(matches!(
                init_logging(&config),
                Err(LoggingError::InvalidFilter { .. })
            ));
        }
    }
}
