use crate::config::{env_str, ConfigToken, ConfigTree};
use crate::container::Container;
use crate::logging::{init_logging, Logger, LoggerToken, LoggingConfig, TracingLogger};
use crate::providers::{ProviderError, ServiceProvider};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Built-in provider for the application logger
///
/// Contributes the `log` section (`LOG_LEVEL`, `LOG_FORMAT` from the
/// environment), installs the `tracing` subscriber it describes and binds
/// [`LoggerToken`] to a [`TracingLogger`].
#[derive(Debug, Default)]
pub struct LoggerProvider;

impl LoggerProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ServiceProvider for LoggerProvider {
    fn name(&self) -> &'static str {
        "LoggerProvider"
    }

    fn default_config(&self) -> Option<ConfigTree> {
        Some(json!({
            "log": {
                "level": env_str("LOG_LEVEL", "info"),
                "format": env_str("LOG_FORMAT", "pretty"),
            }
        }))
    }

    fn register(&self, container: &Container) -> Result<(), ProviderError> {
        let config = container.get::<ConfigToken>()?;
        let logging: LoggingConfig = config.get_or("log", LoggingConfig::default())?;

        let installed =
            init_logging(&logging).map_err(|e| ProviderError::registration(e.to_string()))?;
        if !installed {
            tracing::debug!("Subscriber already installed, keeping it");
        }

        let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new());
        container.bind::<LoggerToken>().to_instance(logger);
        Ok(())
    }

    async fn boot(&self, container: &Container) -> Result<(), ProviderError> {
        let logger = container.get::<LoggerToken>()?;
        logger.info("LoggerProvider booted", &[]);
        Ok(())
    }
}
