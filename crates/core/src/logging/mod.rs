pub mod config;
pub mod logger;

pub use config::{init_logging, LogFormat, LoggingConfig, LoggingError};
pub use logger::{LogLevel, LogMessage, Logger, LoggerToken, TracingLogger};
