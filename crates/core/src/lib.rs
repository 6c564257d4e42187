pub mod bootstrap;
pub mod config;
pub mod container;
pub mod errors;
pub mod logging;
pub mod providers;

// Re-export key types for convenience
pub use bootstrap::{bootstrap, Application, BootstrapOptions, BootstrapResult};
pub use config::{Config, ConfigError, ConfigSource, ConfigToken, ConfigTree};
pub use container::{Container, ContainerError, Injectable, ServiceToken, Target};
pub use errors::{BootstrapError, Phase};
pub use logging::{Logger, LoggerToken};
pub use providers::{LoggerProvider, ProviderError, ServiceProvider};

#[doc(hidden)]
pub mod __private {
    pub use async_trait::async_trait;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Framework information
pub const FRAMEWORK_NAME: &str = "strata";

/// Get framework version
pub fn version() -> &'static str {
    VERSION
}

/// Get framework name
pub fn name() -> &'static str {
    FRAMEWORK_NAME
}
