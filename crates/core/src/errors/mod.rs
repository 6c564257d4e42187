pub mod bootstrap;

pub use bootstrap::{BootstrapError, Phase};
pub use crate::config::ConfigError;
pub use crate::container::ContainerError;
pub use crate::providers::ProviderError;
