use crate::config::ConfigError;
use crate::providers::ProviderError;
use thiserror::Error;

/// Lifecycle phase a bootstrap failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Instantiate,
    Configure,
    Register,
    Boot,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = match self {
            Phase::Instantiate => "instantiate",
            Phase::Configure => "configure",
            Phase::Register => "register",
            Phase::Boot => "boot",
        };
        write!(f, "{}", phase)
    }
}

/// Error surfaced by `Application::bootstrap`
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Failed to instantiate provider #{index}: {source}")]
    Instantiate {
        index: usize,
        #[source]
        source: ProviderError,
    },

    #[error("Failed to build configuration: {0}")]
    Configure(#[from] ConfigError),

    #[error("Provider '{provider}' failed to register: {source}")]
    Register {
        provider: String,
        #[source]
        source: ProviderError,
    },

    #[error("Provider '{provider}' failed to boot: {source}")]
    Boot {
        provider: String,
        #[source]
        source: ProviderError,
    },
}

impl BootstrapError {
    /// The phase that failed
    pub fn phase(&self) -> Phase {
        match self {
            Self::Instantiate { .. } => Phase::Instantiate,
            Self::Configure(_) => Phase::Configure,
            Self::Register { .. } => Phase::Register,
            Self::Boot { .. } => Phase::Boot,
        }
    }

    /// Name of the provider that failed, when the failure belongs to one
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::Register { provider, .. } | Self::Boot { provider, .. } => Some(provider),
            _ => None,
        }
    }
}
