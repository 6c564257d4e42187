use thiserror::Error;

/// Boxed error produced by user constructors and factories
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Container error type
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("No binding registered for '{service}'")]
    UnboundIdentifier { service: String },

    #[error("Failed to construct '{service}': {source}")]
    ConstructionFailure {
        service: String,
        #[source]
        source: BoxError,
    },

    #[error("Dependency mismatch while constructing '{service}': {message}")]
    DependencyMismatch { service: String, message: String },
}

impl ContainerError {
    /// Create an unbound identifier error
    pub fn unbound(service: impl Into<String>) -> Self {
        Self::UnboundIdentifier {
            service: service.into(),
        }
    }

    /// Create a construction failure for a service
    pub fn construction(service: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::ConstructionFailure {
            service: service.into(),
            source: source.into(),
        }
    }

    /// Create a dependency mismatch error
    pub fn dependency_mismatch(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DependencyMismatch {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Check if the error is an unbound identifier
    pub fn is_unbound(&self) -> bool {
        matches!(self, Self::UnboundIdentifier { .. })
    }

    /// Name of the unbound identifier, if this is one
    pub fn unbound_service(&self) -> Option<&str> {
        match self {
            Self::UnboundIdentifier { service } => Some(service),
            _ => None,
        }
    }
}
