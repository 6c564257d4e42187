use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration accessed before bootstrap. Call Application::bootstrap first.")]
    Uninitialized,

    #[error("Configuration path not found: {path}")]
    NotFound { path: String },

    #[error("Invalid value at '{path}': {message}. Expected: {expected}")]
    InvalidValue {
        path: String,
        expected: String,
        message: String,
    },

    #[error("Parsing error: {message}")]
    ParsingError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dotenv error: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

impl ConfigError {
    /// Create a not found error
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        path: impl Into<String>,
        expected: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            path: path.into(),
            expected: expected.into(),
            message: message.into(),
        }
    }

    /// Create a parsing error
    pub fn parsing(message: impl Into<String>) -> Self {
        Self::ParsingError {
            message: message.into(),
        }
    }

    /// Check if the error reports a missing path
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the error reports access before bootstrap
    pub fn is_uninitialized(&self) -> bool {
        matches!(self, Self::Uninitialized)
    }
}
