//! Application bootstrap.
//!
//! [`Application::bootstrap`] instantiates the configured providers, merges
//! their default configuration under the explicit overrides, then runs the
//! register and boot phases in provider order.

pub mod application;
pub mod options;

pub use application::{bootstrap, Application};
pub use options::BootstrapOptions;

pub use crate::errors::BootstrapError;

/// Result type for bootstrap operations
pub type BootstrapResult<T> = Result<T, BootstrapError>;
