//! Typed environment variable access.
//!
//! Every lookup takes a default whose type decides how the raw string is
//! parsed. Values that do not parse fall back to the default, for numbers and
//! booleans alike, and the fallback is reported through `tracing`.
//!
//! A `.env` file is only read by [`load_dotenv`], which bootstrap calls before
//! any provider builds its defaults. Variables already set in the process
//! environment take precedence over the file, and setting `DOTENV_DISABLED`
//! skips the file entirely.

use crate::config::ConfigError;
use std::env::{self, VarError};
use std::path::{Path, PathBuf};

/// Types that can be read from an environment variable string
pub trait FromEnv: Sized {
    /// Parse the raw variable, `None` when it is not a valid value
    fn from_env_str(raw: &str) -> Option<Self>;
}

impl FromEnv for String {
    fn from_env_str(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl FromEnv for bool {
    fn from_env_str(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "true" | "t" | "1" | "yes" | "y" => Some(true),
            "false" | "f" | "0" | "no" | "n" => Some(false),
            _ => None,
        }
    }
}

macro_rules! impl_from_env_for_numbers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromEnv for $ty {
                fn from_env_str(raw: &str) -> Option<Self> {
                    raw.trim().parse().ok()
                }
            }
        )*
    };
}

impl_from_env_for_numbers!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Read `key` from the environment, converted to the type of `default`
///
/// ```rust
/// use strata_core::config::env;
///
/// let port = env("STRATA_DOC_UNSET_PORT", 3000u16);
/// assert_eq!(port, 3000);
/// ```
pub fn env<T: FromEnv>(key: &str, default: T) -> T {
    let raw = match env::var(key) {
        Ok(raw) => raw,
        Err(VarError::NotPresent) => return default,
        Err(VarError::NotUnicode(raw)) => {
            tracing::warn!(
                "Environment variable {} is not valid unicode ('{}'), using default",
                key,
                raw.to_string_lossy()
            );
            return default;
        }
    };

    match T::from_env_str(&raw) {
        Some(value) => value,
        None => {
            tracing::warn!(
                "Environment variable {} has invalid value '{}' for {}, using default",
                key,
                raw,
                std::any::type_name::<T>()
            );
            default
        }
    }
}

/// Read a string variable with a borrowed default
pub fn env_str(key: &str, default: &str) -> String {
    env(key, default.to_string())
}

fn dotenv_disabled() -> bool {
    env("DOTENV_DISABLED", false)
}

/// Load `.env` from the current directory or its ancestors
///
/// Returns the loaded path, `None` when no file exists or loading is disabled.
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    if dotenv_disabled() {
        tracing::debug!("DOTENV_DISABLED is set, skipping .env");
        return Ok(None);
    }

    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Ok(Some(path))
        }
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Load a specific dotenv file, `false` when it does not exist or loading is disabled
pub fn load_dotenv_from(path: impl AsRef<Path>) -> Result<bool, ConfigError> {
    let path = path.as_ref();
    if dotenv_disabled() {
        tracing::debug!("DOTENV_DISABLED is set, skipping {}", path.display());
        return Ok(false);
    }

    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Ok(true)
        }
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e.into()),
    }
}
