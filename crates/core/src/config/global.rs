//! Process-wide configuration accessor.
//!
//! A thin convenience layer over the explicit [`Config`] handle returned by
//! bootstrap. Re-bootstrapping swaps the whole configuration at once, so a
//! reader holds either the old tree or the new one, never a mix.

use crate::config::{Config, ConfigError};
use arc_swap::ArcSwapOption;
use serde::de::DeserializeOwned;
use std::sync::{Arc, LazyLock};

static GLOBAL: LazyLock<ArcSwapOption<Config>> = LazyLock::new(ArcSwapOption::empty);

/// Publish a configuration as the process-wide instance
pub fn publish(config: Arc<Config>) {
    GLOBAL.store(Some(config));
}

/// The current process-wide configuration
pub fn global() -> Result<Arc<Config>, ConfigError> {
    GLOBAL.load_full().ok_or(ConfigError::Uninitialized)
}

/// Check if a configuration has been published
pub fn is_initialized() -> bool {
    GLOBAL.load().is_some()
}

/// Typed lookup against the process-wide configuration
pub fn get<T: DeserializeOwned>(path: &str) -> Result<T, ConfigError> {
    global()?.get(path)
}

/// Typed lookup with fallback against the process-wide configuration
pub fn get_or<T: DeserializeOwned>(path: &str, default: T) -> Result<T, ConfigError> {
    global()?.get_or(path, default)
}

/// Best-effort lookup against the process-wide configuration
///
/// Returns `None` before bootstrap as well as for missing paths.
pub fn maybe<T: DeserializeOwned>(path: &str) -> Option<T> {
    global().ok()?.maybe(path)
}

#[cfg(test)]
pub(crate) fn clear() {
    GLOBAL.store(None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_access_before_publish_is_uninitialized() {
        clear();

        assert!(!is_initialized());
        assert!(global().unwrap_err().is_uninitialized());
        assert!(get::<String>("log.level").unwrap_err().is_uninitialized());
        assert!(get_or("log.level", "info".to_string())
            .unwrap_err()
            .is_uninitialized());
        assert_eq!(maybe::<String>("log.level"), None);
    }

    #[test]
    #[serial]
    fn test_publish_replaces_whole_tree() {
        clear();

        let config = Config::new(json!({"log": {"level": "info", "format": "json"}}));
        publish(Arc::new(config));
        let first = global().unwrap();

        publish(Arc::new(Config::new(json!({"log": {"level": "debug"}}))));

        // Readers holding the old handle keep a consistent view
        assert_eq!(first.get::<String>("log.format").unwrap(), "json");
        assert_eq!(get::<String>("log.level").unwrap(), "debug");
        assert_eq!(maybe::<String>("log.format"), None);

        clear();
    }
}
