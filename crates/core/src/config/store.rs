use crate::config::merge::{empty_tree, merge, merge_all, ConfigTree};
use crate::config::ConfigError;
use crate::container::ServiceToken;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Immutable, merged application configuration with dot-path access
///
/// ```rust
/// use strata_core::config::Config;
/// use serde_json::json;
///
/// let config = Config::new(json!({"log": {"level": "debug"}}));
///
/// assert_eq!(config.get::<String>("log.level").unwrap(), "debug");
/// assert_eq!(config.get_or("log.format", "pretty".to_string()).unwrap(), "pretty");
/// assert_eq!(config.maybe::<String>("log.target"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    tree: ConfigTree,
}

impl Config {
    /// Wrap an already merged tree
    pub fn new(tree: ConfigTree) -> Self {
        Self { tree }
    }

    /// Build from ordered default layers with the overrides applied last
    pub fn from_layers<'a, I>(defaults: I, overrides: &ConfigTree) -> Self
    where
        I: IntoIterator<Item = &'a ConfigTree>,
    {
        Self::new(merge(&merge_all(defaults), overrides))
    }

    /// Look up the raw value at a dot-delimited path
    pub fn value(&self, path: &str) -> Option<&ConfigTree> {
        path.split('.').try_fold(&self.tree, |node, segment| match node {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .filter(|index| index.to_string() == segment)
                .and_then(|index| items.get(index)),
            _ => None,
        })
    }

    /// Get a typed value, failing with `NotFound` when the path is missing
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConfigError> {
        let value = self
            .value(path)
            .ok_or_else(|| ConfigError::not_found(path))?;
        Self::convert(path, value)
    }

    /// Get a typed value, falling back to `default` when the path is missing
    pub fn get_or<T: DeserializeOwned>(&self, path: &str, default: T) -> Result<T, ConfigError> {
        match self.value(path) {
            Some(value) => Self::convert(path, value),
            None => Ok(default),
        }
    }

    /// Best-effort lookup: `None` when missing or not convertible
    pub fn maybe<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        self.value(path)
            .and_then(|value| T::deserialize(value).ok())
    }

    /// Check if a path resolves to a value
    pub fn has(&self, path: &str) -> bool {
        self.value(path).is_some()
    }

    /// The whole merged tree
    pub fn as_tree(&self) -> &ConfigTree {
        &self.tree
    }

    fn convert<T: DeserializeOwned>(path: &str, value: &Value) -> Result<T, ConfigError> {
        T::deserialize(value).map_err(|e| {
            ConfigError::invalid_value(path, std::any::type_name::<T>(), e.to_string())
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(empty_tree())
    }
}

/// Token under which the committed configuration is bound in the container
pub struct ConfigToken;

impl ServiceToken for ConfigToken {
    type Service = Config;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn sample() -> Config {
        Config::new(json!({
            "app": {"name": "strata", "port": 8080, "debug": false},
            "servers": [{"host": "a.internal"}, {"host": "b.internal"}],
            "feature": {"beta": null}
        }))
    }

    #[test]
    fn test_get_traverses_dot_paths() {
        let config = sample();

        assert_eq!(config.get::<String>("app.name").unwrap(), "strata");
        assert_eq!(config.get::<u16>("app.port").unwrap(), 8080);
        assert!(!config.get::<bool>("app.debug").unwrap());
    }

    #[test]
    fn test_get_missing_path_is_not_found() {
        let config = sample();

        let err = config.get::<String>("app.missing").unwrap_err();
        assert!(err.is_not_found());

        // Tree ends before all segments are consumed
        let err = config.get::<String>("app.name.first").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { ref path } if path == "app.name.first"));
    }

    #[test]
    fn test_get_or_and_maybe_on_unset_path() {
        let config = sample();

        assert_eq!(
            config.get_or("app.host", "0.0.0.0".to_string()).unwrap(),
            "0.0.0.0"
        );
        assert_eq!(config.get_or("app.port", 1u16).unwrap(), 8080);
        assert_eq!(config.maybe::<String>("app.host"), None);
        assert_eq!(config.maybe::<u16>("app.port"), Some(8080));
    }

    #[test]
    fn test_array_indices_are_plain_keys() {
        let config = sample();

        assert_eq!(
            config.get::<String>("servers.1.host").unwrap(),
            "b.internal"
        );
        assert!(!config.has("servers.2.host"));
        assert!(!config.has("servers.first.host"));
    }

    #[test]
    fn test_non_canonical_indices_do_not_match() {
        let config = sample();

        assert!(!config.has("servers.01.host"));
        assert!(!config.has("servers.+1.host"));
        assert!(!config.has("servers. 1.host"));
        assert_eq!(
            config.maybe::<String>("servers.0.host").as_deref(),
            Some("a.internal")
        );
    }

    #[test]
    fn test_wrong_type_is_invalid_value() {
        let config = sample();

        let err = config.get::<u16>("app.name").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref path, .. } if path == "app.name"));
        assert_eq!(config.maybe::<u16>("app.name"), None);
    }

    #[test]
    fn test_null_leaf_is_present() {
        let config = sample();

        assert!(config.has("feature.beta"));
        assert_eq!(config.get::<Option<bool>>("feature.beta").unwrap(), None);
    }

    #[test]
    fn test_get_deserializes_subtrees() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct App {
            name: String,
            port: u16,
        }

        let app: App = sample().get("app").unwrap();
        assert_eq!(
            app,
            App {
                name: "strata".to_string(),
                port: 8080,
            }
        );
    }

    #[test]
    fn test_from_layers_precedence() {
        let p1 = json!({"log": {"level": "info"}});
        let p2 = json!({"log": {"level": "debug", "format": "json"}});
        let overrides = json!({"log": {"format": "pretty"}});

        let config = Config::from_layers([&p1, &p2], &overrides);

        assert_eq!(config.get::<String>("log.level").unwrap(), "debug");
        assert_eq!(config.get::<String>("log.format").unwrap(), "pretty");
    }
}
