use crate::config::{self, empty_tree, merge, ConfigError, ConfigTree};
use crate::providers::{provider_factory, ProviderError, ProviderFactory, ServiceProvider};
use std::path::Path;

/// What to bootstrap: an ordered provider list plus explicit overrides
///
/// ```rust
/// use strata_core::bootstrap::BootstrapOptions;
/// use strata_core::providers::LoggerProvider;
/// use serde_json::json;
///
/// let options = BootstrapOptions::new()
///     .provider::<LoggerProvider>()
///     .with_overrides(json!({"log": {"level": "warn"}}));
///
/// assert_eq!(options.provider_count(), 1);
/// ```
pub struct BootstrapOptions {
    pub(crate) providers: Vec<ProviderFactory>,
    pub(crate) overrides: ConfigTree,
}

impl BootstrapOptions {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            overrides: empty_tree(),
        }
    }

    /// Append a provider built from `Default`
    pub fn provider<P>(mut self) -> Self
    where
        P: ServiceProvider + Default + 'static,
    {
        self.providers.push(provider_factory::<P>());
        self
    }

    /// Append a provider built by `factory`, which may fail
    pub fn provider_with<F, P>(mut self, factory: F) -> Self
    where
        F: Fn() -> Result<P, ProviderError> + Send + Sync + 'static,
        P: ServiceProvider + 'static,
    {
        self.providers.push(Box::new(move || {
            factory().map(|provider| Box::new(provider) as Box<dyn ServiceProvider>)
        }));
        self
    }

    /// Merge `overrides` into the explicit override tree
    ///
    /// Repeated calls layer on each other, later calls win.
    pub fn with_overrides(mut self, overrides: ConfigTree) -> Self {
        self.overrides = merge(&self.overrides, &overrides);
        self
    }

    /// Merge overrides parsed from a YAML document
    pub fn overrides_from_yaml(self, text: &str) -> Result<Self, ConfigError> {
        let overrides = config::tree_from_yaml(text)?;
        Ok(self.with_overrides(overrides))
    }

    /// Merge overrides loaded from a `.json`, `.yaml` or `.yml` file
    pub fn overrides_from_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let overrides = config::tree_from_file(path)?;
        Ok(self.with_overrides(overrides))
    }

    /// Number of configured providers
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// The explicit override tree
    pub fn overrides(&self) -> &ConfigTree {
        &self.overrides
    }
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BootstrapOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapOptions")
            .field("providers", &self.providers.len())
            .field("overrides", &self.overrides)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::LoggerProvider;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_overrides_layer_on_each_other() {
        let options = BootstrapOptions::new()
            .with_overrides(json!({"app": {"name": "demo", "debug": false}}))
            .with_overrides(json!({"app": {"debug": true}}));

        assert_eq!(
            options.overrides(),
            &json!({"app": {"name": "demo", "debug": true}})
        );
    }

    #[test]
    fn test_overrides_from_yaml() {
        let options = BootstrapOptions::new()
            .overrides_from_yaml("log:\n  level: error\n  format: json\n")
            .unwrap();

        assert_eq!(
            options.overrides(),
            &json!({"log": {"level": "error", "format": "json"}})
        );
    }

    #[test]
    fn test_overrides_from_yaml_rejects_scalar_root() {
        let result = BootstrapOptions::new().overrides_from_yaml("just a string");

        assert!(matches!(result, Err(ConfigError::ParsingError { .. })));
    }

    #[test]
    fn test_overrides_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"cache": {{"ttl": 30}}}}"#).unwrap();

        let options = BootstrapOptions::new()
            .overrides_from_file(file.path())
            .unwrap();

        assert_eq!(options.overrides(), &json!({"cache": {"ttl": 30}}));
    }

    #[test]
    fn test_providers_keep_order() {
        let options = BootstrapOptions::new()
            .provider::<LoggerProvider>()
            .provider_with(|| Ok(LoggerProvider::new()));

        assert_eq!(options.provider_count(), 2);
        let names: Vec<_> = options
            .providers
            .iter()
            .map(|factory| factory().unwrap().name())
            .collect();
        assert_eq!(names, vec!["LoggerProvider", "LoggerProvider"]);
    }
}
