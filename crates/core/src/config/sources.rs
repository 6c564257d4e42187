use crate::config::merge::ConfigTree;
use crate::config::ConfigError;
use std::path::Path;

/// Where a configuration layer came from, for logging and error reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Defaults contributed by a provider
    Provider(String),
    /// Explicit overrides supplied at bootstrap
    Overrides,
    /// Overrides loaded from a file
    File(String),
}

impl ConfigSource {
    /// Check if source is a provider default
    pub fn is_provider(&self) -> bool {
        matches!(self, ConfigSource::Provider(_))
    }

    /// Get source description
    pub fn description(&self) -> String {
        match self {
            ConfigSource::Provider(name) => format!("Provider defaults: {}", name),
            ConfigSource::Overrides => "Explicit overrides".to_string(),
            ConfigSource::File(path) => format!("Configuration file: {}", path),
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Parse a YAML document into a configuration tree
pub fn tree_from_yaml(text: &str) -> Result<ConfigTree, ConfigError> {
    let tree: ConfigTree = serde_yaml::from_str(text)?;
    ensure_mapping(tree, &ConfigSource::Overrides)
}

/// Load a configuration tree from a `.json`, `.yaml` or `.yml` file
pub fn tree_from_file(path: impl AsRef<Path>) -> Result<ConfigTree, ConfigError> {
    let path = path.as_ref();
    let source = ConfigSource::File(path.display().to_string());
    let text = std::fs::read_to_string(path)?;

    let tree: ConfigTree = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&text)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
        other => {
            return Err(ConfigError::parsing(format!(
                "{}: unsupported extension {:?}, expected json, yaml or yml",
                source, other
            )));
        }
    };

    ensure_mapping(tree, &source)
}

/// Reject layers whose root is not a mapping; an empty document counts as `{}`
pub(crate) fn ensure_mapping(
    tree: ConfigTree,
    source: &ConfigSource,
) -> Result<ConfigTree, ConfigError> {
    match tree {
        ConfigTree::Object(_) => Ok(tree),
        ConfigTree::Null => Ok(crate::config::merge::empty_tree()),
        other => Err(ConfigError::parsing(format!(
            "{}: configuration root must be a mapping, got {}",
            source, other
        ))),
    }
}
