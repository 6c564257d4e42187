use crate::config::{ConfigSource, ConfigTree};
use crate::container::Container;
use crate::errors::BootstrapError;
use crate::providers::{ProviderFactory, ServiceProvider};

/// Provider registry holds the instantiated providers in declaration order
///
/// Every phase walks the providers in the order their factories were given.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn ServiceProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Instantiate one provider per factory, stopping at the first failure
    pub fn instantiate(factories: &[ProviderFactory]) -> Result<Self, BootstrapError> {
        let mut registry = Self::new();

        for (index, factory) in factories.iter().enumerate() {
            let provider =
                factory().map_err(|source| BootstrapError::Instantiate { index, source })?;
            tracing::debug!("Instantiated provider: {}", provider.name());
            registry.push(provider);
        }

        Ok(registry)
    }

    /// Add an already built provider
    pub fn push(&mut self, provider: Box<dyn ServiceProvider>) {
        self.providers.push(provider);
    }

    /// Get the number of registered providers
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Provider names in order
    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Default configuration fragments, in provider order
    pub fn collect_defaults(&self) -> Vec<(ConfigSource, ConfigTree)> {
        self.providers
            .iter()
            .filter_map(|provider| {
                let defaults = provider.default_config()?;
                let source = ConfigSource::Provider(provider.name().to_string());
                tracing::debug!("Collected defaults from {}", source);
                Some((source, defaults))
            })
            .collect()
    }

    /// Run the register phase for every provider
    pub fn register_all(&self, container: &Container) -> Result<(), BootstrapError> {
        for provider in &self.providers {
            tracing::info!("Registering provider: {}", provider.name());
            provider
                .register(container)
                .map_err(|source| BootstrapError::Register {
                    provider: provider.name().to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Run the boot phase for every provider, one at a time
    ///
    /// Each boot completes before the next provider's boot starts.
    pub async fn boot_all(&self, container: &Container) -> Result<(), BootstrapError> {
        for provider in &self.providers {
            tracing::info!("Booting provider: {}", provider.name());
            provider
                .boot(container)
                .await
                .map_err(|source| BootstrapError::Boot {
                    provider: provider.name().to_string(),
                    source,
                })?;
        }
        Ok(())
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
