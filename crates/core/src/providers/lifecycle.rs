use crate::config::{self, empty_tree, Config, ConfigSource, ConfigToken, ConfigTree};
use crate::container::{Container, Target};
use crate::errors::BootstrapError;
use crate::providers::{ProviderFactory, ProviderRegistry};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Provider lifecycle manager
///
/// Runs instantiate, configure, register and boot strictly one after the
/// other. A failing phase aborts the ones after it, nothing already applied
/// is rolled back.
pub struct ProviderLifecycleManager {
    factories: Vec<ProviderFactory>,
    overrides: ConfigTree,
    registry: ProviderRegistry,
    lifecycle_stats: ProviderLifecycleStats,
}

impl ProviderLifecycleManager {
    /// Create a new provider lifecycle manager
    pub fn new(factories: Vec<ProviderFactory>) -> Self {
        Self {
            factories,
            overrides: empty_tree(),
            registry: ProviderRegistry::new(),
            lifecycle_stats: ProviderLifecycleStats::new(),
        }
    }

    /// Explicit overrides, merged over every provider default
    pub fn with_overrides(mut self, overrides: ConfigTree) -> Self {
        self.overrides = overrides;
        self
    }

    /// Execute the full provider lifecycle against `container`
    ///
    /// The committed configuration is published as the process-wide instance
    /// and bound under [`ConfigToken`] before any provider registers.
    pub async fn execute_lifecycle(
        &mut self,
        container: &Container,
    ) -> Result<Arc<Config>, BootstrapError> {
        let start_time = Instant::now();

        tracing::info!("Starting provider lifecycle execution...");

        let phase_start = Instant::now();
        self.registry = ProviderRegistry::instantiate(&self.factories)?;
        self.lifecycle_stats.provider_count = self.registry.provider_count();
        self.lifecycle_stats.instantiation_time = phase_start.elapsed();

        let phase_start = Instant::now();
        let config = Arc::new(self.configure()?);
        config::publish(Arc::clone(&config));
        container
            .bind::<ConfigToken>()
            .to(Target::instance(Arc::clone(&config)));
        self.lifecycle_stats.configuration_time = phase_start.elapsed();

        let phase_start = Instant::now();
        self.registry.register_all(container)?;
        self.lifecycle_stats.registration_time = phase_start.elapsed();

        let phase_start = Instant::now();
        self.registry.boot_all(container).await?;
        self.lifecycle_stats.boot_time = phase_start.elapsed();

        self.lifecycle_stats.total_time = start_time.elapsed();

        tracing::info!(
            "Provider lifecycle completed successfully in {:?} with {} providers",
            self.lifecycle_stats.total_time,
            self.lifecycle_stats.provider_count
        );

        Ok(config)
    }

    /// Merge provider defaults in order, then the overrides on top
    fn configure(&self) -> Result<Config, BootstrapError> {
        let mut layers = Vec::new();
        for (source, defaults) in self.registry.collect_defaults() {
            layers.push(config::sources::ensure_mapping(defaults, &source)?);
        }

        let overrides =
            config::sources::ensure_mapping(self.overrides.clone(), &ConfigSource::Overrides)?;

        Ok(Config::from_layers(&layers, &overrides))
    }

    /// Get lifecycle statistics
    pub fn lifecycle_stats(&self) -> &ProviderLifecycleStats {
        &self.lifecycle_stats
    }

    /// Get provider registry
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }
}

/// Statistics for provider lifecycle execution
#[derive(Debug, Clone, Default)]
pub struct ProviderLifecycleStats {
    pub provider_count: usize,
    pub total_time: Duration,
    pub instantiation_time: Duration,
    pub configuration_time: Duration,
    pub registration_time: Duration,
    pub boot_time: Duration,
}

impl ProviderLifecycleStats {
    /// Create new lifecycle stats
    pub fn new() -> Self {
        Self::default()
    }
}
