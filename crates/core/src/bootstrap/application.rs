use crate::bootstrap::{BootstrapOptions, BootstrapResult};
use crate::config::{self, Config};
use crate::container::Container;
use crate::providers::{ProviderLifecycleManager, ProviderLifecycleStats};
use std::sync::Arc;

/// A bootstrapped application: its configuration and container
///
/// Created by [`Application::bootstrap`]. The configuration handle is the
/// same instance that was published process-wide and bound under
/// [`ConfigToken`](crate::config::ConfigToken).
#[derive(Debug)]
pub struct Application {
    config: Arc<Config>,
    container: Container,
    providers: Vec<&'static str>,
    stats: ProviderLifecycleStats,
}

impl Application {
    /// Run the provider lifecycle described by `options`
    ///
    /// A `.env` file in the working directory is loaded first, see
    /// [`load_dotenv`](crate::config::load_dotenv).
    ///
    /// Bootstrapping again replaces the process-wide configuration as a whole.
    /// A failed bootstrap leaves whatever the failing phase already applied.
    pub async fn bootstrap(options: BootstrapOptions) -> BootstrapResult<Self> {
        let BootstrapOptions {
            providers,
            overrides,
        } = options;

        tracing::info!("Bootstrap: {} providers configured", providers.len());

        // provider defaults read the environment
        config::load_dotenv()?;

        let container = Container::new();
        let mut manager = ProviderLifecycleManager::new(providers).with_overrides(overrides);
        let config = manager.execute_lifecycle(&container).await?;

        Ok(Self {
            config,
            container,
            providers: manager.registry().names(),
            stats: manager.lifecycle_stats().clone(),
        })
    }

    /// The committed configuration
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// The container every provider registered into
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Provider names, in lifecycle order
    pub fn providers(&self) -> &[&'static str] {
        &self.providers
    }

    /// Phase timings of the bootstrap that produced this application
    pub fn lifecycle_stats(&self) -> &ProviderLifecycleStats {
        &self.stats
    }

    /// Start the application
    pub fn run(&self) {
        tracing::info!(
            "Application started with {} providers and {} bindings",
            self.providers.len(),
            self.container.binding_count()
        );
    }
}

/// Bootstrap and return the configuration handle
pub async fn bootstrap(options: BootstrapOptions) -> BootstrapResult<Arc<Config>> {
    let app = Application::bootstrap(options).await?;
    Ok(Arc::clone(app.config()))
}
