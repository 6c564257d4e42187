use crate::config::{ConfigError, ConfigTree};
use crate::container::{BoxError, Container, ContainerError};
use async_trait::async_trait;

/// Provider error type
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider construction failed: {source}")]
    ConstructionFailed {
        #[source]
        source: BoxError,
    },

    #[error("Provider registration failed: {message}")]
    RegistrationFailed { message: String },

    #[error("Provider boot failed: {source}")]
    BootFailed {
        #[source]
        source: BoxError,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Container error: {0}")]
    Container(#[from] ContainerError),
}

impl ProviderError {
    /// Create a construction error
    pub fn construction(source: impl Into<BoxError>) -> Self {
        Self::ConstructionFailed {
            source: source.into(),
        }
    }

    /// Create a registration error
    pub fn registration(message: impl Into<String>) -> Self {
        Self::RegistrationFailed {
            message: message.into(),
        }
    }

    /// Create a boot error
    pub fn boot(source: impl Into<BoxError>) -> Self {
        Self::BootFailed {
            source: source.into(),
        }
    }
}

/// Service provider: contributes configuration defaults and service bindings
///
/// The lifecycle calls `default_config` on every provider first, then
/// `register` on every provider once configuration is final, then `boot` on
/// every provider once all bindings exist.
#[async_trait]
pub trait ServiceProvider: Send + Sync {
    /// Provider name for logs and error reports
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Default configuration fragment, merged in provider order
    fn default_config(&self) -> Option<ConfigTree> {
        None
    }

    /// Register services in the container
    fn register(&self, container: &Container) -> Result<(), ProviderError>;

    /// Boot the provider after every provider has registered
    async fn boot(&self, container: &Container) -> Result<(), ProviderError>;
}

/// Constructs a provider at the start of bootstrap
pub type ProviderFactory =
    Box<dyn Fn() -> Result<Box<dyn ServiceProvider>, ProviderError> + Send + Sync>;

/// Factory for a provider built from `Default`
pub fn provider_factory<P>() -> ProviderFactory
where
    P: ServiceProvider + Default + 'static,
{
    Box::new(|| Ok(Box::new(P::default()) as Box<dyn ServiceProvider>))
}

/// Macro to simplify provider creation
///
/// ```rust
/// use strata_core::provider;
/// use serde_json::json;
///
/// let provider = provider! {
///     name: "cache",
///     config: json!({"cache": {"ttl": 60}}),
///     register: |container| { Ok(()) },
///     boot: |container| { Ok(()) }
/// };
/// ```
#[macro_export]
macro_rules! provider {
    (
        name: $name:expr,
        $(config: $config:expr,)?
        register: |$builder:ident| $register:block
        $(, boot: |$container:ident| $boot:block)?
    ) => {
        {
            struct CustomProvider;

            #[$crate::__private::async_trait]
            impl $crate::providers::ServiceProvider for CustomProvider {
                fn name(&self) -> &'static str {
                    $name
                }

                $(fn default_config(&self) -> Option<$crate::config::ConfigTree> {
                    Some($config)
                })?

                #[allow(unused_variables)]
                fn register(&self, $builder: &$crate::container::Container)
                    -> Result<(), $crate::providers::ProviderError>
                {
                    $register
                }

                #[allow(unused_variables, unreachable_code)]
                async fn boot(&self, container: &$crate::container::Container)
                    -> Result<(), $crate::providers::ProviderError>
                {
                    $(
                        let $container = container;
                        return $boot;
                    )?
                    Ok(())
                }
            }

            CustomProvider
        }
    };
}
