//! Constructor injection.
//!
//! A type bound with [`Target::class`](crate::container::Target::class)
//! declares the services its constructor needs as an ordered list of
//! [`Dependency`] values. The container resolves them left to right against
//! itself before calling [`Injectable::construct`], which then takes them out
//! of [`ResolvedDependencies`] in the same order.
//!
//! ```rust
//! use strata_core::container::{
//!     Container, ContainerError, Dependency, Injectable, ResolvedDependencies, Target,
//! };
//! use strata_core::service_token;
//! use std::sync::Arc;
//!
//! pub struct Clock;
//!
//! pub struct Scheduler {
//!     clock: Arc<Clock>,
//! }
//!
//! service_token! {
//!     ClockToken => Clock;
//!     SchedulerToken => Scheduler;
//! }
//!
//! impl Injectable<Scheduler> for Scheduler {
//!     fn dependencies() -> Vec<Dependency> {
//!         vec![Dependency::on::<ClockToken>()]
//!     }
//!
//!     fn construct(deps: &mut ResolvedDependencies) -> Result<Arc<Scheduler>, ContainerError> {
//!         Ok(Arc::new(Scheduler { clock: deps.next::<ClockToken>()? }))
//!     }
//! }
//!
//! let container = Container::new();
//! container.bind::<ClockToken>().to(Target::instance(Arc::new(Clock)));
//! container.bind::<SchedulerToken>().to(Target::class::<Scheduler>());
//!
//! let scheduler = container.get::<SchedulerToken>().unwrap();
//! assert!(Arc::ptr_eq(&scheduler.clock, &container.get::<ClockToken>().unwrap()));
//! ```

use crate::container::descriptor::ServiceId;
use crate::container::tokens::ServiceToken;
use crate::container::{Container, ContainerError};
use std::any::Any;
use std::sync::Arc;

/// Type-erased resolved service, always an `Arc<Token::Service>` inside
pub(crate) type ErasedService = Box<dyn Any + Send + Sync>;

type ErasedResolver = fn(&Container) -> Result<ErasedService, ContainerError>;

/// Trait for types the container can construct itself
pub trait Injectable<S: ?Sized + Send + Sync + 'static>: Send + Sync + 'static {
    /// Constructor dependencies, in parameter order
    fn dependencies() -> Vec<Dependency> {
        Vec::new()
    }

    /// Build the service from its already resolved dependencies
    fn construct(deps: &mut ResolvedDependencies) -> Result<Arc<S>, ContainerError>;
}

/// A single constructor dependency on another binding
#[derive(Clone)]
pub struct Dependency {
    service_id: ServiceId,
    resolve: ErasedResolver,
}

impl Dependency {
    /// Depend on the service bound under `T`
    pub fn on<T: ServiceToken>() -> Self {
        Self {
            service_id: T::service_id(),
            resolve: resolve_erased::<T>,
        }
    }

    /// The identifier this dependency resolves
    pub fn service_id(&self) -> &ServiceId {
        &self.service_id
    }

    pub(crate) fn resolve(&self, container: &Container) -> Result<ErasedService, ContainerError> {
        (self.resolve)(container)
    }
}

impl std::fmt::Debug for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Dependency")
            .field(&self.service_id.type_name)
            .finish()
    }
}

fn resolve_erased<T: ServiceToken>(container: &Container) -> Result<ErasedService, ContainerError> {
    let service: Arc<T::Service> = container.get::<T>()?;
    Ok(Box::new(service))
}

/// Dependencies resolved for one constructor call, consumed in declaration order
pub struct ResolvedDependencies {
    service: &'static str,
    values: std::vec::IntoIter<(ServiceId, ErasedService)>,
}

impl ResolvedDependencies {
    pub(crate) fn new(service: &'static str, values: Vec<(ServiceId, ErasedService)>) -> Self {
        Self {
            service,
            values: values.into_iter(),
        }
    }

    /// Take the next dependency, which must have been declared as `T`
    pub fn next<T: ServiceToken>(&mut self) -> Result<Arc<T::Service>, ContainerError> {
        let (service_id, value) = self.values.next().ok_or_else(|| {
            ContainerError::dependency_mismatch(
                self.service,
                format!(
                    "requested {} beyond the declared dependencies",
                    T::token_type_name()
                ),
            )
        })?;

        if service_id != T::service_id() {
            return Err(ContainerError::dependency_mismatch(
                self.service,
                format!(
                    "requested {} but the next declared dependency is {}",
                    T::token_type_name(),
                    service_id
                ),
            ));
        }

        value
            .downcast::<Arc<T::Service>>()
            .map(|service| *service)
            .map_err(|_| {
                ContainerError::dependency_mismatch(
                    self.service,
                    format!("{} resolved to an unexpected type", T::token_type_name()),
                )
            })
    }

    /// Number of dependencies not yet taken
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}
