use crate::container::autowiring::{ErasedService, ResolvedDependencies};
use crate::container::binding::{Binder, Strategy};
use crate::container::descriptor::ServiceId;
use crate::container::tokens::ServiceToken;
use crate::container::ContainerError;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Dependency injection container with singleton resolution
///
/// Every binding is resolved at most once; the instance is cached for the
/// lifetime of the container. Locks are never held while a service is being
/// constructed, so constructors may resolve other services freely.
pub struct Container {
    bindings: RwLock<HashMap<ServiceId, Arc<Strategy>>>,
    instances: RwLock<HashMap<ServiceId, ErasedService>>,
}

impl Container {
    /// Create an empty container
    pub fn new() -> Self {
        Self {
            bindings: RwLock::new(HashMap::new()),
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// Start binding a token using the fluent API
    pub fn bind<T: ServiceToken>(&self) -> Binder<'_, T> {
        Binder::new(self)
    }

    /// Resolve the service bound under `T`
    pub fn get<T: ServiceToken>(&self) -> Result<Arc<T::Service>, ContainerError> {
        let service_id = T::service_id();

        if let Some(instance) = self.read_instances().get(&service_id) {
            return Self::downcast::<T>(instance);
        }

        let strategy = self
            .read_bindings()
            .get(&service_id)
            .cloned()
            .ok_or_else(|| ContainerError::unbound(T::token_type_name()))?;

        tracing::debug!(
            "Resolving {} via {} binding",
            service_id.short_name(),
            strategy.kind()
        );
        let instance = self.activate(&strategy)?;

        // A concurrent resolution may have finished first; keep whichever landed first
        let mut instances = self.write_instances();
        let cached = instances.entry(service_id).or_insert(instance);
        Self::downcast::<T>(cached)
    }

    /// Resolve the service bound under `T`, `None` on any failure
    pub fn try_get<T: ServiceToken>(&self) -> Option<Arc<T::Service>> {
        self.get::<T>().ok()
    }

    /// Check if `T` has a binding
    pub fn contains<T: ServiceToken>(&self) -> bool {
        self.read_bindings().contains_key(&T::service_id())
    }

    /// Check if `T` has already been resolved and cached
    pub fn is_resolved<T: ServiceToken>(&self) -> bool {
        self.read_instances().contains_key(&T::service_id())
    }

    /// Get the number of bindings
    pub fn binding_count(&self) -> usize {
        self.read_bindings().len()
    }

    /// Get the number of resolved instances
    pub fn resolved_count(&self) -> usize {
        self.read_instances().len()
    }

    /// Get a list of all bound identifiers
    pub fn registered_services(&self) -> Vec<ServiceId> {
        self.read_bindings().keys().cloned().collect()
    }

    pub(crate) fn insert_binding<T: ServiceToken>(&self, strategy: Strategy) {
        let service_id = T::service_id();
        let mut bindings = self.write_bindings();

        if bindings.contains_key(&service_id) {
            tracing::debug!(
                "Ignoring {} binding for {}: already bound",
                strategy.kind(),
                service_id.short_name()
            );
            return;
        }

        tracing::debug!("Binding {} to {:?}", service_id.short_name(), strategy);
        bindings.insert(service_id, Arc::new(strategy));
    }

    fn activate(&self, strategy: &Strategy) -> Result<ErasedService, ContainerError> {
        match strategy {
            Strategy::Instance(instance) => Ok(instance()),
            Strategy::Factory(factory) => factory(),
            Strategy::Class {
                implementation,
                dependencies,
                construct,
            } => {
                let mut resolved = Vec::with_capacity(dependencies.len());
                for dependency in dependencies {
                    let service = dependency.resolve(self)?;
                    resolved.push((dependency.service_id().clone(), service));
                }

                construct(&mut ResolvedDependencies::new(*implementation, resolved))
            }
        }
    }

    fn downcast<T: ServiceToken>(
        instance: &ErasedService,
    ) -> Result<Arc<T::Service>, ContainerError> {
        instance
            .downcast_ref::<Arc<T::Service>>()
            .cloned()
            .ok_or_else(|| {
                ContainerError::dependency_mismatch(
                    T::token_type_name(),
                    format!("cached instance is not a {}", T::service_type_name()),
                )
            })
    }

    fn read_bindings(&self) -> RwLockReadGuard<'_, HashMap<ServiceId, Arc<Strategy>>> {
        self.bindings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_bindings(&self) -> RwLockWriteGuard<'_, HashMap<ServiceId, Arc<Strategy>>> {
        self.bindings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn read_instances(&self) -> RwLockReadGuard<'_, HashMap<ServiceId, ErasedService>> {
        self.instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_instances(&self) -> RwLockWriteGuard<'_, HashMap<ServiceId, ErasedService>> {
        self.instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("binding_count", &self.binding_count())
            .field("resolved_count", &self.resolved_count())
            .finish()
    }
}
