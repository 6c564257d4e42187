use crate::container::autowiring::{Dependency, ErasedService, Injectable, ResolvedDependencies};
use crate::container::error::BoxError;
use crate::container::tokens::ServiceToken;
use crate::container::{Container, ContainerError};
use std::marker::PhantomData;
use std::sync::Arc;

type ConstructFn =
    Box<dyn Fn(&mut ResolvedDependencies) -> Result<ErasedService, ContainerError> + Send + Sync>;
type FactoryFn = Box<dyn Fn() -> Result<ErasedService, ContainerError> + Send + Sync>;
type InstanceFn = Box<dyn Fn() -> ErasedService + Send + Sync>;

/// How a binding produces its instance
pub(crate) enum Strategy {
    /// Construct a type, resolving its declared dependencies first
    Class {
        implementation: &'static str,
        dependencies: Vec<Dependency>,
        construct: ConstructFn,
    },
    /// Hand out a pre-built instance
    Instance(InstanceFn),
    /// Call a zero-argument factory once
    Factory(FactoryFn),
}

impl Strategy {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Strategy::Class { .. } => "class",
            Strategy::Instance(_) => "instance",
            Strategy::Factory(_) => "factory",
        }
    }
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Class {
                implementation,
                dependencies,
                ..
            } => f
                .debug_struct("Class")
                .field("implementation", implementation)
                .field("dependencies", dependencies)
                .finish(),
            Strategy::Instance(_) => write!(f, "Instance(<instance>)"),
            Strategy::Factory(_) => write!(f, "Factory(<factory_fn>)"),
        }
    }
}

/// What a service identifier is bound to
pub struct Target<S: ?Sized> {
    pub(crate) strategy: Strategy,
    _service: PhantomData<fn() -> Arc<S>>,
}

impl<S: ?Sized + Send + Sync + 'static> Target<S> {
    fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            _service: PhantomData,
        }
    }

    /// Construct `I` on first resolution, injecting its declared dependencies
    pub fn class<I: Injectable<S>>() -> Self {
        Self::new(Strategy::Class {
            implementation: std::any::type_name::<I>(),
            dependencies: I::dependencies(),
            construct: Box::new(|deps: &mut ResolvedDependencies| {
                let service: Arc<S> = I::construct(deps)?;
                Ok(Box::new(service) as ErasedService)
            }),
        })
    }

    /// Resolve to an existing instance
    pub fn instance(instance: Arc<S>) -> Self {
        Self::new(Strategy::Instance(Box::new(move || {
            Box::new(Arc::clone(&instance)) as ErasedService
        })))
    }

    /// Resolve by calling `factory` once
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn() -> Arc<S> + Send + Sync + 'static,
    {
        Self::new(Strategy::Factory(Box::new(move || {
            Ok(Box::new(factory()) as ErasedService)
        })))
    }

    /// Resolve by calling a fallible `factory` once
    ///
    /// A factory error surfaces from resolution as `ConstructionFailure`.
    pub fn try_factory<F, E>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<S>, E> + Send + Sync + 'static,
        E: Into<BoxError> + 'static,
    {
        Self::new(Strategy::Factory(Box::new(move || match factory() {
            Ok(service) => Ok(Box::new(service) as ErasedService),
            Err(e) => Err(ContainerError::construction(std::any::type_name::<S>(), e)),
        })))
    }
}

/// Fluent binder returned by [`Container::bind`]
pub struct Binder<'a, T: ServiceToken> {
    container: &'a Container,
    _token: PhantomData<fn() -> T>,
}

impl<'a, T: ServiceToken> Binder<'a, T> {
    pub(crate) fn new(container: &'a Container) -> Self {
        Self {
            container,
            _token: PhantomData,
        }
    }

    /// Bind the token to a target
    ///
    /// The first binding of a token wins, later calls are ignored.
    pub fn to(self, target: Target<T::Service>) {
        self.container.insert_binding::<T>(target.strategy);
    }

    /// Shorthand for `to(Target::class::<I>())`
    pub fn to_class<I: Injectable<T::Service>>(self) {
        self.to(Target::class::<I>())
    }

    /// Shorthand for `to(Target::instance(instance))`
    pub fn to_instance(self, instance: Arc<T::Service>) {
        self.to(Target::instance(instance))
    }

    /// Shorthand for `to(Target::factory(factory))`
    pub fn to_factory<F>(self, factory: F)
    where
        F: Fn() -> Arc<T::Service> + Send + Sync + 'static,
    {
        self.to(Target::factory(factory))
    }
}
