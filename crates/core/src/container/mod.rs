pub mod autowiring;
pub mod binding;
#[allow(clippy::module_inception)]
pub mod container;
pub mod descriptor;
pub mod error;
pub mod tokens;

pub use autowiring::{Dependency, Injectable, ResolvedDependencies};
pub use binding::{Binder, Target};
pub use container::Container;
pub use descriptor::ServiceId;
pub use error::{BoxError, ContainerError};
pub use tokens::ServiceToken;
