//! Service tokens: the abstract identifiers bindings are registered under.
//!
//! A token is a zero-sized type naming a service. Its associated `Service`
//! type is what resolution hands back, usually a trait object:
//!
//! ```rust
//! use strata_core::container::{Container, ServiceToken, Target};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English;
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//!
//! struct GreeterToken;
//! impl ServiceToken for GreeterToken {
//!     type Service = dyn Greeter;
//! }
//!
//! let container = Container::new();
//! container.bind::<GreeterToken>().to(Target::instance(Arc::new(English)));
//!
//! let greeter = container.get::<GreeterToken>().unwrap();
//! assert_eq!(greeter.greet(), "hello");
//! ```

use crate::container::descriptor::ServiceId;

/// Trait for tokens identifying a service in the container
pub trait ServiceToken: Send + Sync + 'static {
    /// The service type this token resolves to
    type Service: ?Sized + Send + Sync + 'static;

    /// Identifier used as the binding key
    fn service_id() -> ServiceId {
        ServiceId::of::<Self>()
    }

    /// Get the type name of the service
    fn service_type_name() -> &'static str {
        std::any::type_name::<Self::Service>()
    }

    /// Get the token type name
    fn token_type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Declare one or more service tokens
///
/// ```rust
/// use strata_core::service_token;
///
/// pub trait Mailer: Send + Sync {}
///
/// service_token! {
///     /// Outgoing mail
///     pub MailerToken => dyn Mailer;
/// }
/// ```
#[macro_export]
macro_rules! service_token {
    ($($(#[$meta:meta])* $vis:vis $token:ident => $service:ty;)+) => {
        $(
            $(#[$meta])*
            $vis struct $token;

            impl $crate::container::ServiceToken for $token {
                type Service = $service;
            }
        )+
    };
}
