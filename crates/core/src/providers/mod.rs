pub mod lifecycle;
pub mod logger;
pub mod provider;
pub mod registry;

pub use lifecycle::*;
pub use logger::LoggerProvider;
pub use provider::*;
pub use registry::*;
