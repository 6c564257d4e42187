pub mod env;
pub mod error;
pub mod global;
pub mod merge;
pub mod sources;
pub mod store;

pub use env::{env, env_str, load_dotenv, load_dotenv_from, FromEnv};
pub use error::*;
pub use global::{get, get_or, global, is_initialized, maybe, publish};
pub use merge::{empty_tree, merge, merge_all, ConfigTree};
pub use sources::*;
pub use store::*;
