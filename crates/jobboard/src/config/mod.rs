pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_from_str, resolve_seed_path};
pub use schema::{Config, Environment, LogFormat, LoggingConfig};
