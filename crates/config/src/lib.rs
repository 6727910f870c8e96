//! Flat-key configuration management.
//!
//! This crate loads JSON, YAML, TOML and INI configuration files into a flat
//! key space (`database.port`), lets callers update existing keys, overlays
//! environment variables, and writes the result back in any supported format.
//!
//! ```rust,ignore
//! let mut manager = ConfigManager::new();
//! manager.load_file("config.yaml")?;
//! manager.apply_env(&EnvOverlay::with_prefix("MYAPP"))?;
//! manager.store().update_one("server.port", 8081)?;
//! manager.save()?;
//! ```

mod env;
mod error;
pub mod flatten;
pub mod format;
mod manager;
mod persistence;
mod store;
mod value;

pub use env::{EnvOverlay, env_var_or_none, load_dotenv, overlay_name};
pub use error::{ConfigError, ErrorCategory};
pub use flatten::{flatten, flatten_strict, unflatten};
pub use format::{Codec, Format};
pub use manager::{ConfigManager, read_document};
pub use store::Store;
pub use value::{FlatMap, NestedMap, NestedValue, Scalar};
