//! Configuration loader and schema types.
//!
//! Settings come from an optional TOML file and `SAMPLEDEX__` environment
//! variables, falling back to struct defaults.

mod load;
mod schema;

pub use load::{default_config_path, default_catalog_path, resolve_config_path};
pub use schema::*;
