use thiserror::Error;

use crate::catalog::CatalogError;

/// Errors surfaced to callers of the crate.
///
/// Per-file problems never show up here; they are skipped and reported in
/// scan/import reports instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("config error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
