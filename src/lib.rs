//! Sample ingestion and cataloging.
//!
//! Point it at folders or loose audio files: they are scanned, tagged with a
//! category, tempo and key inferred from embedded tags or the filename, and
//! recorded in a path-keyed SQLite catalog.

pub mod cancel;
pub mod catalog;
pub mod config;
pub mod error;
pub mod import;
pub mod library;

pub use cancel::CancelToken;
pub use catalog::{Catalog, CatalogError};
pub use error::Error;
pub use import::{ImportOutcome, ImportRequest, ImportResult, Importer, SourceMode};
pub use library::{Category, Sample};
