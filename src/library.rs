//! Sample library: scanning, tag reading and classification.
//!
//! `scan` only enumerates candidate files; `classify` turns one path into a
//! `Sample`. Keeping them apart lets the importer fan classification out over
//! workers.

mod classify;
mod model;
mod scan;
mod tags;

pub use classify::*;
pub use model::*;
pub use scan::*;
pub use tags::*;

#[cfg(test)]
mod tests;
