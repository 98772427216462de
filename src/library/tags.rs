use std::path::Path;

use lofty::prelude::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use thiserror::Error;

/// Tempo, key and duration embedded in an audio file, where present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddedMetadata {
    pub bpm: Option<f64>,
    pub key: Option<String>,
    pub duration: Option<f64>,
}

#[derive(Debug, Error)]
#[error("failed to read tags from {path}: {message}")]
pub struct TagError {
    pub path: String,
    pub message: String,
}

/// Source of embedded metadata for a file.
///
/// Failures are recoverable: the classifier falls back to filename inference.
pub trait TagReader: Sync {
    fn read(&self, path: &Path) -> Result<EmbeddedMetadata, TagError>;
}

/// Reads tags and audio properties with `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagReader;

impl TagReader for LoftyTagReader {
    fn read(&self, path: &Path) -> Result<EmbeddedMetadata, TagError> {
        let tagged = lofty::read_from_path(path).map_err(|e| TagError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut meta = EmbeddedMetadata {
            duration: Some(tagged.properties().duration().as_secs_f64()),
            ..EmbeddedMetadata::default()
        };

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            for item in tag.items() {
                let Some(text) = item.value().text().map(str::trim).filter(|s| !s.is_empty())
                else {
                    continue;
                };
                match item.key() {
                    ItemKey::Bpm | ItemKey::IntegerBpm if meta.bpm.is_none() => {
                        meta.bpm = parse_bpm(text);
                    }
                    ItemKey::InitialKey if meta.key.is_none() => {
                        meta.key = Some(text.to_string());
                    }
                    _ => {}
                }
            }
        }

        Ok(meta)
    }
}

/// Tag tempo values are free text ("128", "127.98", "0"); zero means unset.
fn parse_bpm(text: &str) -> Option<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|bpm| bpm.is_finite() && *bpm > 0.0)
}
