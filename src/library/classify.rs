use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, SubsecRound, Utc};
use regex::Regex;
use thiserror::Error;

use super::model::{Category, Sample};
use super::tags::{EmbeddedMetadata, TagReader};

/// Categories in evaluation order. Keyword sets overlap ("kick_808" is a
/// Kick, not a Bass), so the first match wins and the order must not change.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Kick, &["kick"]),
    (Category::Snare, &["snare", "clap", "snap"]),
    (Category::HiHat, &["hat", "hihat", "cymbal"]),
    (Category::Bass, &["bass", "808"]),
    (Category::Loop, &["loop"]),
    (Category::Vocal, &["vox", "vocal"]),
    (Category::Fx, &["fx", "sweep", "riser"]),
    (Category::Percussion, &["perc"]),
];

static BPM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{2,3})\s?bpm").expect("valid bpm regex"));

static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[A-G][#b]?\s?(?:min|maj|m)").expect("valid key regex"));

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("cannot stat {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a filename alone says about a sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameInference {
    pub category: Category,
    pub bpm: Option<u32>,
    pub key: Option<String>,
}

pub fn detect_category(name: &str) -> Category {
    let lower = name.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or_default()
}

/// Tempo written into a filename as 2-3 digits followed by "bpm".
pub fn detect_bpm(name: &str) -> Option<u32> {
    BPM_RE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Key written into a filename, e.g. "Cmin", "F# maj", "Ebm"; upper-cased.
pub fn detect_key(name: &str) -> Option<String> {
    KEY_RE.find(name).map(|m| m.as_str().to_uppercase())
}

pub fn infer_from_name(name: &str) -> NameInference {
    NameInference {
        category: detect_category(name),
        bpm: detect_bpm(name),
        key: detect_key(name),
    }
}

/// Build a `Sample` for `path`, labelled with `library`.
///
/// Only a failed stat is fatal. Unreadable tags degrade to filename inference.
pub fn classify_file(
    path: &Path,
    library: &str,
    tags: &dyn TagReader,
) -> Result<Sample, ClassifyError> {
    let stat_err = |source| ClassifyError::Stat {
        path: path.to_path_buf(),
        source,
    };
    let meta = fs::metadata(path).map_err(stat_err)?;
    let modified = meta.modified().map_err(stat_err)?;

    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let embedded = tags.read(path).unwrap_or_else(|err| {
        log::debug!("{err}; falling back to filename inference");
        EmbeddedMetadata::default()
    });

    let inferred = infer_from_name(&name);

    // Tags below 0.5 would round to 0, which is no tempo at all.
    let bpm = embedded
        .bpm
        .map(|bpm| bpm.round() as u32)
        .filter(|bpm| *bpm > 0)
        .or(inferred.bpm);
    let key = embedded
        .key
        .map(|k| k.to_uppercase())
        .or(inferred.key);

    Ok(Sample {
        path: path.to_path_buf(),
        name,
        size: meta.len(),
        // Millisecond precision, the same as a catalog row.
        date: DateTime::<Utc>::from(modified).trunc_subsecs(3),
        library: library.to_string(),
        category: inferred.category,
        bpm,
        key,
        duration: embedded.duration.unwrap_or(0.0),
    })
}
