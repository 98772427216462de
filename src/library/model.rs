use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cataloged audio file. `path` is the identity key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub path: PathBuf,
    /// Base name including extension.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// On-disk modify time when the file was (re)classified.
    pub date: DateTime<Utc>,
    /// Grouping label of the import batch this sample came from.
    pub library: String,
    pub category: Category,
    pub bpm: Option<u32>,
    pub key: Option<String>,
    /// Seconds; 0 when the format could not be read.
    pub duration: f64,
}

/// Coarse instrument/role classification inferred from filename keywords.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    Kick,
    Snare,
    HiHat,
    Bass,
    Loop,
    Vocal,
    #[serde(rename = "FX")]
    Fx,
    Percussion,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Kick,
        Category::Snare,
        Category::HiHat,
        Category::Bass,
        Category::Loop,
        Category::Vocal,
        Category::Fx,
        Category::Percussion,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Kick => "Kick",
            Category::Snare => "Snare",
            Category::HiHat => "HiHat",
            Category::Bass => "Bass",
            Category::Loop => "Loop",
            Category::Vocal => "Vocal",
            Category::Fx => "FX",
            Category::Percussion => "Percussion",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
