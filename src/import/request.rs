use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::library::{Sample, Skipped};

/// Where the files of an import come from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceMode {
    /// Ask the picker for one folder and scan it.
    Folder,
    /// Ask the picker for individual files.
    Files,
    /// Use `paths` as given (drag and drop).
    ExplicitPaths,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    pub source_mode: SourceMode,
    /// Only meaningful for `ExplicitPaths`. When present, it is used whatever
    /// the mode says.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<PathBuf>>,
}

impl ImportRequest {
    pub fn folder() -> Self {
        Self {
            source_mode: SourceMode::Folder,
            paths: None,
        }
    }

    pub fn files() -> Self {
        Self {
            source_mode: SourceMode::Files,
            paths: None,
        }
    }

    pub fn explicit<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            source_mode: SourceMode::ExplicitPaths,
            paths: Some(paths.into_iter().map(Into::into).collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportResult {
    pub group_label: String,
    /// Samples that were classified and persisted, in no particular order.
    pub files: Vec<Sample>,
    /// Entries dropped along the way. Only logged by the CLI.
    pub skipped: Vec<Skipped>,
}

/// `Cancelled` is distinct from a completed import with no files: nothing was
/// selected and nothing was written.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Cancelled,
    Completed(ImportResult),
}

impl ImportOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ImportOutcome::Cancelled)
    }

    pub fn completed(self) -> Option<ImportResult> {
        match self {
            ImportOutcome::Cancelled => None,
            ImportOutcome::Completed(result) => Some(result),
        }
    }
}
