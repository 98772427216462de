use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::cancel::CancelToken;
use crate::config::ScanSettings;

/// An entry that was left out of a scan or import, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub path: Option<PathBuf>,
    pub reason: String,
}

impl Skipped {
    pub fn new(path: Option<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path,
            reason: reason.into(),
        }
    }
}

/// Flat result of walking one directory tree.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Audio files found, in walk order.
    pub files: Vec<PathBuf>,
    /// Entries that could not be read.
    pub skipped: Vec<Skipped>,
    /// Set when the walk stopped early because the token was cancelled.
    pub cancelled: bool,
}

pub fn is_audio_file(path: &Path, settings: &ScanSettings) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            settings
                .extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.'))
                .any(|e| e.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Recursively collect audio files under `dir`.
///
/// Unreadable directories, failed stats and symlink loops are logged and
/// recorded in `skipped`; they never abort the walk.
pub fn scan(dir: &Path, settings: &ScanSettings, cancel: &CancelToken) -> ScanReport {
    let mut report = ScanReport::default();

    let walker = WalkDir::new(dir).follow_links(settings.follow_links);

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        if cancel.is_cancelled() {
            log::info!("scan of {} cancelled", dir.display());
            report.cancelled = true;
            break;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().map(Path::to_path_buf);
                log::warn!("skipping unreadable entry under {}: {err}", dir.display());
                report.skipped.push(Skipped::new(path, err.to_string()));
                continue;
            }
        };

        if entry.file_type().is_file() && is_audio_file(entry.path(), settings) {
            report.files.push(entry.into_path());
        }
    }

    log::debug!(
        "scanned {}: {} audio files, {} skipped",
        dir.display(),
        report.files.len(),
        report.skipped.len()
    );
    report
}
