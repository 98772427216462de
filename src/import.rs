//! Import orchestration: resolve a request into files, classify them and
//! persist the batch into the catalog.

mod picker;
mod pool;
mod request;

use std::fs;
use std::path::{Path, PathBuf};

pub use picker::*;
pub use request::*;

use crate::cancel::CancelToken;
use crate::catalog::{Catalog, CatalogError};
use crate::config::Settings;
use crate::library::{LoftyTagReader, Skipped, TagReader, is_audio_file, scan};
use pool::{Job, classify_all};

/// Files an import will classify, before any work is done on them.
struct Resolved {
    group_label: String,
    jobs: Vec<Job>,
    skipped: Vec<Skipped>,
}

pub struct Importer<'a> {
    catalog: &'a Catalog,
    settings: &'a Settings,
    tags: &'a dyn TagReader,
    cancel: CancelToken,
}

impl<'a> Importer<'a> {
    pub fn new(catalog: &'a Catalog, settings: &'a Settings) -> Self {
        Self {
            catalog,
            settings,
            tags: &LoftyTagReader,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_tag_reader(mut self, tags: &'a dyn TagReader) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run one import.
    ///
    /// Returns `Cancelled` when the picker was dismissed or the token fired
    /// before anything was written. Only a catalog write failure is an error.
    pub fn import(
        &self,
        request: &ImportRequest,
        picker: &mut dyn SourcePicker,
    ) -> Result<ImportOutcome, CatalogError> {
        let Some(resolved) = self.resolve(request, picker) else {
            log::info!("import cancelled before classification");
            return Ok(ImportOutcome::Cancelled);
        };
        let Resolved {
            group_label,
            jobs,
            mut skipped,
        } = resolved;

        if jobs.is_empty() {
            log::info!("no audio files found for '{group_label}'");
            return Ok(ImportOutcome::Completed(ImportResult {
                group_label,
                files: Vec::new(),
                skipped,
            }));
        }

        let total = jobs.len();
        let classified = classify_all(jobs, self.settings.import.workers, self.tags, &self.cancel);
        if classified.cancelled || self.cancel.is_cancelled() {
            log::info!("import of '{group_label}' cancelled; nothing persisted");
            return Ok(ImportOutcome::Cancelled);
        }
        skipped.extend(classified.skipped);
        let files = classified.samples;

        if !files.is_empty() {
            self.catalog.upsert_batch(&files)?;
        }
        log::info!(
            "imported {} of {total} files into '{group_label}' ({} skipped)",
            files.len(),
            skipped.len()
        );

        Ok(ImportOutcome::Completed(ImportResult {
            group_label,
            files,
            skipped,
        }))
    }

    fn resolve(&self, request: &ImportRequest, picker: &mut dyn SourcePicker) -> Option<Resolved> {
        if let Some(paths) = &request.paths {
            return self.resolve_explicit(paths);
        }
        match request.source_mode {
            SourceMode::ExplicitPaths => self.resolve_explicit(&[]),
            SourceMode::Folder => {
                let picked = picker.pick_folder()?;
                let mut resolved = Resolved {
                    group_label: folder_label(&picked),
                    jobs: Vec::new(),
                    skipped: Vec::new(),
                };
                match locate(&picked) {
                    Ok(folder) => {
                        resolved.group_label = folder_label(&folder);
                        let label = resolved.group_label.clone();
                        self.scan_into(&folder, &label, &mut resolved)?;
                    }
                    Err(skipped) => resolved.skipped.push(skipped),
                }
                Some(resolved)
            }
            SourceMode::Files => {
                let files = picker.pick_files().filter(|f| !f.is_empty())?;
                let label = self.settings.import.loose_files_label.clone();
                let mut resolved = Resolved {
                    group_label: label.clone(),
                    jobs: Vec::new(),
                    skipped: Vec::new(),
                };
                for picked in files {
                    if !is_audio_file(&picked, &self.settings.scan) {
                        log::debug!("ignoring non-audio selection {}", picked.display());
                        continue;
                    }
                    match locate(&picked) {
                        Ok(path) => resolved.jobs.push(Job {
                            path,
                            library: label.clone(),
                        }),
                        Err(skipped) => resolved.skipped.push(skipped),
                    }
                }
                Some(resolved)
            }
        }
    }

    /// Directories are scanned and labelled with their own name; loose audio
    /// files share the batch label, which is the first directory's name.
    fn resolve_explicit(&self, paths: &[PathBuf]) -> Option<Resolved> {
        let mut resolved = Resolved {
            group_label: String::new(),
            jobs: Vec::new(),
            skipped: Vec::new(),
        };
        let mut first_dir_label: Option<String> = None;
        let mut loose: Vec<PathBuf> = Vec::new();

        for path in paths {
            if self.cancel.is_cancelled() {
                return None;
            }
            let path = match locate(path) {
                Ok(path) => path,
                Err(skipped) => {
                    resolved.skipped.push(skipped);
                    continue;
                }
            };
            match fs::metadata(&path) {
                Ok(meta) if meta.is_dir() => {
                    let label = folder_label(&path);
                    first_dir_label.get_or_insert_with(|| label.clone());
                    self.scan_into(&path, &label, &mut resolved)?;
                }
                Ok(_) if is_audio_file(&path, &self.settings.scan) => loose.push(path),
                Ok(_) => log::debug!("ignoring non-audio path {}", path.display()),
                Err(e) => {
                    log::warn!("skipping {}: {e}", path.display());
                    resolved
                        .skipped
                        .push(Skipped::new(Some(path.clone()), e.to_string()));
                }
            }
        }

        resolved.group_label =
            first_dir_label.unwrap_or_else(|| self.settings.import.default_label.clone());
        resolved.jobs.extend(loose.into_iter().map(|path| Job {
            path,
            library: resolved.group_label.clone(),
        }));
        Some(resolved)
    }

    /// `None` when the scan was cancelled.
    fn scan_into(&self, dir: &Path, label: &str, resolved: &mut Resolved) -> Option<()> {
        let report = scan(dir, &self.settings.scan, &self.cancel);
        if report.cancelled {
            return None;
        }
        resolved.skipped.extend(report.skipped);
        resolved.jobs.extend(report.files.into_iter().map(|path| Job {
            path,
            library: label.to_string(),
        }));
        Some(())
    }
}

/// Absolute, symlink-free form of a source path, so one file has one catalog key
/// however it was named ("Kit", "./Kit", "/home/me/Kit").
fn locate(path: &Path) -> Result<PathBuf, Skipped> {
    fs::canonicalize(path).map_err(|e| {
        log::warn!("skipping {}: {e}", path.display());
        Skipped::new(Some(path.to_path_buf()), e.to_string())
    })
}

/// A folder's own name, or the whole path for roots like `/`.
fn folder_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
