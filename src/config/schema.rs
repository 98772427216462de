use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/sampledex/config.toml` or `~/.config/sampledex/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SAMPLEDEX__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub scan: ScanSettings,
    pub import: ImportSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// SQLite file holding the catalog. Defaults to
    /// `$XDG_DATA_HOME/sampledex/catalog.db`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanSettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning. Loops are detected and skipped.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            extensions: ["wav", "mp3", "aif", "aiff", "flac", "ogg", "m4a"]
                .into_iter()
                .map(String::from)
                .collect(),
            follow_links: true,
            include_hidden: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Number of files classified concurrently.
    pub workers: usize,
    /// Label for a drag-and-drop style import that contains no directory.
    pub default_label: String,
    /// Label for files picked one by one.
    pub loose_files_label: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            workers: 4,
            default_label: "Imported".to_string(),
            loose_files_label: "Individual".to_string(),
        }
    }
}
