use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment variables
/// (prefix `SAMPLEDEX__`), and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("SAMPLEDEX")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("scan.extensions")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// `load` plus `validate`, degrading to defaults with a warning.
    ///
    /// A broken config file must not stop the catalog from being used.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(settings) => match settings.validate() {
                Ok(()) => settings,
                Err(msg) => {
                    log::warn!("invalid config, using defaults: {msg}");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("failed to load config, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.import.workers == 0 {
            return Err("import.workers must be >= 1".to_string());
        }
        if self.scan.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err("scan.extensions must name at least one extension".to_string());
        }
        Ok(())
    }

    /// Catalog file to open: the configured one, else the XDG data default.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog.path.clone().or_else(default_catalog_path)
    }
}

/// Resolve the config path from `SAMPLEDEX_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SAMPLEDEX_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// `$XDG_CONFIG_HOME/sampledex/config.toml` or `~/.config/sampledex/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("sampledex").join("config.toml"))
}

/// `$XDG_DATA_HOME/sampledex/catalog.db` or `~/.local/share/sampledex/catalog.db`.
pub fn default_catalog_path() -> Option<PathBuf> {
    xdg_dir("XDG_DATA_HOME", ".local/share").map(|d| d.join("sampledex").join("catalog.db"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(dir) = env::var_os(var).filter(|v| !v.is_empty()) {
        Some(PathBuf::from(dir))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
