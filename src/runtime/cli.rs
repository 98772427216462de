use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "sampledex", version, about = "Scan, tag and catalog audio samples")]
pub struct Cli {
    /// Catalog database file (overrides `catalog.path` from the config).
    #[arg(long, global = true, env = "SAMPLEDEX_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import folders or files. Without paths, asks for a folder (or files with --files).
    Import {
        paths: Vec<PathBuf>,
        /// Ask for individual files instead of a folder.
        #[arg(long, conflicts_with = "paths")]
        files: bool,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List the whole catalog, most recently modified first.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show grouping labels and how many samples each holds.
    Libraries,
    /// Remove every sample from the catalog.
    Clear,
    /// Print the effective settings as TOML.
    Config,
}
