use std::io::{self, Write};

use clap::Parser;
use sampledex::config::Settings;
use sampledex::import::PromptPicker;
use sampledex::{Catalog, Error, ImportOutcome, ImportRequest, Importer, Sample};

mod cli;

use cli::{Cli, Command};

pub fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    let mut settings = Settings::load_or_default();
    if let Some(path) = cli.catalog {
        settings.catalog.path = Some(path);
    }

    if let Command::Config = cli.command {
        let rendered = toml::to_string_pretty(&settings)
            .map_err(|e| Error::InvalidSettings(e.to_string()))?;
        print!("{rendered}");
        return Ok(());
    }

    let catalog_path = settings.catalog_path().ok_or_else(|| {
        Error::InvalidSettings("no catalog path configured and $HOME is unset".to_string())
    })?;
    let catalog = Catalog::open(&catalog_path)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Import { paths, files, json } => {
            let request = if !paths.is_empty() {
                ImportRequest::explicit(paths)
            } else if files {
                ImportRequest::files()
            } else {
                ImportRequest::folder()
            };
            let mut picker = PromptPicker::new(io::stdin().lock(), io::stderr());
            let outcome = Importer::new(&catalog, &settings).import(&request, &mut picker)?;

            match outcome {
                ImportOutcome::Cancelled => writeln!(out, "cancelled")?,
                ImportOutcome::Completed(result) if json => {
                    serde_json::to_writer_pretty(&mut out, &result).map_err(io::Error::from)?;
                    writeln!(out)?;
                }
                ImportOutcome::Completed(result) => {
                    writeln!(
                        out,
                        "{}: {} samples imported",
                        result.group_label,
                        result.files.len()
                    )?;
                    for sample in &result.files {
                        write_sample(&mut out, sample)?;
                    }
                }
            }
        }
        Command::List { json } => {
            let samples = catalog.list_all()?;
            if json {
                serde_json::to_writer_pretty(&mut out, &samples).map_err(io::Error::from)?;
                writeln!(out)?;
            } else {
                for sample in &samples {
                    write_sample(&mut out, sample)?;
                }
            }
        }
        Command::Libraries => {
            for lib in catalog.libraries()? {
                writeln!(out, "{:>6}  {}", lib.samples, lib.library)?;
            }
        }
        Command::Clear => {
            let removed = catalog.clear_all()?;
            writeln!(out, "removed {removed} samples")?;
        }
        Command::Config => {}
    }

    Ok(())
}

fn write_sample(out: &mut impl Write, sample: &Sample) -> io::Result<()> {
    let bpm = sample
        .bpm
        .map(|b| format!("{b} bpm"))
        .unwrap_or_else(|| "-".to_string());
    writeln!(
        out,
        "{:<10} {:>8} {:>7} {:>6.2}s  {}  [{}]",
        sample.category.as_str(),
        bpm,
        sample.key.as_deref().unwrap_or("-"),
        sample.duration,
        sample.path.display(),
        sample.library,
    )
}

