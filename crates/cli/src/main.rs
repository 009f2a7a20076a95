//! Listing NER command-line entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use listing_ner_cli::{commands, init_tracing, Cli, Command};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = cli.load_settings()?;

    init_tracing(&settings);
    tracing::debug!(
        environment = ?settings.environment,
        unit_matching = ?settings.normalizer.unit_matching,
        sum_compound = settings.normalizer.sum_compound,
        "Configuration loaded"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Normalize { texts } => commands::normalize(&settings, texts, &mut out)?,
        Command::Enrich { input } => {
            match input {
                Some(path) => {
                    let file = File::open(path)
                        .with_context(|| format!("Failed to open {}", path.display()))?;
                    commands::enrich(&settings, BufReader::new(file), &mut out)?
                }
                None => commands::enrich(&settings, io::stdin().lock(), &mut out)?,
            };
        }
        Command::Validate { .. } => {
            let path: PathBuf = settings
                .corpus
                .path
                .clone()
                .map(PathBuf::from)
                .context("No corpus path given and corpus.path is not configured")?;
            let summary = commands::validate(&settings, &path, &mut out)?;
            if summary.fails(&settings) {
                tracing::error!(issues = summary.issues.len(), "Corpus has invalid spans");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Config => commands::show_config(&settings, &mut out)?,
    }

    Ok(ExitCode::SUCCESS)
}
