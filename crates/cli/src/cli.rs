//! Command-line arguments

use anyhow::Context;
use clap::{Parser, Subcommand};
use listing_ner_config::{load_settings_from, ConfigError, RuntimeEnvironment, Settings};
use listing_ner_text_processing::UnitMatching;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "listing-ner")]
#[command(about = "Post-process real-estate listing entities", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration environment (loads config/{env}.*); falls back to LISTING_NER_ENV
    #[arg(long, global = true)]
    pub env: Option<String>,

    /// Directory holding default.* and {env}.* configuration files
    #[arg(long, global = true, default_value = "config")]
    pub config_dir: PathBuf,

    /// Match price units as whole words instead of substrings
    #[arg(long, global = true)]
    pub token_units: bool,

    /// Sum compound amounts such as "1 crore 20 lakh" (implies --token-units)
    #[arg(long, global = true)]
    pub sum_compound: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize price mentions given as arguments
    Normalize {
        /// Price mentions, e.g. "₹1.2 crore" or "95L"
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Attach normalized prices to recognizer output (JSON lines)
    Enrich {
        /// Input file; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Check an annotated corpus and list its labels and prices
    Validate {
        /// Corpus file; defaults to corpus.path from settings
        #[arg(short, long)]
        corpus: Option<PathBuf>,
    },

    /// Print the effective settings as TOML
    Config,
}

impl Cli {
    /// Environment name from the flag or LISTING_NER_ENV
    pub fn environment(&self) -> Option<String> {
        self.env
            .clone()
            .or_else(|| std::env::var("LISTING_NER_ENV").ok())
    }

    /// Load settings for the requested environment and apply overrides
    ///
    /// Priority: flags > env vars > config/{env}.* > config/default.* > defaults.
    /// Falls back to defaults when loading fails, unless a staging or
    /// production environment was requested.
    pub fn load_settings(&self) -> anyhow::Result<Settings> {
        let env = self.environment();
        let strict = env
            .as_deref()
            .and_then(RuntimeEnvironment::from_name)
            .map_or(false, |e| e.is_strict());

        let mut settings = match load_settings_from(&self.config_dir, env.as_deref()) {
            Ok(settings) => settings,
            Err(e) if strict => {
                return Err(e).with_context(|| {
                    format!(
                        "Failed to load {} configuration from {}",
                        env.as_deref().unwrap_or_default(),
                        self.config_dir.display()
                    )
                });
            }
            Err(e) => {
                // Tracing not yet initialized
                eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
                Settings::default()
            }
        };
        self.apply_overrides(&mut settings)
            .context("Invalid command-line options")?;
        Ok(settings)
    }

    /// Apply command-line overrides on top of loaded settings
    pub fn apply_overrides(&self, settings: &mut Settings) -> Result<(), ConfigError> {
        if self.token_units || self.sum_compound {
            settings.normalizer.unit_matching = UnitMatching::Token;
        }
        if self.sum_compound {
            settings.normalizer.sum_compound = true;
        }
        if self.pretty {
            settings.output.pretty = true;
        }
        if let Command::Validate {
            corpus: Some(path),
        } = &self.command
        {
            settings.corpus.path = Some(path.to_string_lossy().into_owned());
        }
        settings.validate()
    }
}
