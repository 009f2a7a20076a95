//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;
use listing_ner_text_processing::{PriceConfig, UnitMatching};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - corpus issues are reported, never fatal
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    /// Parse an environment name such as `--env production`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "staging" => Some(Self::Staging),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Price normalizer behaviour
    #[serde(default)]
    pub normalizer: NormalizerSettings,

    /// Annotated corpus location and checks
    #[serde(default)]
    pub corpus: CorpusSettings,

    #[serde(default)]
    pub output: OutputSettings,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Price normalizer configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NormalizerSettings {
    /// `substring` (default) or `token`
    #[serde(default)]
    pub unit_matching: UnitMatching,

    /// Sum compound amounts such as "1 crore 20 lakh" (token matching only)
    #[serde(default)]
    pub sum_compound: bool,
}

impl NormalizerSettings {
    pub fn price_config(&self) -> PriceConfig {
        PriceConfig {
            unit_matching: self.unit_matching,
            sum_compound: self.sum_compound,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusSettings {
    /// Annotated corpus file (JSON or YAML)
    #[serde(default = "default_corpus_path")]
    pub path: Option<String>,

    /// Treat validation issues as a failure
    #[serde(default)]
    pub fail_on_issues: bool,
}

fn default_corpus_path() -> Option<String> {
    Some("data/corpus.json".to_string())
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
            fail_on_issues: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_normalizer()?;
        self.validate_corpus()?;
        self.validate_observability()?;
        Ok(())
    }

    fn validate_normalizer(&self) -> Result<(), ConfigError> {
        if self.normalizer.sum_compound && self.normalizer.unit_matching != UnitMatching::Token {
            return Err(ConfigError::InvalidValue {
                field: "normalizer.sum_compound".to_string(),
                message: "Compound amounts can only be summed with token unit matching"
                    .to_string(),
            });
        }
        Ok(())
    }

    fn validate_corpus(&self) -> Result<(), ConfigError> {
        match self.corpus.path.as_deref() {
            Some(path) if path.trim().is_empty() => Err(ConfigError::InvalidValue {
                field: "corpus.path".to_string(),
                message: "Path must not be empty".to_string(),
            }),
            None if self.environment.is_strict() && self.corpus.fail_on_issues => {
                Err(ConfigError::InvalidValue {
                    field: "corpus.path".to_string(),
                    message: format!(
                        "Required in {:?} when fail_on_issues is set",
                        self.environment
                    ),
                })
            }
            _ => Ok(()),
        }
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        let level = self.observability.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!(
                    "Unknown level '{}', expected one of {}",
                    self.observability.log_level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }
        Ok(())
    }
}

/// Load settings from `config/` and the environment
///
/// Priority: env vars > config/{env}.* > config/default.* > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from("config", env)
}

/// Load settings from an explicit configuration directory
pub fn load_settings_from(
    dir: impl AsRef<Path>,
    env: Option<&str>,
) -> Result<Settings, ConfigError> {
    load_with_environment(dir.as_ref(), env, environment_source())
}

/// `LISTING_NER__SECTION__KEY` variables, e.g. `LISTING_NER__CORPUS__PATH`
fn environment_source() -> Environment {
    Environment::with_prefix("LISTING_NER")
        .separator("__")
        .try_parsing(true)
}

fn load_with_environment(
    dir: &Path,
    env: Option<&str>,
    environment: Environment,
) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    let default_path = dir.join("default");
    builder = builder.add_source(File::with_name(&default_path.to_string_lossy()).required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        let env_path = dir.join(env_name);
        builder = builder.add_source(File::with_name(&env_path.to_string_lossy()).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(environment);

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        dir = %dir.display(),
        env = env.unwrap_or("default"),
        "Settings loaded"
    );
    Ok(settings)
}
