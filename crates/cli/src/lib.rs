//! Command-line front end for listing NER post-processing
//!
//! Commands write JSON to the supplied writer; logs go to stderr.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command};

use listing_ner_config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Initialize tracing on stderr
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.observability.log_level;
        format!("warn,listing_ner={}", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.observability.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };
    subscriber.with(fmt_layer).init();
}
