//! Demonstration binary for the GameStream event pipeline.
//!
//! Runs one end-to-end demonstration: streams synthetic game events through
//! the single-pass aggregator, then pulls short prefixes from the infinite
//! Fibonacci and prime generators, and prints the report to stdout.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (`GAMESTREAM_CONFIG`, else `gamestream-config.yaml`,
//!    else defaults)
//! 2. Initialize structured logging (tracing, to stderr)
//! 3. Run the demonstration
//! 4. Print the report as text or JSON

mod error;

use std::io::Write;
use std::path::PathBuf;

use gamestream_core::config::{ConfigError, GameStreamConfig, LoggingConfig, OutputFormat};
use gamestream_core::runner::run_demo;
use gamestream_types::RunId;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::RunnerError;

/// Environment variable naming an explicit configuration file.
const CONFIG_PATH_ENV: &str = "GAMESTREAM_CONFIG";

/// Configuration file looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = "gamestream-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the report cannot be
/// written.
fn main() -> Result<(), RunnerError> {
    let (config, source) = load_config()?;

    init_logging(&config.logging)?;
    info!("gamestream-runner starting");
    if let Some(path) = &source {
        info!(path = %path.display(), "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }

    let run_id = RunId::new();
    let report = run_demo(&config, run_id)?;

    let mut stdout = std::io::stdout().lock();
    match config.output.format {
        OutputFormat::Text => write!(stdout, "{report}")?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut stdout, &report)?;
            writeln!(stdout)?;
        }
    }
    stdout.flush()?;

    info!(%run_id, "gamestream-runner finished");
    Ok(())
}

/// Load configuration, returning the file it came from, if any.
///
/// An explicitly named file must exist. The default file is optional.
fn load_config() -> Result<(GameStreamConfig, Option<PathBuf>), RunnerError> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        let config = GameStreamConfig::from_file(&path)?;
        return Ok((config, Some(path)));
    }

    let path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if path.exists() {
        let config = GameStreamConfig::from_file(&path)?;
        Ok((config, Some(path)))
    } else {
        let mut config = GameStreamConfig::default();
        config.apply_env_overrides()?;
        Ok((config, None))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so stdout carries only the report.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidLogLevel`] if the configured level is not
/// a recognized name.
fn init_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level_filter()?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
