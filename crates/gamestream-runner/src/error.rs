//! Error types for the demonstration binary.
//!
//! [`RunnerError`] wraps every failure mode between process start and the
//! report reaching stdout, so `main` can propagate with `?`.

/// Top-level error for the demonstration binary.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: gamestream_core::config::ConfigError,
    },

    /// The demonstration run failed.
    #[error("run error: {source}")]
    Run {
        /// The underlying run error.
        #[from]
        source: gamestream_core::runner::RunError,
    },

    /// The report could not be serialized to JSON.
    #[error("report serialization error: {source}")]
    Serialize {
        /// The underlying serde error.
        #[from]
        source: serde_json::Error,
    },

    /// Writing the report to stdout failed.
    #[error("output error: {source}")]
    Output {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
