//! One end-to-end demonstration run.
//!
//! [`run_demo`] requests the configured number of events, aggregates them in
//! a single pass while collecting the preview, then pulls bounded prefixes
//! from both sequence generators. Nothing survives between runs: two runs
//! with the same configuration produce the same report apart from the run
//! id and the measured processing time.

use std::time::Instant;

use gamestream_types::RunId;
use tracing::{info, info_span};

use crate::aggregate::{Aggregator, CollectProgress};
use crate::config::{ConfigError, GameStreamConfig};
use crate::report::DemoReport;
use crate::sequence::{Fibonacci, Primes};

/// Errors that can occur during a demonstration run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The configuration does not describe a valid stream.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },
}

/// Execute one demonstration run and return its report.
///
/// # Errors
///
/// Returns [`RunError::Config`] if the configured roster or action table
/// cannot build a stream.
pub fn run_demo(config: &GameStreamConfig, run_id: RunId) -> Result<DemoReport, RunError> {
    let span = info_span!("demo_run", %run_id);
    let _guard = span.enter();

    let stream_config = &config.stream;
    let tables = stream_config.tables()?;

    info!(
        event_count = stream_config.event_count,
        preview_count = stream_config.preview_count,
        roster_len = tables.roster().len(),
        "Processing game events"
    );

    let mut progress = CollectProgress::new();
    let started = Instant::now();
    let stats = Aggregator::new(
        stream_config.high_level_threshold,
        stream_config.preview_count,
    )
    .consume(tables.stream(stream_config.event_count), &mut progress);
    let processing_time = started.elapsed();

    info!(
        total_processed = stats.total_processed,
        high_level_count = stats.high_level_count,
        treasure_count = stats.treasure_count,
        levelup_count = stats.levelup_count,
        elapsed_us = processing_time.as_micros(),
        "Stream analytics complete"
    );

    let fibonacci: Vec<String> = Fibonacci::new()
        .take(config.sequences.fibonacci_count)
        .map(|term| term.to_string())
        .collect();
    let primes: Vec<u64> = Primes::new().take(config.sequences.prime_count).collect();

    info!(
        fibonacci_terms = fibonacci.len(),
        primes = primes.len(),
        "Generator demonstration complete"
    );

    Ok(DemoReport {
        run_id,
        event_count: stream_config.event_count,
        preview: progress.into_lines(),
        stats,
        high_level_threshold: stream_config.high_level_threshold,
        processing_time,
        fibonacci,
        primes,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::StreamConfig;

    #[test]
    fn reference_run_produces_reference_report() {
        let report = run_demo(&GameStreamConfig::default(), RunId::new()).unwrap();
        assert_eq!(report.event_count, 1000);
        assert_eq!(report.preview.len(), 3);
        assert_eq!(report.stats.total_processed, 1000);
        assert_eq!(report.stats.high_level_count, 500);
        assert_eq!(report.stats.treasure_count, 333);
        assert_eq!(report.stats.levelup_count, 333);
        assert_eq!(
            report.fibonacci,
            ["0", "1", "1", "2", "3", "5", "8", "13", "21", "34"]
        );
        assert_eq!(report.primes, [2, 3, 5, 7, 11]);
    }

    #[test]
    fn runs_are_independent() {
        let config = GameStreamConfig::default();
        let first = run_demo(&config, RunId::new()).unwrap();
        let second = run_demo(&config, RunId::new()).unwrap();
        assert_eq!(first.stats, second.stats);
        assert_eq!(first.preview, second.preview);
        assert_eq!(first.fibonacci, second.fibonacci);
        assert_eq!(first.primes, second.primes);
    }

    #[test]
    fn zero_events_is_a_valid_run() {
        let config = GameStreamConfig {
            stream: StreamConfig {
                event_count: 0,
                ..StreamConfig::default()
            },
            ..GameStreamConfig::default()
        };
        let report = run_demo(&config, RunId::new()).unwrap();
        assert!(report.stats.is_empty());
        assert!(report.preview.is_empty());
    }

    #[test]
    fn invalid_tables_fail_fast() {
        let config = GameStreamConfig {
            stream: StreamConfig {
                roster: Vec::new(),
                ..StreamConfig::default()
            },
            ..GameStreamConfig::default()
        };
        assert!(matches!(
            run_demo(&config, RunId::new()),
            Err(RunError::Config { .. })
        ));
    }
}
