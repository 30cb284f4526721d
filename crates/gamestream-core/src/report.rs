//! The report produced by one demonstration run.
//!
//! [`DemoReport`] renders the console layout through [`fmt::Display`] and
//! serializes to a single JSON object for machine consumers.

use core::fmt;
use std::time::Duration;

use gamestream_types::{RunId, StreamStats};
use serde::{Serialize, Serializer};

use crate::aggregate::ProgressLine;

/// Banner printed at the top of every report.
pub const BANNER: &str = "=== Game Data Stream Processor ===";

/// Everything the runner prints for one demonstration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoReport {
    /// Identifier of the run that produced this report.
    pub run_id: RunId,
    /// Number of events requested from the producer.
    pub event_count: u64,
    /// The previewed leading events.
    pub preview: Vec<ProgressLine>,
    /// Final aggregation counts.
    pub stats: StreamStats,
    /// Level threshold used for `stats.high_level_count`.
    pub high_level_threshold: u32,
    /// Wall-clock time spent producing and aggregating the stream.
    #[serde(rename = "processing_seconds", serialize_with = "serialize_seconds")]
    pub processing_time: Duration,
    /// Leading Fibonacci terms, in decimal.
    pub fibonacci: Vec<String>,
    /// Leading primes.
    pub primes: Vec<u64>,
}

fn serialize_seconds<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.as_secs_f64())
}

/// Write `items` separated by `", "`.
fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for DemoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BANNER}")?;
        writeln!(f)?;
        writeln!(f, "Processing {} game events...", self.event_count)?;
        writeln!(f)?;
        for line in &self.preview {
            writeln!(f, "{line}")?;
        }
        writeln!(f, "...")?;

        writeln!(f)?;
        writeln!(f, "=== Stream Analytics ===")?;
        writeln!(f, "Total events processed: {}", self.stats.total_processed)?;
        writeln!(
            f,
            "High-level players ({}+): {}",
            self.high_level_threshold, self.stats.high_level_count
        )?;
        writeln!(f, "Treasure events: {}", self.stats.treasure_count)?;
        writeln!(f, "Level-up events: {}", self.stats.levelup_count)?;
        writeln!(f)?;
        writeln!(f, "Memory usage: Constant (streaming)")?;
        writeln!(
            f,
            "Processing time: {:.3} seconds",
            self.processing_time.as_secs_f64()
        )?;

        writeln!(f)?;
        writeln!(f, "=== Generator Demonstration ===")?;
        write!(f, "Fibonacci sequence (first {}): ", self.fibonacci.len())?;
        write_joined(f, &self.fibonacci)?;
        writeln!(f)?;
        write!(f, "Prime numbers (first {}): ", self.primes.len())?;
        write_joined(f, &self.primes)?;
        writeln!(f)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use gamestream_types::GameAction;

    use super::*;

    fn sample_report() -> DemoReport {
        DemoReport {
            run_id: RunId::new(),
            event_count: 1000,
            preview: vec![
                ProgressLine {
                    ordinal: 1,
                    player: "alice".to_owned(),
                    level: 5,
                    action: GameAction::KilledMonster,
                },
                ProgressLine {
                    ordinal: 2,
                    player: "bob".to_owned(),
                    level: 12,
                    action: GameAction::FoundTreasure,
                },
            ],
            stats: StreamStats {
                total_processed: 1000,
                high_level_count: 500,
                treasure_count: 333,
                levelup_count: 333,
            },
            high_level_threshold: 10,
            processing_time: Duration::from_millis(45),
            fibonacci: vec!["0".to_owned(), "1".to_owned(), "1".to_owned()],
            primes: vec![2, 3],
        }
    }

    #[test]
    fn renders_console_layout() {
        let expected = "\
=== Game Data Stream Processor ===

Processing 1000 game events...

Event 1: Player alice (level 5) killed monster
Event 2: Player bob (level 12) found treasure
...

=== Stream Analytics ===
Total events processed: 1000
High-level players (10+): 500
Treasure events: 333
Level-up events: 333

Memory usage: Constant (streaming)
Processing time: 0.045 seconds

=== Generator Demonstration ===
Fibonacci sequence (first 3): 0, 1, 1
Prime numbers (first 2): 2, 3
";
        assert_eq!(sample_report().to_string(), expected);
    }

    #[test]
    fn empty_prefixes_render_without_separators() {
        let report = DemoReport {
            fibonacci: Vec::new(),
            primes: Vec::new(),
            ..sample_report()
        };
        let text = report.to_string();
        assert!(text.contains("Fibonacci sequence (first 0): \n"));
        assert!(text.ends_with("Prime numbers (first 0): \n"));
    }

    #[test]
    fn serializes_to_json_object() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(json["event_count"], 1000);
        assert_eq!(json["stats"]["treasure_count"], 333);
        assert_eq!(json["preview"][1]["action"], "found_treasure");
        assert_eq!(json["fibonacci"][2], "1");
        assert_eq!(json["primes"][1], 3);
        assert!((json["processing_seconds"].as_f64().unwrap() - 0.045).abs() < 1e-9);
    }
}
