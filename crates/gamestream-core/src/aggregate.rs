//! Single-pass aggregation over a lazy event stream.
//!
//! The [`Aggregator`] pulls events one at a time and folds each into a
//! [`StreamStats`] value. It never stores the events themselves, so a pass
//! costs O(1) memory regardless of stream length.
//!
//! The first few events of a pass are also handed to a [`ProgressSink`].
//! The sink is a reporting side channel only: it sees each previewed event
//! after it has been counted and cannot change the counts.

use core::fmt;

use gamestream_types::{GameAction, GameEvent, StreamStats};
use serde::Serialize;
use tracing::{debug, trace};

/// Player level at or above which an event counts as high-level.
pub const DEFAULT_HIGH_LEVEL_THRESHOLD: u32 = 10;

/// Number of leading events reported on the progress side channel.
pub const DEFAULT_PREVIEW_COUNT: u64 = 3;

/// Receiver for the events reported during the preview window of a pass.
pub trait ProgressSink {
    /// Called for each previewed event. `ordinal` is 1-based.
    fn on_event(&mut self, ordinal: u64, event: &GameEvent<'_>);
}

/// A progress sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_event(&mut self, _ordinal: u64, _event: &GameEvent<'_>) {}
}

/// One previewed event, detached from the roster it borrowed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressLine {
    /// 1-based position of the event in the stream.
    pub ordinal: u64,
    /// Name of the acting player.
    pub player: String,
    /// Level of the acting player.
    pub level: u32,
    /// What the player did.
    pub action: GameAction,
}

impl fmt::Display for ProgressLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Event {}: Player {} (level {}) {}",
            self.ordinal, self.player, self.level, self.action
        )
    }
}

/// A progress sink that keeps every previewed event as a [`ProgressLine`].
///
/// The aggregator bounds how many events reach the sink, so the collected
/// list never grows past the preview window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectProgress {
    lines: Vec<ProgressLine>,
}

impl CollectProgress {
    /// Create an empty collector.
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Return the collected lines in stream order.
    pub fn lines(&self) -> &[ProgressLine] {
        &self.lines
    }

    /// Consume the collector and return its lines.
    pub fn into_lines(self) -> Vec<ProgressLine> {
        self.lines
    }
}

impl ProgressSink for CollectProgress {
    fn on_event(&mut self, ordinal: u64, event: &GameEvent<'_>) {
        self.lines.push(ProgressLine {
            ordinal,
            player: event.player.to_owned(),
            level: event.level,
            action: event.action,
        });
    }
}

/// Incremental accumulator for [`StreamStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregator {
    stats: StreamStats,
    high_level_threshold: u32,
    preview_count: u64,
}

impl Aggregator {
    /// Create an aggregator with zeroed counts.
    pub const fn new(high_level_threshold: u32, preview_count: u64) -> Self {
        Self {
            stats: StreamStats {
                total_processed: 0,
                high_level_count: 0,
                treasure_count: 0,
                levelup_count: 0,
            },
            high_level_threshold,
            preview_count,
        }
    }

    /// Fold one event into the running counts.
    ///
    /// Counters saturate at `u64::MAX` instead of wrapping.
    pub const fn record(&mut self, event: &GameEvent<'_>) {
        let stats = &mut self.stats;
        stats.total_processed = stats.total_processed.saturating_add(1);
        if event.level >= self.high_level_threshold {
            stats.high_level_count = stats.high_level_count.saturating_add(1);
        }
        match event.action {
            GameAction::FoundTreasure => {
                stats.treasure_count = stats.treasure_count.saturating_add(1);
            }
            GameAction::LeveledUp => {
                stats.levelup_count = stats.levelup_count.saturating_add(1);
            }
            GameAction::KilledMonster => {}
        }
    }

    /// Return the counts accumulated so far.
    pub const fn stats(&self) -> StreamStats {
        self.stats
    }

    /// Consume `events` to exhaustion and return the final counts.
    ///
    /// The first `preview_count` events are reported to `progress` after
    /// they are counted.
    pub fn consume<'a, I>(mut self, events: I, progress: &mut dyn ProgressSink) -> StreamStats
    where
        I: IntoIterator<Item = GameEvent<'a>>,
    {
        for event in events {
            self.record(&event);
            let ordinal = self.stats.total_processed;
            if ordinal <= self.preview_count {
                trace!(
                    ordinal,
                    player = event.player,
                    level = event.level,
                    action = %event.action,
                    "previewed event"
                );
                progress.on_event(ordinal, &event);
            }
        }

        debug!(
            total_processed = self.stats.total_processed,
            high_level_count = self.stats.high_level_count,
            treasure_count = self.stats.treasure_count,
            levelup_count = self.stats.levelup_count,
            "event stream aggregated"
        );
        self.stats
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_LEVEL_THRESHOLD, DEFAULT_PREVIEW_COUNT)
    }
}

/// Aggregate a stream with the default threshold and preview window.
pub fn aggregate<'a, I>(events: I, progress: &mut dyn ProgressSink) -> StreamStats
where
    I: IntoIterator<Item = GameEvent<'a>>,
{
    Aggregator::default().consume(events, progress)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use gamestream_types::PlayerProfile;

    use super::*;
    use crate::producer::GameTables;

    /// Recompute the expected counts directly from the cyclic index formula.
    fn simulate(tables: &GameTables, n: u64, threshold: u32) -> StreamStats {
        let mut expected = StreamStats::default();
        let roster = tables.roster();
        let actions = tables.actions();
        for i in 0..usize::try_from(n).unwrap() {
            let player = &roster[i % roster.len()];
            let action = actions[i % actions.len()];
            expected.total_processed += 1;
            if player.level >= threshold {
                expected.high_level_count += 1;
            }
            if action == GameAction::FoundTreasure {
                expected.treasure_count += 1;
            }
            if action == GameAction::LeveledUp {
                expected.levelup_count += 1;
            }
        }
        expected
    }

    #[test]
    fn empty_stream_gives_zero_counts() {
        let tables = GameTables::reference();
        let stats = aggregate(tables.stream(0), &mut NoProgress);
        assert_eq!(stats, StreamStats::default());
    }

    #[test]
    fn total_matches_requested_count() {
        let tables = GameTables::reference();
        for n in [0_u64, 1, 2, 3, 5, 11, 64] {
            assert_eq!(aggregate(tables.stream(n), &mut NoProgress).total_processed, n);
        }
    }

    #[test]
    fn thousand_events_match_cyclic_formula() {
        let tables = GameTables::reference();
        let stats = aggregate(tables.stream(1000), &mut NoProgress);
        assert_eq!(stats, simulate(&tables, 1000, DEFAULT_HIGH_LEVEL_THRESHOLD));
        assert_eq!(stats.total_processed, 1000);
        assert_eq!(stats.high_level_count, 500);
        assert_eq!(stats.treasure_count, 333);
        assert_eq!(stats.levelup_count, 333);
    }

    #[test]
    fn preview_reports_first_three_events() {
        let tables = GameTables::reference();
        let mut progress = CollectProgress::new();
        let _ = aggregate(tables.stream(1000), &mut progress);

        let lines: Vec<String> = progress.lines().iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "Event 1: Player alice (level 5) killed monster",
                "Event 2: Player bob (level 12) found treasure",
                "Event 3: Player charlie (level 8) leveled up",
            ]
        );
    }

    #[test]
    fn preview_is_bounded_by_stream_length() {
        let tables = GameTables::reference();
        let mut progress = CollectProgress::new();
        let _ = aggregate(tables.stream(2), &mut progress);
        assert_eq!(progress.lines().len(), 2);
    }

    #[test]
    fn progress_sink_does_not_affect_counts() {
        let tables = GameTables::reference();
        let silent = aggregate(tables.stream(97), &mut NoProgress);
        let mut progress = CollectProgress::new();
        let reported = aggregate(tables.stream(97), &mut progress);
        assert_eq!(silent, reported);
    }

    #[test]
    fn exhausted_stream_aggregates_to_zero() {
        let tables = GameTables::reference();
        let mut stream = tables.stream(10);
        let first = aggregate(&mut stream, &mut NoProgress);
        assert_eq!(first.total_processed, 10);
        let second = aggregate(&mut stream, &mut NoProgress);
        assert_eq!(second, StreamStats::default());
    }

    #[test]
    fn custom_threshold_changes_high_level_count() {
        let tables = GameTables::reference();
        let stats = Aggregator::new(8, 0).consume(tables.stream(8), &mut NoProgress);
        // charlie (8), bob (12), diana (15) qualify; alice (5) does not.
        assert_eq!(stats.high_level_count, 6);
        assert_eq!(stats, simulate(&tables, 8, 8));
    }

    #[test]
    fn record_updates_incrementally() {
        let mut aggregator = Aggregator::default();
        let player = PlayerProfile::new("diana", 15);
        aggregator.record(&GameEvent {
            player: &player.name,
            level: player.level,
            action: GameAction::FoundTreasure,
        });
        let stats = aggregator.stats();
        assert_eq!(stats.total_processed, 1);
        assert_eq!(stats.high_level_count, 1);
        assert_eq!(stats.treasure_count, 1);
        assert_eq!(stats.levelup_count, 0);
    }
}
