//! Lazy, restartable producer of synthetic game events.
//!
//! A [`GameTables`] value holds the static configuration (player roster and
//! action table). [`GameTables::stream`] hands out an [`EventStream`] that
//! walks the index range `[0, total_events)` and derives each event from the
//! cyclic index into both tables:
//!
//! ```text
//! player = roster[i % roster.len()]
//! action = actions[i % actions.len()]
//! ```
//!
//! The stream holds only a cursor and a borrow of the tables, so its memory
//! use does not depend on the requested count. Calling `stream` again
//! starts a new pass from index 0 and yields the same sequence.

use core::iter::FusedIterator;

use gamestream_types::{GameAction, GameEvent, PlayerProfile};
use tracing::debug;

/// Errors raised when building the producer's static tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// The roster has no players, so the cyclic index is undefined.
    #[error("player roster must contain at least one player")]
    EmptyRoster,

    /// The action table has no actions, so the cyclic index is undefined.
    #[error("action table must contain at least one action")]
    EmptyActionTable,
}

/// Static configuration for the event producer.
///
/// Both tables are guaranteed non-empty by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTables {
    roster: Vec<PlayerProfile>,
    actions: Vec<GameAction>,
}

impl GameTables {
    /// Build tables from a roster and an action table.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::EmptyRoster`] or [`StreamError::EmptyActionTable`]
    /// if either table is empty.
    pub fn new(roster: Vec<PlayerProfile>, actions: Vec<GameAction>) -> Result<Self, StreamError> {
        if roster.is_empty() {
            return Err(StreamError::EmptyRoster);
        }
        if actions.is_empty() {
            return Err(StreamError::EmptyActionTable);
        }
        Ok(Self { roster, actions })
    }

    /// The reference scenario: four players and the three actions in
    /// [`GameAction::ALL`] order.
    pub fn reference() -> Self {
        Self {
            roster: reference_roster(),
            actions: GameAction::ALL.to_vec(),
        }
    }

    /// Return the player roster.
    pub fn roster(&self) -> &[PlayerProfile] {
        &self.roster
    }

    /// Return the action table.
    pub fn actions(&self) -> &[GameAction] {
        &self.actions
    }

    /// Derive the event at position `index` of any stream over these tables.
    ///
    /// Always `Some` for tables built through [`GameTables::new`] or
    /// [`GameTables::reference`].
    pub fn event_at(&self, index: u64) -> Option<GameEvent<'_>> {
        let player = cyclic(&self.roster, index)?;
        let action = cyclic(&self.actions, index).copied()?;
        Some(GameEvent {
            player: &player.name,
            level: player.level,
            action,
        })
    }

    /// Start a lazy pass over `total_events` events.
    ///
    /// A count of zero yields an empty stream.
    pub fn stream(&self, total_events: u64) -> EventStream<'_> {
        debug!(
            total_events,
            roster_len = self.roster.len(),
            actions_len = self.actions.len(),
            "event stream created"
        );
        EventStream {
            tables: self,
            next_index: 0,
            total_events,
        }
    }
}

impl Default for GameTables {
    fn default() -> Self {
        Self::reference()
    }
}

/// The reference player roster: `alice/5, bob/12, charlie/8, diana/15`.
pub fn reference_roster() -> Vec<PlayerProfile> {
    vec![
        PlayerProfile::new("alice", 5),
        PlayerProfile::new("bob", 12),
        PlayerProfile::new("charlie", 8),
        PlayerProfile::new("diana", 15),
    ]
}

/// Pick `items[index % items.len()]`, or `None` for an empty slice.
fn cyclic<T>(items: &[T], index: u64) -> Option<&T> {
    let len = u64::try_from(items.len()).ok()?;
    let slot = index.checked_rem(len)?;
    items.get(usize::try_from(slot).ok()?)
}

/// A finite, lazily evaluated sequence of [`GameEvent`]s.
///
/// Created by [`GameTables::stream`]. Once exhausted it keeps returning
/// `None`; start a fresh pass by calling `stream` again.
#[derive(Debug, Clone)]
pub struct EventStream<'a> {
    tables: &'a GameTables,
    next_index: u64,
    total_events: u64,
}

impl EventStream<'_> {
    /// Number of events requested for this pass.
    pub const fn total_events(&self) -> u64 {
        self.total_events
    }

    /// Number of events already yielded.
    pub const fn position(&self) -> u64 {
        self.next_index
    }

    /// Number of events still to be yielded.
    pub const fn remaining(&self) -> u64 {
        self.total_events.saturating_sub(self.next_index)
    }
}

impl<'a> Iterator for EventStream<'a> {
    type Item = GameEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.total_events {
            return None;
        }
        let event = self.tables.event_at(self.next_index)?;
        // next_index < total_events, so this cannot saturate.
        self.next_index = self.next_index.saturating_add(1);
        Some(event)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        usize::try_from(self.remaining()).map_or((usize::MAX, None), |n| (n, Some(n)))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let skip = u64::try_from(n).unwrap_or(u64::MAX);
        self.next_index = self
            .next_index
            .saturating_add(skip)
            .min(self.total_events);
        self.next()
    }
}

impl FusedIterator for EventStream<'_> {}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;

    #[test]
    fn zero_events_is_empty() {
        let tables = GameTables::reference();
        let mut stream = tables.stream(0);
        assert_eq!(stream.size_hint(), (0, Some(0)));
        assert!(stream.next().is_none());
    }

    #[test]
    fn yields_exactly_the_requested_count() {
        let tables = GameTables::reference();
        for n in [1_u64, 2, 3, 4, 7, 12, 100] {
            assert_eq!(tables.stream(n).count(), usize::try_from(n).unwrap());
        }
    }

    #[test]
    fn restarting_yields_identical_sequence() {
        let tables = GameTables::reference();
        let first: Vec<_> = tables.stream(25).collect();
        let second: Vec<_> = tables.stream(25).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn events_follow_cyclic_index() {
        let tables = GameTables::reference();
        for (i, event) in tables.stream(24).enumerate() {
            let player = &tables.roster()[i % 4];
            assert_eq!(event.player, player.name);
            assert_eq!(event.level, player.level);
            assert_eq!(event.action, tables.actions()[i % 3]);
        }
    }

    #[test]
    fn first_events_match_reference_scenario() {
        let tables = GameTables::reference();
        let events: Vec<_> = tables.stream(3).collect();
        assert_eq!(events[0].player, "alice");
        assert_eq!(events[0].level, 5);
        assert_eq!(events[0].action, GameAction::KilledMonster);
        assert_eq!(events[1].player, "bob");
        assert_eq!(events[1].action, GameAction::FoundTreasure);
        assert_eq!(events[2].player, "charlie");
        assert_eq!(events[2].action, GameAction::LeveledUp);
    }

    #[test]
    fn exhausted_stream_stays_exhausted() {
        let tables = GameTables::reference();
        let mut stream = tables.stream(2);
        assert!(stream.next().is_some());
        assert!(stream.next().is_some());
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
        assert_eq!(stream.remaining(), 0);
        assert_eq!(stream.position(), 2);
    }

    #[test]
    fn size_hint_tracks_remaining() {
        let tables = GameTables::reference();
        let mut stream = tables.stream(5);
        assert_eq!(stream.size_hint(), (5, Some(5)));
        let _ = stream.next();
        assert_eq!(stream.size_hint(), (4, Some(4)));
        assert_eq!(stream.total_events(), 5);
        assert_eq!(stream.position() + stream.remaining(), stream.total_events());
    }

    #[test]
    fn nth_skips_without_materializing() {
        let tables = GameTables::reference();
        let mut stream = tables.stream(10);
        let event = stream.nth(5).unwrap();
        assert_eq!(event, tables.event_at(5).unwrap());
        assert_eq!(stream.position(), 6);
        assert!(stream.nth(100).is_none());
        assert_eq!(stream.remaining(), 0);
    }

    #[test]
    fn huge_count_is_lazy() {
        let tables = GameTables::reference();
        let mut stream = tables.stream(u64::MAX);
        assert_eq!(stream.remaining(), u64::MAX);
        assert_eq!(stream.next().unwrap().player, "alice");
    }

    #[test]
    fn empty_tables_are_rejected() {
        assert_eq!(
            GameTables::new(Vec::new(), GameAction::ALL.to_vec()),
            Err(StreamError::EmptyRoster)
        );
        assert_eq!(
            GameTables::new(reference_roster(), Vec::new()),
            Err(StreamError::EmptyActionTable)
        );
    }

    #[test]
    fn custom_tables_cycle_independently() {
        let tables = GameTables::new(
            vec![PlayerProfile::new("solo", 20)],
            vec![GameAction::LeveledUp, GameAction::FoundTreasure],
        )
        .unwrap();
        let actions: Vec<_> = tables.stream(4).map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                GameAction::LeveledUp,
                GameAction::FoundTreasure,
                GameAction::LeveledUp,
                GameAction::FoundTreasure,
            ]
        );
    }
}
