//! Core record types: game events, roster entries, and stream statistics.

use serde::{Deserialize, Serialize};

use crate::enums::GameAction;

/// One entry of the player roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Display name of the player.
    pub name: String,
    /// Current character level.
    pub level: u32,
}

impl PlayerProfile {
    /// Create a roster entry.
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}

/// A single synthetic game event.
///
/// The player name borrows from the roster that produced the event, so
/// emitting an event never allocates. Events are read once by the consumer
/// and then dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameEvent<'a> {
    /// Name of the acting player.
    pub player: &'a str,
    /// Level of the acting player.
    pub level: u32,
    /// What the player did.
    pub action: GameAction,
}

/// Running statistics accumulated over one pass of an event stream.
///
/// All counters start at zero and only grow. The struct is owned by a single
/// aggregation pass and read after the pass completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamStats {
    /// Number of events consumed.
    pub total_processed: u64,
    /// Events whose player level met the high-level threshold.
    pub high_level_count: u64,
    /// Events with [`GameAction::FoundTreasure`].
    pub treasure_count: u64,
    /// Events with [`GameAction::LeveledUp`].
    pub levelup_count: u64,
}

impl StreamStats {
    /// Return `true` if no event has been counted.
    pub const fn is_empty(&self) -> bool {
        self.total_processed == 0
    }
}
