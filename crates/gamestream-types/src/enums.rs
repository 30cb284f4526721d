//! Enumeration types for game events.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Something a player did, as recorded on a game event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameAction {
    /// The player defeated a monster.
    KilledMonster,
    /// The player picked up treasure.
    FoundTreasure,
    /// The player gained a level.
    LeveledUp,
}

impl GameAction {
    /// Every action in reference table order.
    pub const ALL: [Self; 3] = [Self::KilledMonster, Self::FoundTreasure, Self::LeveledUp];

    /// Human-readable text used in progress lines (e.g. `"found treasure"`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::KilledMonster => "killed monster",
            Self::FoundTreasure => "found treasure",
            Self::LeveledUp => "leveled up",
        }
    }

    /// Configuration key for this action (e.g. `"found_treasure"`).
    pub const fn key(self) -> &'static str {
        match self {
            Self::KilledMonster => "killed_monster",
            Self::FoundTreasure => "found_treasure",
            Self::LeveledUp => "leveled_up",
        }
    }
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
