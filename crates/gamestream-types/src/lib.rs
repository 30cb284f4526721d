//! Shared type definitions for the GameStream demonstration.
//!
//! Every crate in the workspace describes game events, roster entries, and
//! stream statistics with the types defined here.
//!
//! # Modules
//!
//! - [`ids`] -- Identifier wrapper for a single demonstration run
//! - [`enums`] -- The [`GameAction`] enumeration
//! - [`structs`] -- Events, roster entries, and the running aggregate

pub mod enums;
pub mod ids;
pub mod structs;

pub use enums::GameAction;
pub use ids::RunId;
pub use structs::{GameEvent, PlayerProfile, StreamStats};
