//! Arenas: the space of possible moves of a dialogue game.
//!
//! An arena is generated once from bounded parameters (or checked from an
//! explicit move set) and is immutable afterwards. Positions refer to it by
//! [`ArenaId`] and read it through shared references.

pub mod arena;
pub mod config;
pub mod encoding;

pub use arena::{Arena, ArenaId, ArenaStats};
pub use config::{ArenaConfig, MAX_ARENA_DEPTH, MAX_ARENA_MOVES};
pub use encoding::{ArenaRecord, EncodedArena, ENCODING_VERSION};
