//! Core engine types: addresses, players, moves, errors, RNG.
//!
//! These are the leaf data types of the dialogue game. Everything else
//! (arenas, positions, the validator, the explorer) is built on them.

pub mod address;
pub mod error;
pub mod moves;
pub mod player;
pub mod rng;

pub use address::Address;
pub use error::{ArenaViolation, EngineError, Result};
pub use moves::{Move, Ramification};
pub use player::Player;
pub use rng::{PlayoutRng, PlayoutRngState};
