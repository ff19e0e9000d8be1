//! Legality rules for dialogue game positions.
//!
//! - `validity`: parity, linearity, justification, visibility and
//!   arena-membership checks producing a [`ValidityReport`]

pub mod validity;

pub use validity::{validate_position, ValidityReport, Violation, ViolationKind};
