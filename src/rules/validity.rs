//! Legal-position checking.
//!
//! A sequence of moves is a legal position when it satisfies:
//!
//! 1. **Parity**: the opener moves first, then players alternate.
//! 2. **Linearity**: no address is played twice.
//! 3. **Justification**: every non-initial move is enabled by an earlier move.
//! 4. **Visibility**: that justifier lies in the mover's own view of the
//!    prefix before the move.
//!
//! Moves that do not belong to the arena are reported as `UnknownAddress`.
//! Every violation is reported; checking never stops at the first one.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::core::{Address, Move};
use crate::position::views::{justifier_index, view_indices};

/// Which rule a violation breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// Wrong opener or two consecutive moves by the same player.
    Parity,
    /// An address played twice.
    Linearity,
    /// A non-initial move with no enabling earlier move.
    Justification,
    /// A justifier outside the mover's view.
    Visibility,
    /// A move that is not part of the arena.
    UnknownAddress,
}

/// One occurrence of a broken rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The rule broken.
    pub kind: ViolationKind,
    /// 0-based index of the offending move.
    pub index: usize,
    /// Human-readable description (positions counted from 1).
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of checking a position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityReport {
    /// All checks passed.
    pub is_valid: bool,
    /// Opener and alternation are respected.
    pub parity_ok: bool,
    /// No repeated addresses.
    pub linearity_ok: bool,
    /// Every non-initial move has a justifier.
    pub justification_ok: bool,
    /// Every justifier is visible to the mover.
    pub visibility_ok: bool,
    /// Every move belongs to the arena.
    pub addresses_ok: bool,
    /// Every violation found, in the order checked.
    pub violations: Vec<Violation>,
}

impl Default for ValidityReport {
    fn default() -> Self {
        Self {
            is_valid: true,
            parity_ok: true,
            linearity_ok: true,
            justification_ok: true,
            visibility_ok: true,
            addresses_ok: true,
            violations: Vec::new(),
        }
    }
}

impl ValidityReport {
    /// Violations of one kind.
    pub fn violations_of(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// Does the report contain a violation of `kind`?
    #[must_use]
    pub fn has(&self, kind: ViolationKind) -> bool {
        self.violations_of(kind).next().is_some()
    }

    /// Violation messages, for display.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }

    fn record(&mut self, kind: ViolationKind, index: usize, message: String) {
        match kind {
            ViolationKind::Parity => self.parity_ok = false,
            ViolationKind::Linearity => self.linearity_ok = false,
            ViolationKind::Justification => self.justification_ok = false,
            ViolationKind::Visibility => self.visibility_ok = false,
            ViolationKind::UnknownAddress => self.addresses_ok = false,
        }
        self.is_valid = false;
        self.violations.push(Violation {
            kind,
            index,
            message,
        });
    }
}

/// Check `sequence` against every legality rule of `arena`.
///
/// Pure and total: any well-typed input yields a report.
///
/// ```
/// use dialogue_games::arena::{Arena, ArenaConfig};
/// use dialogue_games::rules::{validate_position, ViolationKind};
///
/// let arena = Arena::generate(&ArenaConfig::new(2, 2)).unwrap();
/// let claim = arena.move_at(&"1".parse().unwrap()).unwrap().clone();
///
/// let report = validate_position(&arena, &[claim.clone(), claim]);
/// assert!(!report.is_valid);
/// assert!(report.has(ViolationKind::Linearity));
/// ```
#[must_use]
pub fn validate_position(arena: &Arena, sequence: &[Move]) -> ValidityReport {
    let mut report = ValidityReport::default();

    check_addresses(arena, sequence, &mut report);
    check_parity(arena, sequence, &mut report);
    check_linearity(sequence, &mut report);
    check_justification(sequence, &mut report);

    report
}

fn check_addresses(arena: &Arena, sequence: &[Move], report: &mut ValidityReport) {
    for (i, mv) in sequence.iter().enumerate() {
        match arena.move_at(&mv.address) {
            None => report.record(
                ViolationKind::UnknownAddress,
                i,
                format!(
                    "address {} at position {} is not in {}",
                    mv.address,
                    i + 1,
                    arena.id()
                ),
            ),
            Some(known) if known != mv => report.record(
                ViolationKind::UnknownAddress,
                i,
                format!(
                    "move {} at position {} differs from the arena's {}",
                    mv,
                    i + 1,
                    known
                ),
            ),
            Some(_) => {}
        }
    }
}

fn check_parity(arena: &Arena, sequence: &[Move], report: &mut ValidityReport) {
    if let Some(first) = sequence.first() {
        if first.player != arena.opener() {
            report.record(
                ViolationKind::Parity,
                0,
                format!(
                    "position 1 is played by {} but {} opens this arena",
                    first.player,
                    arena.opener()
                ),
            );
        }
    }

    for (i, pair) in sequence.windows(2).enumerate() {
        if pair[0].player == pair[1].player {
            report.record(
                ViolationKind::Parity,
                i + 1,
                format!(
                    "positions {} and {} are both played by {}",
                    i + 1,
                    i + 2,
                    pair[1].player
                ),
            );
        }
    }
}

fn check_linearity(sequence: &[Move], report: &mut ValidityReport) {
    let mut first_seen: FxHashMap<&Address, usize> = FxHashMap::default();
    for (i, mv) in sequence.iter().enumerate() {
        match first_seen.get(&mv.address) {
            Some(&earlier) => report.record(
                ViolationKind::Linearity,
                i,
                format!(
                    "address {} repeated at positions {} and {}",
                    mv.address,
                    earlier + 1,
                    i + 1
                ),
            ),
            None => {
                first_seen.insert(&mv.address, i);
            }
        }
    }
}

/// Justification and visibility share the justifier lookup.
fn check_justification(sequence: &[Move], report: &mut ValidityReport) {
    for (i, mv) in sequence.iter().enumerate() {
        if mv.is_initial {
            continue;
        }

        let Some(j) = justifier_index(sequence, i) else {
            report.record(
                ViolationKind::Justification,
                i,
                format!(
                    "move {} at position {} has no justifier among earlier moves",
                    mv.address,
                    i + 1
                ),
            );
            continue;
        };

        if !view_indices(&sequence[..i], mv.player).contains(&j) {
            report.record(
                ViolationKind::Visibility,
                i,
                format!(
                    "justifier {} of move {} at position {} is not in the {}-view",
                    sequence[j].address,
                    mv.address,
                    i + 1,
                    mv.player
                ),
            );
        }
    }
}
