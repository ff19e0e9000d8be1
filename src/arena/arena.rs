//! The arena: an immutable tree of addressed moves.
//!
//! ## Construction
//!
//! - [`Arena::generate`] saturates every address allowed by an
//!   [`ArenaConfig`] (a *universal* arena rooted at the empty address).
//! - [`Arena::from_moves`] checks an externally supplied move set against
//!   the tree invariant and rejects it rather than patching holes.
//! - [`Arena::delocate`] moves an arena under a new base address, giving an
//!   *atomic* arena.
//!
//! ## Invariant
//!
//! Every non-initial move at `ξi` has a parent move at `ξ` whose
//! ramification contains `i`. Moves are unique by address and stored in
//! shortlex order.

use log::debug;
use rustc_hash::{FxHashMap, FxHasher};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

use crate::core::{Address, ArenaViolation, Move, Player, Ramification, Result};

use super::config::ArenaConfig;
use super::encoding::ArenaRecord;

/// Stable arena identity.
///
/// Generated arenas derive it from their config, hand-built arenas from
/// their content, so equal inputs always give equal ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArenaId(pub u64);

impl std::fmt::Display for ArenaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "arena-{:016x}", self.0)
    }
}

/// Summary counts for an arena.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaStats {
    /// Total moves.
    pub move_count: usize,
    /// Deepest address, relative to the base.
    pub max_depth: usize,
    /// Moves owned by Proponent.
    pub proponent_moves: usize,
    /// Moves owned by Opponent.
    pub opponent_moves: usize,
    /// Moves needing no justifier.
    pub initial_moves: usize,
    /// Justifier-to-move edges (one per non-initial move).
    pub enabling_edges: usize,
}

/// An immutable tree of addressed moves.
///
/// Share it read-only (e.g. behind an `Arc`) between any number of
/// positions and explorers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ArenaRecord", try_from = "ArenaRecord")]
pub struct Arena {
    id: ArenaId,
    label: String,
    base: Address,
    opener: Player,
    moves: Vec<Move>,
    index: FxHashMap<Address, usize>,
}

impl Arena {
    /// Generate the universal arena described by `config`.
    ///
    /// Fails with `InvalidConfiguration` before building anything if the
    /// bounds are unusable.
    ///
    /// ```
    /// use dialogue_games::arena::{Arena, ArenaConfig};
    ///
    /// let arena = Arena::generate(&ArenaConfig::new(2, 2)).unwrap();
    /// assert_eq!(arena.len(), 4);
    /// assert_eq!(arena.initial_moves().len(), 2);
    /// ```
    pub fn generate(config: &ArenaConfig) -> Result<Self> {
        config.validate()?;

        let mut moves = Vec::with_capacity(config.move_count().unwrap_or(0));
        let root_branches: Ramification = (1..=config.max_ramification).collect();
        let mut frontier: Vec<(Address, Ramification)> = vec![(Address::root(), root_branches)];

        for depth in 1..=config.max_depth {
            let player = config.opener.at_depth(depth as usize);
            let mut next = Vec::new();

            for (parent, branches) in &frontier {
                for &k in branches {
                    let address = parent.child(k);
                    let ramification = config.ramification_at(depth, k);
                    if !ramification.is_empty() {
                        next.push((address.clone(), ramification.clone()));
                    }
                    moves.push(Move::new(address, ramification, player, depth == 1));
                }
            }

            frontier = next;
        }

        let arena = Self::assemble(
            config.id(),
            config.base_label.clone(),
            Address::root(),
            config.opener,
            moves,
        );

        debug!(
            "generated {} with {} moves (depth {}, ramification {})",
            arena.id,
            arena.len(),
            config.max_depth,
            config.max_ramification
        );

        Ok(arena)
    }

    /// Build an arena from explicit moves, enforcing the tree invariant.
    ///
    /// `is_initial` is recomputed from the base; ramifications are
    /// re-normalized. Ownership must alternate by depth from `opener`.
    /// Missing parents are an error, never synthesized.
    pub fn from_moves(
        label: impl Into<String>,
        base: Address,
        opener: Player,
        moves: impl IntoIterator<Item = Move>,
    ) -> Result<Self> {
        let mut moves: Vec<Move> = moves.into_iter().collect();

        for mv in &mut moves {
            if !base.is_strict_prefix_of(&mv.address) {
                return Err(ArenaViolation::OutsideBase {
                    address: mv.address.clone(),
                    base: base.to_string(),
                }
                .into());
            }
            if mv.ramification.contains(&0) {
                return Err(ArenaViolation::InvalidRamification(mv.address.clone()).into());
            }
            let expected = opener.at_depth(mv.address.depth() - base.depth());
            if mv.player != expected {
                return Err(ArenaViolation::WrongOwner {
                    address: mv.address.clone(),
                    expected,
                }
                .into());
            }
            mv.ramification.sort_unstable();
            mv.ramification.dedup();
            mv.is_initial = mv.address.depth() == base.depth() + 1;
        }

        moves.sort_by(|a, b| a.address.cmp(&b.address));
        if let Some(pair) = moves.windows(2).find(|w| w[0].address == w[1].address) {
            return Err(ArenaViolation::DuplicateAddress(pair[0].address.clone()).into());
        }

        let label = label.into();
        let mut hasher = FxHasher::default();
        label.hash(&mut hasher);
        base.hash(&mut hasher);
        opener.hash(&mut hasher);
        moves.hash(&mut hasher);
        let id = ArenaId(hasher.finish());

        let arena = Self::assemble(id, label, base, opener, moves);
        arena.check_tree()?;
        Ok(arena)
    }

    /// Move this arena under `base`, giving an atomic arena.
    ///
    /// Every address `ξ` below the current base becomes `base·ξ`.
    /// Ownership and initial moves are preserved.
    #[must_use]
    pub fn delocate(&self, base: &Address) -> Self {
        if *base == self.base {
            return self.clone();
        }

        let moves = self
            .moves
            .iter()
            .filter_map(|mv| {
                mv.address.rebase(&self.base, base).map(|address| Move {
                    address,
                    ..mv.clone()
                })
            })
            .collect();

        let mut hasher = FxHasher::default();
        self.id.hash(&mut hasher);
        base.hash(&mut hasher);

        Self::assemble(
            ArenaId(hasher.finish()),
            self.label.clone(),
            base.clone(),
            self.opener,
            moves,
        )
    }

    pub(crate) fn from_parts(
        id: ArenaId,
        label: String,
        base: Address,
        opener: Player,
        moves: Vec<Move>,
    ) -> Result<Self> {
        let mut arena = Self::from_moves(label, base, opener, moves)?;
        arena.id = id;
        Ok(arena)
    }

    fn assemble(
        id: ArenaId,
        label: String,
        base: Address,
        opener: Player,
        mut moves: Vec<Move>,
    ) -> Self {
        moves.sort_by(|a, b| a.address.cmp(&b.address));
        let index = moves
            .iter()
            .enumerate()
            .map(|(i, mv)| (mv.address.clone(), i))
            .collect();

        Self {
            id,
            label,
            base,
            opener,
            moves,
            index,
        }
    }

    fn check_tree(&self) -> Result<()> {
        for mv in self.moves.iter().filter(|mv| !mv.is_initial) {
            let (parent, last) = match (mv.address.parent(), mv.address.last_segment()) {
                (Some(parent), Some(last)) => (parent, last),
                _ => return Err(ArenaViolation::MissingParent(mv.address.clone()).into()),
            };
            match self.move_at(&parent) {
                None => return Err(ArenaViolation::MissingParent(mv.address.clone()).into()),
                Some(p) if !p.opens(last) => {
                    return Err(ArenaViolation::UndeclaredBranch {
                        address: mv.address.clone(),
                        parent,
                    }
                    .into())
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    // === Accessors ===

    /// Arena identity.
    #[must_use]
    pub fn id(&self) -> ArenaId {
        self.id
    }

    /// Root judgment label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Base address (empty for universal arenas).
    #[must_use]
    pub fn base(&self) -> &Address {
        &self.base
    }

    /// Player owning the initial moves.
    #[must_use]
    pub fn opener(&self) -> Player {
        self.opener
    }

    /// Is this arena rooted at the empty address?
    #[must_use]
    pub fn is_universal(&self) -> bool {
        self.base.is_root()
    }

    /// Delocalization address of an atomic arena.
    #[must_use]
    pub fn delocalization(&self) -> Option<&Address> {
        if self.base.is_root() {
            None
        } else {
            Some(&self.base)
        }
    }

    /// All moves in shortlex address order.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Number of moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Does the arena have no moves?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    // === Queries ===

    /// The move at `address`, if any.
    #[must_use]
    pub fn move_at(&self, address: &Address) -> Option<&Move> {
        self.index.get(address).map(|&i| &self.moves[i])
    }

    /// Is there a move at `address`?
    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.index.contains_key(address)
    }

    /// Moves exactly `depth` segments below the base.
    #[must_use]
    pub fn moves_at(&self, depth: usize) -> Vec<&Move> {
        let absolute = self.base.depth() + depth;
        self.moves
            .iter()
            .filter(|mv| mv.address.depth() == absolute)
            .collect()
    }

    /// Moves that need no justifier.
    #[must_use]
    pub fn initial_moves(&self) -> Vec<&Move> {
        self.moves_at(1)
    }

    /// Moves owned by `player`.
    #[must_use]
    pub fn moves_for(&self, player: Player) -> Vec<&Move> {
        self.moves.iter().filter(|mv| mv.player == player).collect()
    }

    /// Addresses `mv` declares reachable.
    #[must_use]
    pub fn child_addresses_of(&self, mv: &Move) -> Vec<Address> {
        mv.child_addresses()
    }

    /// Is `candidate` an initial address, or opened by the move at its parent?
    ///
    /// This only consults the declaring move; the candidate itself need not
    /// exist in the arena.
    #[must_use]
    pub fn is_declared_reachable(&self, candidate: &Address) -> bool {
        if candidate.is_child_of(&self.base) {
            return true;
        }
        match candidate.parent() {
            Some(parent) => self
                .move_at(&parent)
                .is_some_and(|p| p.enables_address(candidate)),
            None => false,
        }
    }

    /// Moves justified by `mv`.
    #[must_use]
    pub fn enabled_by(&self, mv: &Move) -> Vec<&Move> {
        mv.ramification
            .iter()
            .filter_map(|&i| self.move_at(&mv.address.child(i)))
            .collect()
    }

    /// The move justifying `mv`, or `None` for initial moves.
    #[must_use]
    pub fn justifier_of(&self, mv: &Move) -> Option<&Move> {
        if mv.is_initial {
            return None;
        }
        let parent = mv.address.parent()?;
        self.move_at(&parent).filter(|p| p.enables(mv))
    }

    /// Justification chain of `mv`, nearest first.
    #[must_use]
    pub fn ancestors(&self, mv: &Move) -> Vec<&Move> {
        let mut chain = Vec::new();
        let mut current = self.justifier_of(mv);
        while let Some(parent) = current {
            chain.push(parent);
            current = self.justifier_of(parent);
        }
        chain
    }

    /// Every move reachable from `mv` through enabling, breadth-first.
    #[must_use]
    pub fn descendants(&self, mv: &Move) -> Vec<&Move> {
        let mut found = Vec::new();
        let mut queue: VecDeque<&Move> = self.enabled_by(mv).into();
        while let Some(current) = queue.pop_front() {
            found.push(current);
            queue.extend(self.enabled_by(current));
        }
        found
    }

    /// Summary counts.
    #[must_use]
    pub fn stats(&self) -> ArenaStats {
        let base_depth = self.base.depth();
        let mut stats = ArenaStats {
            move_count: self.moves.len(),
            ..ArenaStats::default()
        };

        for mv in &self.moves {
            stats.max_depth = stats.max_depth.max(mv.address.depth() - base_depth);
            match mv.player {
                Player::Proponent => stats.proponent_moves += 1,
                Player::Opponent => stats.opponent_moves += 1,
            }
            if mv.is_initial {
                stats.initial_moves += 1;
            } else {
                stats.enabling_edges += 1;
            }
        }

        stats
    }
}
