//! Arena encodings for external storage.
//!
//! Two forms:
//! - **Compact text** ([`EncodedArena`]): `addr:player:r1,r2|...`, short
//!   enough to sit in a single database column.
//! - **Binary** (`bincode`): the serde form of [`Arena`], for caches keyed
//!   by [`ArenaConfig`](super::ArenaConfig).
//!
//! Decoding always re-checks the tree invariant.

use serde::{Deserialize, Serialize};

use crate::core::{Address, EngineError, Move, Player, Result};

use super::arena::{Arena, ArenaId};

/// Current compact format version.
pub const ENCODING_VERSION: u8 = 1;

/// Serde representation of an arena (the lookup index is rebuilt on load).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArenaRecord {
    id: ArenaId,
    label: String,
    base: Address,
    opener: Player,
    moves: Vec<Move>,
}

impl From<Arena> for ArenaRecord {
    fn from(arena: Arena) -> Self {
        Self {
            id: arena.id(),
            label: arena.label().to_string(),
            base: arena.base().clone(),
            opener: arena.opener(),
            moves: arena.moves().to_vec(),
        }
    }
}

impl TryFrom<ArenaRecord> for Arena {
    type Error = EngineError;

    fn try_from(record: ArenaRecord) -> Result<Self> {
        Arena::from_parts(record.id, record.label, record.base, record.opener, record.moves)
    }
}

/// Compact textual arena.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedArena {
    /// Format version.
    pub v: u8,
    /// Arena id.
    pub id: u64,
    /// Root judgment label.
    pub label: String,
    /// Base address, dotted.
    pub base: String,
    /// Opening player symbol.
    pub opener: String,
    /// Moves as `addr:player:r1,r2`, joined by `|`.
    pub moves: String,
}

impl Arena {
    /// Encode to the compact textual form.
    ///
    /// ```
    /// use dialogue_games::arena::{Arena, ArenaConfig};
    ///
    /// let arena = Arena::generate(&ArenaConfig::new(2, 2)).unwrap();
    /// assert_eq!(arena.encode().moves, "1:P:1,2|2:P:|1.1:O:|1.2:O:");
    /// ```
    #[must_use]
    pub fn encode(&self) -> EncodedArena {
        let moves = self
            .moves()
            .iter()
            .map(|mv| {
                let ramification = mv
                    .ramification
                    .iter()
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{}:{}:{}", mv.address, mv.player, ramification)
            })
            .collect::<Vec<_>>()
            .join("|");

        EncodedArena {
            v: ENCODING_VERSION,
            id: self.id().0,
            label: self.label().to_string(),
            base: self.base().to_string(),
            opener: self.opener().to_string(),
            moves,
        }
    }

    /// Decode the compact textual form.
    pub fn decode(encoded: &EncodedArena) -> Result<Self> {
        if encoded.v != ENCODING_VERSION {
            return Err(EngineError::parse(
                format!("v{}", encoded.v),
                format!("unsupported encoding version (expected {})", ENCODING_VERSION),
            ));
        }

        let base: Address = encoded.base.parse()?;
        let opener = parse_player(&encoded.opener)?;

        let moves = encoded
            .moves
            .split('|')
            .filter(|entry| !entry.is_empty())
            .map(|entry| decode_move(entry, &base))
            .collect::<Result<Vec<_>>>()?;

        Arena::from_parts(ArenaId(encoded.id), encoded.label.clone(), base, opener, moves)
    }

    /// Encode to `bincode` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode `bincode` bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

fn decode_move(entry: &str, base: &Address) -> Result<Move> {
    let mut parts = entry.splitn(3, ':');
    let (address, player, ramification) = match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(p), Some(r)) => (a, p, r),
        _ => return Err(EngineError::parse(entry, "expected addr:player:ramification")),
    };

    let address: Address = address.parse()?;
    let player = parse_player(player)?;
    let ramification = ramification
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<u32>() {
            Ok(0) | Err(_) => Err(EngineError::parse(entry, format!("bad branch index {:?}", s))),
            Ok(i) => Ok(i),
        })
        .collect::<Result<Vec<_>>>()?;

    let is_initial = address.is_child_of(base);
    Ok(Move::new(address, ramification, player, is_initial))
}

fn parse_player(symbol: &str) -> Result<Player> {
    Player::from_symbol(symbol).ok_or_else(|| EngineError::parse(symbol, "expected P or O"))
}
