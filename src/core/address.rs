//! Hierarchical move addresses.
//!
//! An address is a path of positive branch indices from the arena root,
//! written dotted (`1.2.1`). The root itself is the empty path; it names the
//! base of the arena and is never a move.
//!
//! ```
//! use dialogue_games::core::Address;
//!
//! let addr: Address = "1.2.1".parse().unwrap();
//! assert_eq!(addr.depth(), 3);
//! assert_eq!(addr.parent().unwrap().to_string(), "1.2");
//! assert_eq!(addr.last_segment(), Some(1));
//! assert_eq!(addr.parent().unwrap().child(3).to_string(), "1.2.3");
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::str::FromStr;

use super::error::{EngineError, Result};

/// Dotted path of positive branch indices.
///
/// SmallVec keeps addresses up to depth 6 inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(SmallVec<[u32; 6]>);

impl Address {
    /// The empty (root) address.
    #[must_use]
    pub fn root() -> Self {
        Self(SmallVec::new())
    }

    /// Build an address from segments, rejecting zero segments.
    pub fn from_segments(segments: &[u32]) -> Result<Self> {
        if segments.contains(&0) {
            let text = segments
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(".");
            return Err(EngineError::parse(text, "branch indices start at 1"));
        }
        Ok(Self(SmallVec::from_slice(segments)))
    }

    /// Path segments from the root.
    #[must_use]
    pub fn segments(&self) -> &[u32] {
        &self.0
    }

    /// Number of segments. The root has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Is this the root address?
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Address of branch `index` below this one.
    #[must_use]
    pub fn child(&self, index: u32) -> Self {
        debug_assert!(index > 0, "branch indices start at 1");
        let mut segments = self.0.clone();
        segments.push(index);
        Self(segments)
    }

    /// Parent address, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .split_last()
            .map(|(_, rest)| Self(SmallVec::from_slice(rest)))
    }

    /// Last segment, or `None` for the root.
    #[must_use]
    pub fn last_segment(&self) -> Option<u32> {
        self.0.last().copied()
    }

    /// Is `self` the direct child of `parent`?
    #[must_use]
    pub fn is_child_of(&self, parent: &Address) -> bool {
        self.depth() == parent.depth() + 1 && self.0.starts_with(&parent.0)
    }

    /// Is `self` a (non-strict) prefix of `other`?
    #[must_use]
    pub fn is_prefix_of(&self, other: &Address) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Is `other` strictly below `self`?
    #[must_use]
    pub fn is_strict_prefix_of(&self, other: &Address) -> bool {
        other.depth() > self.depth() && self.is_prefix_of(other)
    }

    /// Segments below `base`, if `self` lies under it.
    #[must_use]
    pub fn relative_to(&self, base: &Address) -> Option<Self> {
        if base.is_prefix_of(self) {
            Some(Self(SmallVec::from_slice(&self.0[base.depth()..])))
        } else {
            None
        }
    }

    /// `self` with the `from` prefix replaced by `to`.
    #[must_use]
    pub fn rebase(&self, from: &Address, to: &Address) -> Option<Self> {
        let relative = self.relative_to(from)?;
        let mut segments = to.0.clone();
        segments.extend_from_slice(&relative.0);
        Some(Self(segments))
    }

    /// Shortlex order: shallower first, then lexicographic by segment.
    #[must_use]
    pub fn shortlex_cmp(&self, other: &Address) -> Ordering {
        self.depth()
            .cmp(&other.depth())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = EngineError;

    /// Parse a dotted address. The empty string is the root.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let mut segments = SmallVec::new();
        for part in trimmed.split('.') {
            let index: u32 = part
                .parse()
                .map_err(|_| EngineError::parse(s, format!("segment {:?} is not a number", part)))?;
            if index == 0 {
                return Err(EngineError::parse(s, "branch indices start at 1"));
            }
            segments.push(index);
        }
        Ok(Self(segments))
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.shortlex_cmp(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(addr("1.2.1").segments(), &[1, 2, 1]);
        assert_eq!(addr("1.2.1").to_string(), "1.2.1");
        assert!(addr("").is_root());
        assert_eq!(Address::root().to_string(), "");
    }

    #[test]
    fn test_parse_rejects_bad_segments() {
        assert!("1.0".parse::<Address>().is_err());
        assert!("1..2".parse::<Address>().is_err());
        assert!("a.1".parse::<Address>().is_err());
        assert!("-1".parse::<Address>().is_err());
    }

    #[test]
    fn test_from_segments() {
        assert_eq!(Address::from_segments(&[2, 3]).unwrap(), addr("2.3"));
        assert!(Address::from_segments(&[1, 0]).is_err());
    }

    #[test]
    fn test_parent_child() {
        let a = addr("1.2");
        assert_eq!(a.parent(), Some(addr("1")));
        assert_eq!(addr("1").parent(), Some(Address::root()));
        assert_eq!(Address::root().parent(), None);
        assert_eq!(a.child(4), addr("1.2.4"));
        assert!(addr("1.2.4").is_child_of(&a));
        assert!(!addr("1.2.4.1").is_child_of(&a));
        assert!(!addr("1.3.4").is_child_of(&a));
    }

    #[test]
    fn test_prefixes() {
        assert!(addr("1").is_prefix_of(&addr("1.2")));
        assert!(addr("1").is_prefix_of(&addr("1")));
        assert!(!addr("1").is_strict_prefix_of(&addr("1")));
        assert!(Address::root().is_strict_prefix_of(&addr("3")));
        assert!(!addr("2").is_prefix_of(&addr("1.2")));
    }

    #[test]
    fn test_rebase() {
        let moved = addr("1.2").rebase(&Address::root(), &addr("3")).unwrap();
        assert_eq!(moved, addr("3.1.2"));
        assert_eq!(addr("3.1.2").relative_to(&addr("3")), Some(addr("1.2")));
        assert_eq!(addr("1.2").relative_to(&addr("3")), None);
    }

    #[test]
    fn test_shortlex_order() {
        let mut addrs = vec![addr("1.1"), addr("2"), addr("1"), addr("1.2"), addr("2.1")];
        addrs.sort();
        let printed: Vec<_> = addrs.iter().map(|a| a.to_string()).collect();
        assert_eq!(printed, vec!["1", "2", "1.1", "1.2", "2.1"]);
    }

    #[test]
    fn test_serialization() {
        let a = addr("1.2.3");
        let json = serde_json::to_string(&a).unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
