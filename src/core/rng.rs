//! Seeded RNG for random playouts.
//!
//! Arena generation never touches randomness. The only consumer is the
//! explorer's random playout, which must replay identically for a given
//! seed so that sampled dialogues can be reproduced.
//!
//! ```
//! use dialogue_games::core::PlayoutRng;
//!
//! let mut a = PlayoutRng::new(7);
//! let mut b = PlayoutRng::new(7);
//! assert_eq!(a.gen_index(100), b.gen_index(100));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic ChaCha8 RNG with forking for independent playouts.
#[derive(Clone, Debug)]
pub struct PlayoutRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl PlayoutRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork an independent, deterministic stream (one per playout).
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Uniform index in `0..len`. Returns 0 when `len` is 0.
    pub fn gen_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.inner.gen_range(0..len)
    }

    /// Choose a uniformly random element.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    /// Capture the stream position for later replay.
    #[must_use]
    pub fn state(&self) -> PlayoutRngState {
        PlayoutRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore a captured stream position.
    #[must_use]
    pub fn from_state(state: &PlayoutRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable checkpoint of a [`PlayoutRng`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayoutRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
    /// Forks taken so far.
    pub fork_counter: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = PlayoutRng::new(42);
        let mut rng2 = PlayoutRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_index(1000), rng2.gen_index(1000));
        }
    }

    #[test]
    fn test_forks_differ_but_repeat() {
        let mut rng = PlayoutRng::new(42);
        let mut first = rng.fork();
        let mut second = rng.fork();

        let seq1: Vec<_> = (0..10).map(|_| first.gen_index(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| second.gen_index(1000)).collect();
        assert_ne!(seq1, seq2);

        let mut again = PlayoutRng::new(42).fork();
        let seq3: Vec<_> = (0..10).map(|_| again.gen_index(1000)).collect();
        assert_eq!(seq1, seq3);
    }

    #[test]
    fn test_choose_and_empty() {
        let mut rng = PlayoutRng::new(3);
        let items = [10, 20, 30];
        assert!(items.contains(rng.choose(&items).unwrap()));

        let empty: [i32; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.gen_index(0), 0);
    }

    #[test]
    fn test_state_roundtrip_resumes_stream() {
        let mut rng = PlayoutRng::new(9);
        for _ in 0..50 {
            rng.gen_index(10);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.gen_index(1000)).collect();

        let mut restored = PlayoutRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.gen_index(1000)).collect();
        assert_eq!(expected, actual);
    }
}
