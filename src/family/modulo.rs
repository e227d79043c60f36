//! Modulo "hashing": `index = key mod m`. No parameter state.
//!
//! The baseline family for the linear-probing comparison. The cuckoo engine
//! never uses it: with no randomness to redraw, a rehash could not change
//! anything.

use rand::Rng;

use super::HashFamily;

/// Parameter-free modulo family.
#[derive(Debug, Clone, Copy)]
pub struct Modulo {
    m: u64,
}

impl Modulo {
    /// Builds the family for a table of `2^k` slots.
    pub fn new(k: u32) -> Self {
        debug_assert!((1..64).contains(&k));
        Self { m: 1u64 << k }
    }
}

impl HashFamily for Modulo {
    fn draw<R: Rng>(k: u32, _rng: &mut R) -> Self {
        Self::new(k)
    }

    fn index(&self, key: u64) -> usize {
        (key % self.m) as usize
    }
}
