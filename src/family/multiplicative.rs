//! Multiplicative hashing over the native 64-bit ring.
//!
//! `index = ((a * key) mod 2^64 mod (2^64 - 1)) / ((2^64 - 1) / m)` with a
//! uniformly drawn multiplier `a`. The multiplication wraps at 2^64 on
//! purpose; reproducing that wraparound exactly is the whole point, since
//! the resulting non-uniformity is what the harness measures.

use rand::Rng;

use super::HashFamily;

/// Outer modulus of the scheme, `2^64 - 1`.
const U: u64 = u64::MAX;

/// Multiplicative hash family: one 64-bit multiplier per state.
#[derive(Debug, Clone, Copy)]
pub struct Multiplicative {
    a: u64,
    m: u64,
}

impl Multiplicative {
    /// Builds the family with an explicit multiplier, for reproducing a
    /// specific run or pinning down a degenerate case in tests.
    pub fn with_multiplier(k: u32, a: u64) -> Self {
        debug_assert!((1..64).contains(&k));
        Self { a, m: 1u64 << k }
    }
}

impl HashFamily for Multiplicative {
    fn draw<R: Rng>(k: u32, rng: &mut R) -> Self {
        Self::with_multiplier(k, rng.gen::<u64>())
    }

    fn index(&self, key: u64) -> usize {
        let x = self.a.wrapping_mul(key) % U;
        // Floor division by (U / m) maps the top partial stripe of residues
        // (x > U - U % m roughly) to m itself; clamp that off-by-one back
        // into range. See e.g. a = 1, key = 2^64 - 2.
        let index = x / (U / self.m);
        index.min(self.m - 1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_multiplier_matches_direct_computation() {
        let m = 1u64 << 20;
        let family = Multiplicative::with_multiplier(20, 1);

        // key mod (2^64 - 1) == 0 for key = 2^64 - 1, so the top key lands
        // in bucket 0, and so does key = 1.
        assert_eq!(family.index(u64::MAX), 0);
        assert_eq!(family.index(1), 0);

        // Direct computation for an arbitrary key.
        let key = 0x0123_4567_89AB_CDEFu64;
        assert_eq!(family.index(key), ((key % U) / (U / m)) as usize);
    }

    #[test]
    fn top_stripe_clamps_to_last_bucket() {
        // x = (2^64 - 2) mod (2^64 - 1) = U - 1, and (U - 1) / (U / 2^20)
        // is exactly 2^20 = m: the documented off-by-one. It must clamp to
        // the last valid bucket instead of indexing out of bounds.
        let family = Multiplicative::with_multiplier(20, 1);
        assert_eq!(family.index(u64::MAX - 1), (1usize << 20) - 1);
    }

    #[test]
    fn wraparound_is_reproduced() {
        // a * key overflows 64 bits; the index must come from the wrapped
        // product, not a widened one.
        let a = 0x9E37_79B9_7F4A_7C15u64;
        let key = 0xFEDC_BA98_7654_3210u64;
        let family = Multiplicative::with_multiplier(12, a);
        let x = a.wrapping_mul(key) % U;
        let expected = (x / (U / (1u64 << 12))).min((1u64 << 12) - 1) as usize;
        assert_eq!(family.index(key), expected);
    }
}
