//! # Hash Families
//!
//! A hash family maps a 64-bit key to a bucket index in `[0, m)` for a table
//! of `m = 2^k` slots, given a family-specific parameter state. Three
//! interchangeable families are provided:
//!
//! - [`Multiplicative`]: one random 64-bit multiplier; the 64-bit wraparound
//!   in the product is intentional and is the dominant source of the bias
//!   this crate measures.
//! - [`Modulo`]: `key mod m`, no parameters; provided for the linear-probing
//!   comparison only and never used by the cuckoo engine.
//! - [`Tabulation`]: XOR of per-byte lookups in random tables whose entries
//!   are already range-limited to `[0, m)`.
//!
//! A family is drawn once at run configuration time (and redrawn on rehash);
//! the engines are generic over [`HashFamily`], so there is no per-call
//! family dispatch and no possibility of requesting an unknown family.

pub mod modulo;
pub mod multiplicative;
pub mod tabulation;

pub use modulo::Modulo;
pub use multiplicative::Multiplicative;
pub use tabulation::Tabulation;

use rand::Rng;

/// A family of hash functions from 64-bit keys to bucket indices.
///
/// For a fixed parameter state, [`index`](HashFamily::index) is a pure
/// function: same key, same bucket, every time.
pub trait HashFamily {
    /// Draws a fresh parameter state for a table of `2^k` slots.
    fn draw<R: Rng>(k: u32, rng: &mut R) -> Self
    where
        Self: Sized;

    /// Maps `key` to a bucket index in `[0, 2^k)`.
    fn index(&self, key: u64) -> usize;
}

/// Which hash family a benchmark run is configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyKind {
    Multiplicative,
    Modulo,
    Tabulation,
}

impl FamilyKind {
    /// Short name used in reports and output file names.
    pub fn name(&self) -> &'static str {
        match self {
            FamilyKind::Multiplicative => "multiplicative",
            FamilyKind::Modulo => "modulo",
            FamilyKind::Tabulation => "table",
        }
    }
}
