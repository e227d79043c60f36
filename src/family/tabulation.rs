//! Tabulation hashing: split the key into 8-bit substrings, look each up in
//! an independent random table, XOR the results.
//!
//! Every table entry is drawn strictly below `m`, and `m` is a power of two,
//! so the XOR of any selection of entries is itself below `m`; the result
//! needs no re-ranging afterwards.

use rand::Rng;

use super::HashFamily;

/// Width of one substring in bits.
const SUBSTRING_BITS: u32 = 8;
/// Number of substrings a 64-bit key splits into.
const SUBSTRINGS: usize = (u64::BITS / SUBSTRING_BITS) as usize;
/// Rows per lookup table: one per substring value.
const ROWS: usize = 1 << SUBSTRING_BITS;

/// Tabulation hash family: a 256-row by 8-column table of random values in
/// `[0, m)`, one column per key byte.
#[derive(Debug, Clone)]
pub struct Tabulation {
    rows: Box<[[u64; SUBSTRINGS]]>,
}

impl HashFamily for Tabulation {
    fn draw<R: Rng>(k: u32, rng: &mut R) -> Self {
        debug_assert!((1..64).contains(&k));
        let m = 1u64 << k;
        let rows = (0..ROWS)
            .map(|_| {
                let mut row = [0u64; SUBSTRINGS];
                for entry in row.iter_mut() {
                    *entry = rng.gen_range(0..m);
                }
                row
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self { rows }
    }

    fn index(&self, key: u64) -> usize {
        let mut index = 0u64;
        for i in 0..SUBSTRINGS {
            // Substring i holds bits [8i, 8i + 8), little end first.
            let byte = ((key >> (SUBSTRING_BITS * i as u32)) & 0xFF) as usize;
            index ^= self.rows[byte][i];
        }
        index as usize
    }
}
