//! # Cuckoo Insertion Engine
//!
//! Inserts each key using **two alternating instances** of one hash family
//! ("family A" and "family B", independent parameter states). A key whose
//! bucket is occupied evicts the occupant, which is then placed under the
//! still-active family, and so on, for at most a logarithmic number of
//! displacements. When the displacement budget runs out, the **rehash
//! controller** takes over: it redraws both parameter states, allocates a
//! fresh table of the same size, and reinserts every stored key, abandoning
//! the whole attempt and starting over on any reinsertion failure, up to a
//! hard cap of attempts. There is no incremental repair and no growth; the
//! table capacity is fixed for the life of the run.
//!
//! ## Displacement budget
//!
//! `max_swaps = 6 * max(1, ceil(log2(max(n, 1))))`, where `n` is the current
//! occupancy of the whole table, recomputed at the start of every insert
//! call. Alternating families keeps the expected chain length logarithmic;
//! the budget is the safety valve for the cases expectation says little
//! about.
//!
//! ## Family switching
//!
//! Within a chain, the active family only flips when the evicted key hashes
//! straight back to the slot it was just evicted from. That heuristic breaks
//! trivial fixed points without tracking visited slots. It does not detect
//! longer cycles, and it is not meant to: the measured statistics depend on
//! it behaving exactly this way, so do not "improve" it.
//!
//! ## Example
//! ```rust
//! use hashprobe::{family::Multiplicative, CuckooTable, Metrics};
//!
//! let mut table = CuckooTable::<Multiplicative>::new(8);
//! let mut metrics = Metrics::default();
//! for key in 1..=100u64 {
//!     table.insert(key, &mut metrics).unwrap();
//! }
//! assert_eq!(table.len(), 100);
//! assert!(table.contains(7));
//! assert!(!table.contains(101));
//! ```

use log::{debug, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    error::{Error, Result},
    family::HashFamily,
    metrics::Metrics,
    table::Table,
};

/// Total rebuild attempts the rehash controller may spend on one insert
/// before the run fails with [`Error::RehashExhausted`].
pub const MAX_REHASH_ATTEMPTS: usize = 1000;

/// Multiplier on `ceil(log2(n))` for the per-insert displacement budget.
const SWAP_FACTOR: usize = 6;

/// Outcome of one bounded-displacement placement attempt.
enum Placement {
    /// The key (or the last link of its displacement chain) found a vacant
    /// slot; the occupancy invariant holds again.
    Placed,
    /// The swap budget ran out with this key still in flight.
    BoundExceeded(u64),
}

/// A fixed-capacity cuckoo hash table over one hash family, holding two
/// independent parameter states and the RNG used to redraw them on rehash.
pub struct CuckooTable<F> {
    table: Table,
    family_a: F,
    family_b: F,
    k: u32,
    rng: StdRng,
}

impl<F: HashFamily> CuckooTable<F> {
    /// Creates a table of `2^k` slots with parameter states drawn from OS
    /// entropy.
    pub fn new(k: u32) -> Self {
        Self::with_rng(k, StdRng::from_entropy())
    }

    /// Creates a table of `2^k` slots, drawing both parameter states (and
    /// all future rehash redraws) from `rng`. Use a seeded RNG to reproduce
    /// a run exactly.
    pub fn with_rng(k: u32, mut rng: StdRng) -> Self {
        let family_a = F::draw(k, &mut rng);
        let family_b = F::draw(k, &mut rng);
        Self {
            table: Table::new(k),
            family_a,
            family_b,
            k,
            rng,
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Looks `key` up in its two home slots under the currently active
    /// parameter states. Every stored key is found this way: the occupancy
    /// invariant is only violated mid-chain inside an insert call.
    ///
    /// # Panics
    /// - if `key` is `0`, the empty-slot sentinel.
    pub fn contains(&self, key: u64) -> bool {
        assert_ne!(key, 0, "0 is reserved as the empty-slot sentinel");
        self.table.get(self.family_a.index(key)) == key
            || self.table.get(self.family_b.index(key)) == key
    }

    /// Iterates over every stored key, in slot order.
    pub fn keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.table.keys()
    }

    /// Inserts `key`, displacing stored keys and rehashing as needed.
    ///
    /// On success the insertion counter is incremented once; every eviction
    /// along the way (including reinsertion work during rehashes) increments
    /// the displacement counter. Fails with [`Error::RehashExhausted`] once
    /// the rebuild budget for this insert is spent; that failure is fatal
    /// for the run.
    ///
    /// # Panics
    /// - if `key` is `0`, the empty-slot sentinel.
    pub fn insert(&mut self, key: u64, metrics: &mut Metrics) -> Result<()> {
        assert_ne!(key, 0, "0 is reserved as the empty-slot sentinel");
        let mut pending = key;
        let mut attempts = 0;
        loop {
            let budget = displacement_bound(self.table.len());
            match place(
                &mut self.table,
                &self.family_a,
                &self.family_b,
                pending,
                budget,
                metrics,
            ) {
                Placement::Placed => {
                    metrics.insertions += 1;
                    return Ok(());
                }
                Placement::BoundExceeded(evicted) => {
                    debug!(
                        "displacement budget {} exhausted at {}/{} occupancy, rehashing",
                        budget,
                        self.table.len(),
                        self.table.capacity()
                    );
                    // The chain swapped the original key into the table and
                    // left some evicted key in flight; that one becomes the
                    // key to retry after the rehash.
                    pending = evicted;
                    self.rehash(&mut attempts, metrics)?;
                }
            }
        }
    }

    /// Rehash controller: redraw both parameter states, rebuild the table
    /// from scratch, and restart wholesale on any reinsertion failure.
    /// `attempts` carries the budget already spent by earlier escalations of
    /// the same insert call.
    fn rehash(&mut self, attempts: &mut usize, metrics: &mut Metrics) -> Result<()> {
        // Reinsertions run under the bound of the table of record, whose
        // occupancy does not change while it is being rebuilt.
        let budget = displacement_bound(self.table.len());
        while *attempts < MAX_REHASH_ATTEMPTS {
            *attempts += 1;
            let family_a = F::draw(self.k, &mut self.rng);
            let family_b = F::draw(self.k, &mut self.rng);
            match rebuild(&self.table, self.k, &family_a, &family_b, budget, metrics) {
                Some(rebuilt) => {
                    self.table = rebuilt;
                    self.family_a = family_a;
                    self.family_b = family_b;
                    return Ok(());
                }
                None => {
                    warn!("rehash attempt {attempts} abandoned, redrawing parameters");
                }
            }
        }
        Err(Error::RehashExhausted {
            attempts: MAX_REHASH_ATTEMPTS,
            capacity: self.table.capacity(),
            occupied: self.table.len(),
        })
    }
}

/// Per-insert displacement budget: `6 * max(1, ceil(log2(max(n, 1))))` for
/// current table occupancy `n`.
fn displacement_bound(occupied: usize) -> usize {
    let ceil_log2 = occupied.max(1).next_power_of_two().trailing_zeros() as usize;
    SWAP_FACTOR * ceil_log2.max(1)
}

/// One bounded-displacement placement attempt: the 4-state insert machine
/// (probe, place, displace, flip family on a repeat collision).
fn place<F: HashFamily>(
    table: &mut Table,
    family_a: &F,
    family_b: &F,
    key: u64,
    max_swaps: usize,
    metrics: &mut Metrics,
) -> Placement {
    let mut pending = key;
    let mut active_is_a = true;
    for _ in 0..max_swaps {
        let active = if active_is_a { family_a } else { family_b };
        let slot = active.index(pending);
        if table.is_vacant(slot) {
            table.place(slot, pending);
            return Placement::Placed;
        }

        metrics.displacements += 1;
        pending = table.swap(slot, pending);

        // The evicted key hashes straight back to the slot it just left
        // under the active family: flip families to nudge the chain off the
        // fixed point. Longer cycles are left to the swap budget.
        if active.index(pending) == slot {
            active_is_a = !active_is_a;
        }
    }
    Placement::BoundExceeded(pending)
}

/// One rebuild attempt: reinsert every key of `old` into a fresh table under
/// freshly drawn families. Returns `None` if any reinsertion exceeds the
/// budget; `old` is never modified, so an abandoned attempt loses nothing.
/// Reinsertions count displacements but not insertions.
fn rebuild<F: HashFamily>(
    old: &Table,
    k: u32,
    family_a: &F,
    family_b: &F,
    max_swaps: usize,
    metrics: &mut Metrics,
) -> Option<Table> {
    let mut fresh = Table::new(k);
    for key in old.keys() {
        match place(&mut fresh, family_a, family_b, key, max_swaps, metrics) {
            Placement::Placed => {}
            Placement::BoundExceeded(_) => return None,
        }
    }
    Some(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::{Multiplicative, Tabulation};
    use std::collections::BTreeSet;

    fn seeded<F: HashFamily>(k: u32, seed: u64) -> CuckooTable<F> {
        CuckooTable::with_rng(k, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn displacement_bound_follows_occupancy() {
        assert_eq!(displacement_bound(0), 6);
        assert_eq!(displacement_bound(1), 6);
        assert_eq!(displacement_bound(2), 6);
        assert_eq!(displacement_bound(3), 12);
        assert_eq!(displacement_bound(4), 12);
        assert_eq!(displacement_bound(5), 18);
        assert_eq!(displacement_bound(1000), 60);
        assert_eq!(displacement_bound(1024), 60);
    }

    #[test]
    fn occupancy_invariant_after_every_insert() {
        let mut table = seeded::<Tabulation>(10, 42);
        let mut metrics = Metrics::new();
        for key in 1..=400u64 {
            table.insert(key, &mut metrics).unwrap();
            assert!(
                table.contains(key),
                "key {key} not in either home slot right after insert"
            );
        }
        assert_eq!(table.len(), 400);
        assert_eq!(metrics.insertions, 400);
    }

    #[test]
    fn no_key_lost_across_rehashes() {
        // A small table at ~47% fill forces rehashes with high probability;
        // whether or not they fire, the stored key set must match exactly
        // what was inserted.
        let mut table = seeded::<Tabulation>(7, 7);
        let mut metrics = Metrics::new();
        let inserted: BTreeSet<u64> = (1..=60u64).collect();
        for &key in &inserted {
            table.insert(key, &mut metrics).unwrap();
        }

        let stored: BTreeSet<u64> = table.keys().collect();
        assert_eq!(stored, inserted);
        for &key in &inserted {
            assert!(table.contains(key), "key {key} unreachable after rehash");
        }
    }

    #[test]
    fn sentinel_never_stored() {
        let mut table = seeded::<Tabulation>(8, 5);
        let mut metrics = Metrics::new();
        for key in 1..=100u64 {
            table.insert(key, &mut metrics).unwrap();
        }
        assert!(table.keys().all(|key| key != 0));
        assert_eq!(table.keys().count(), table.len());
    }

    #[test]
    #[should_panic(expected = "sentinel")]
    fn inserting_zero_panics() {
        let mut table = seeded::<Tabulation>(8, 5);
        let mut metrics = Metrics::new();
        let _ = table.insert(0, &mut metrics);
    }

    #[test]
    fn terminates_at_high_fill() {
        // 900 keys into 2^10 slots is far past the cuckoo load limit for
        // single-slot buckets. The engine must either place every key or
        // fail with RehashExhausted within its budgets; it must never hang.
        let mut table = seeded::<Multiplicative>(10, 1234);
        let mut metrics = Metrics::new();
        let mut outcome = Ok(());
        for key in 1..900u64 {
            if let Err(err) = table.insert(key, &mut metrics) {
                outcome = Err(err);
                break;
            }
        }
        match outcome {
            Ok(()) => assert_eq!(table.len(), 899),
            Err(Error::RehashExhausted {
                attempts,
                capacity,
                occupied,
            }) => {
                assert_eq!(attempts, MAX_REHASH_ATTEMPTS);
                assert_eq!(capacity, 1 << 10);
                assert!(occupied < 900);
            }
        }
    }

    #[test]
    fn reinsertions_do_not_count_as_insertions() {
        let mut table = seeded::<Tabulation>(7, 21);
        let mut metrics = Metrics::new();
        let mut inserted = 0u64;
        for key in 1..=60u64 {
            if table.insert(key, &mut metrics).is_err() {
                break;
            }
            inserted += 1;
        }
        // Rehashes may have moved every key several times, but the insertion
        // counter only ever tracks user-visible inserts.
        assert_eq!(metrics.insertions, inserted);
    }
}
