//! # Linear Probing Engine
//!
//! The comparison baseline: one hash family instance, and collisions resolve
//! by scanning forward (with wraparound) until a vacant slot turns up. Every
//! probe step past the home slot counts as one displacement event. There is
//! no rehash and no failure path; the caller keeps the fill factor below
//! 1.0, since probing a full table would never terminate.

use rand::{rngs::StdRng, SeedableRng};

use crate::{family::HashFamily, metrics::Metrics, table::Table};

/// A fixed-capacity linear-probing table over a single hash family state.
pub struct LinearTable<F> {
    table: Table,
    family: F,
}

impl<F: HashFamily> LinearTable<F> {
    /// Creates a table of `2^k` slots with the family state drawn from OS
    /// entropy.
    pub fn new(k: u32) -> Self {
        Self::with_rng(k, StdRng::from_entropy())
    }

    /// Creates a table of `2^k` slots, drawing the family state from `rng`.
    pub fn with_rng(k: u32, mut rng: StdRng) -> Self {
        let family = F::draw(k, &mut rng);
        Self {
            table: Table::new(k),
            family,
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

    /// Inserts `key` at the first vacant slot on or after its home slot,
    /// charging one displacement per occupied slot skipped.
    ///
    /// # Panics
    /// - if `key` is `0`, the empty-slot sentinel.
    pub fn insert(&mut self, key: u64, metrics: &mut Metrics) {
        assert_ne!(key, 0, "0 is reserved as the empty-slot sentinel");
        debug_assert!(
            self.table.len() < self.table.capacity(),
            "probing a full table never terminates"
        );
        metrics.insertions += 1;
        let mut slot = self.family.index(key);
        while !self.table.is_vacant(slot) {
            slot = (slot + 1) % self.table.capacity();
            metrics.displacements += 1;
        }
        self.table.place(slot, key);
    }

    /// Scans the probe chain starting at the home slot for `key`, stopping
    /// at the first vacant slot.
    ///
    /// # Panics
    /// - if `key` is `0`, the empty-slot sentinel.
    pub fn contains(&self, key: u64) -> bool {
        assert_ne!(key, 0, "0 is reserved as the empty-slot sentinel");
        let mut slot = self.family.index(key);
        for _ in 0..self.table.capacity() {
            let stored = self.table.get(slot);
            if stored == key {
                return true;
            }
            if self.table.is_vacant(slot) {
                return false;
            }
            slot = (slot + 1) % self.table.capacity();
        }
        false
    }

    /// Iterates over every stored key, in slot order.
    pub fn keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.table.keys()
    }
}
