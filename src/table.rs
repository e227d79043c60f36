//! Fixed-capacity slot array with a zero sentinel.

/// Reserved slot value marking an empty slot. Keys must never be `0`.
pub const EMPTY: u64 = 0;

/// A table of `2^k` 64-bit slots. Slot value [`EMPTY`] means vacant; any
/// nonzero value is a stored key. The table is owned by exactly one run and
/// is never resized; a rehash replaces it wholesale with a fresh one.
#[derive(Debug, Clone)]
pub struct Table {
    slots: Box<[u64]>,
    len: usize,
}

impl Table {
    /// Allocates an empty table of `2^k` slots.
    ///
    /// # Panics
    /// - if `k` is 0 or would overflow the slot count.
    pub fn new(k: u32) -> Self {
        assert!((1..64).contains(&k), "table exponent must be in 1..64");
        Self {
            slots: vec![EMPTY; 1usize << k].into_boxed_slice(),
            len: 0,
        }
    }

    /// Total number of slots (`2^k`).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw slot value at `index` ([`EMPTY`] or a key).
    pub fn get(&self, index: usize) -> u64 {
        self.slots[index]
    }

    /// Returns true if the slot at `index` holds no key.
    pub fn is_vacant(&self, index: usize) -> bool {
        self.slots[index] == EMPTY
    }

    /// Stores `key` into the vacant slot at `index`.
    pub fn place(&mut self, index: usize, key: u64) {
        debug_assert_ne!(key, EMPTY, "0 is reserved as the empty-slot sentinel");
        debug_assert!(self.is_vacant(index), "place requires a vacant slot");
        self.slots[index] = key;
        self.len += 1;
    }

    /// Replaces the occupant at `index` with `key`, returning the evicted
    /// key. The stored-key count is unchanged.
    pub fn swap(&mut self, index: usize, key: u64) -> u64 {
        debug_assert_ne!(key, EMPTY, "0 is reserved as the empty-slot sentinel");
        debug_assert!(!self.is_vacant(index), "swap requires an occupied slot");
        std::mem::replace(&mut self.slots[index], key)
    }

    /// Iterates over every stored key, in slot order.
    pub fn keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.slots.iter().copied().filter(|&slot| slot != EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_is_all_vacant() {
        let table = Table::new(4);
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.len(), 0);
        assert!((0..16).all(|i| table.is_vacant(i)));
        assert_eq!(table.keys().count(), 0);
    }

    #[test]
    fn place_and_swap_track_occupancy() {
        let mut table = Table::new(3);
        table.place(5, 42);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(5), 42);

        let evicted = table.swap(5, 99);
        assert_eq!(evicted, 42);
        assert_eq!(table.len(), 1, "swap must not change the key count");
        assert_eq!(table.keys().collect::<Vec<_>>(), vec![99]);
    }

    #[test]
    #[should_panic]
    fn zero_exponent_rejected() {
        let _ = Table::new(0);
    }
}
