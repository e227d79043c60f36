//! Per-run insertion and displacement counters.

/// Counters for one benchmark run, reset by the harness and incremented by
/// the engines. Passed by exclusive reference into every insert call, so two
/// concurrent runs can never share a counter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    /// User-visible insertions performed. Reinsertions during a rehash are
    /// bookkeeping and are not counted here.
    pub insertions: u64,
    /// Displacement/swap events: cuckoo evictions and linear probe steps.
    pub displacements: u64,
}

impl Metrics {
    /// Fresh counters, all zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes both counters for the next run.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Displacements per user-visible insertion, the summary ratio the
    /// sweep drivers record. Guards against division by zero on empty runs.
    pub fn swaps_per_insertion(&self) -> f64 {
        self.displacements as f64 / self.insertions.max(1) as f64
    }
}
