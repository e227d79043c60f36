//! Error type shared by the insertion engines.

/// Errors an insertion engine can surface to the harness.
///
/// The two bounded loops (the displacement budget and the rehash-attempt
/// budget) are the only recoverable layers in the engine; everything below
/// `RehashExhausted` is handled internally. Contract violations (inserting
/// the reserved key `0`) are asserted, not returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The rehash controller spent its whole attempt budget without building
    /// a table that holds every stored key. Fatal for the current run; the
    /// harness must abort this configuration rather than retry.
    #[error(
        "rehash budget exhausted after {attempts} attempts \
         (capacity: {capacity}, stored keys: {occupied})"
    )]
    RehashExhausted {
        attempts: usize,
        capacity: usize,
        occupied: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
