//! # hashprobe
//!
//! A measurement harness for **collision behavior in open addressing**. It
//! implements cuckoo hashing with a bounded displacement chain and full
//! rehash-on-failure recovery, alongside plain linear probing, and lets both
//! engines be parameterized over interchangeable hash-function families
//! (multiplicative, modulo, tabulation). The point is to compare how many
//! displacements each strategy/family combination pays per insertion as the
//! fill factor or the table size grows. It is **not** a production store.
//!
//! ## Key Features
//! - **Interchangeable hash families** behind a single [`HashFamily`] trait,
//!   selected once per run rather than per call.
//! - **Bounded everything**: a logarithmic displacement budget per insert and
//!   a hard cap on rehash attempts, so a run either finishes or fails with
//!   [`Error::RehashExhausted`]; it never spins.
//! - **Exact counters**: [`Metrics`] tracks insertions and displacement
//!   events per run, passed by exclusive reference (no global state).
//! - **Sweep drivers** reproducing the fill-factor and table-size experiments
//!   the engines were built for, with independent repetitions run in parallel.
//!
//! Keys live in `[1, 2^64 - 1]`; slot value `0` is reserved as the
//! empty-slot sentinel.
//!
//! ## Example
//! ```rust
//! use hashprobe::{family::Tabulation, CuckooTable, Metrics};
//!
//! let mut table = CuckooTable::<Tabulation>::new(10); // 2^10 slots
//! let mut metrics = Metrics::default();
//! for key in 1..=400u64 {
//!     table.insert(key, &mut metrics).expect("rehash budget exhausted");
//! }
//! assert!(table.contains(42));
//! assert_eq!(metrics.insertions, 400);
//! println!("swaps/insert: {:.3}", metrics.swaps_per_insertion());
//! ```

pub mod cuckoo;
pub mod error;
pub mod family;
pub mod linear;
pub mod metrics;
pub mod sweep;
pub mod table;

pub use cuckoo::{CuckooTable, MAX_REHASH_ATTEMPTS};
pub use error::{Error, Result};
pub use family::{FamilyKind, HashFamily};
pub use linear::LinearTable;
pub use metrics::Metrics;
pub use sweep::{fill_sweep, size_sweep, FillPoint, InsertEngine, SizeSummary};
pub use table::Table;
