//! # Sweep Drivers
//!
//! The two experiments the engines exist for:
//!
//! - [`fill_sweep`] varies the fill factor in 1% steps at a fixed table
//!   size and records displacements-per-insertion (and wall-clock time) at
//!   each step, each step against a fresh table with fresh parameters.
//! - [`size_sweep`] varies the table-size exponent `k`, and for each size
//!   repeats the same experiment many times: fill the table to 89% with
//!   sequential keys, then measure the displacement cost of pushing on to
//!   91%. Repetitions are fully independent runs (own table, parameters and
//!   counters) and execute in parallel.
//!
//! Both drivers draw keys uniformly from `[1, 2^64 - 1]` (a drawn `0` is
//! remapped to `1`) and accept any engine through [`InsertEngine`].

use std::time::Instant;

use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use crate::{error::Result, metrics::Metrics};

/// Anything the drivers can push keys into: both engines implement it.
pub trait InsertEngine {
    /// Inserts one nonzero key, charging `metrics`.
    fn insert(&mut self, key: u64, metrics: &mut Metrics) -> Result<()>;
}

impl<F: crate::family::HashFamily> InsertEngine for crate::cuckoo::CuckooTable<F> {
    fn insert(&mut self, key: u64, metrics: &mut Metrics) -> Result<()> {
        CuckooTable::insert(self, key, metrics)
    }
}

impl<F: crate::family::HashFamily> InsertEngine for crate::linear::LinearTable<F> {
    fn insert(&mut self, key: u64, metrics: &mut Metrics) -> Result<()> {
        LinearTable::insert(self, key, metrics);
        Ok(())
    }
}

use crate::{cuckoo::CuckooTable, linear::LinearTable};

/// One measured point of a fill-factor sweep.
#[derive(Debug, Clone, Copy)]
pub struct FillPoint {
    /// Target fill factor of this step.
    pub fill: f64,
    /// Displacement events per user-visible insertion.
    pub swaps_per_insertion: f64,
    /// Mean wall-clock nanoseconds per insertion.
    pub nanos_per_insertion: f64,
}

/// Sweeps the fill factor from 1% up to (but excluding) `max_fill` in 1%
/// steps at table size `2^k`. For each step, `build` receives a seeded RNG
/// and must return a fresh engine; the driver then inserts
/// `floor(2^k * fill)` uniform random keys and records the counters.
///
/// Fails fast if any insert fails (cuckoo rehash exhaustion), since every
/// later step would only be fuller.
///
/// # Panics
/// - if `max_fill` is not strictly between 0 and 1.
pub fn fill_sweep<E, B>(k: u32, max_fill: f64, seed: u64, mut build: B) -> Result<Vec<FillPoint>>
where
    E: InsertEngine,
    B: FnMut(StdRng) -> E,
{
    assert!(
        max_fill > 0.0 && max_fill < 1.0,
        "fill factor must stay strictly below 1.0"
    );
    let m = 1u64 << k;
    let mut master = StdRng::seed_from_u64(seed);
    let mut points = Vec::new();

    let mut step = 1usize;
    while step as f64 * 0.01 < max_fill {
        let fill = step as f64 * 0.01;
        let target = (m as f64 * fill).floor() as u64;

        let mut engine = build(StdRng::seed_from_u64(master.gen()));
        let mut key_rng = StdRng::seed_from_u64(master.gen());
        let mut metrics = Metrics::new();

        let started = Instant::now();
        for _ in 0..target {
            engine.insert(key_rng.gen::<u64>().max(1), &mut metrics)?;
        }
        let elapsed = started.elapsed();

        points.push(FillPoint {
            fill,
            swaps_per_insertion: metrics.swaps_per_insertion(),
            nanos_per_insertion: elapsed.as_nanos() as f64 / target.max(1) as f64,
        });
        step += 1;
    }
    Ok(points)
}

/// Summary statistics for one table size of a [`size_sweep`].
#[derive(Debug, Clone, Copy)]
pub struct SizeSummary {
    /// Table-size exponent (`2^k` slots).
    pub k: u32,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// 90th percentile of the per-run ratios.
    pub decile: f64,
}

/// For each `k` in `ks`, runs `runs` independent repetitions: fill a fresh
/// table to 89% with sequential keys, reset the counters, then measure the
/// displacement cost of inserting from 89% up to 91%. Returns one summary
/// of the per-run swaps-per-insertion ratios per `k`.
///
/// Repetitions run in parallel; `build` is called once per repetition with
/// the exponent and a seeded RNG and must return a fresh engine.
///
/// # Panics
/// - if `runs` is zero.
pub fn size_sweep<E, B>(
    ks: std::ops::Range<u32>,
    runs: usize,
    seed: u64,
    build: B,
) -> Result<Vec<SizeSummary>>
where
    E: InsertEngine,
    B: Fn(u32, StdRng) -> E + Sync,
{
    assert!(runs > 0, "size_sweep needs at least one run per exponent");
    ks.map(|k| {
        let m = 1u64 << k;
        let start_bound = (m as f64 * 0.89).floor() as u64;
        let stop_bound = (m as f64 * 0.91).floor() as u64;

        let mut ratios = (0..runs)
            .into_par_iter()
            .map(|run| {
                let run_seed = seed ^ ((k as u64) << 32) ^ run as u64;
                let mut engine = build(k, StdRng::seed_from_u64(run_seed));
                let mut metrics = Metrics::new();

                for key in 1..start_bound {
                    engine.insert(key, &mut metrics)?;
                }
                metrics.reset();
                for key in start_bound..stop_bound {
                    engine.insert(key, &mut metrics)?;
                }
                Ok(metrics.swaps_per_insertion())
            })
            .collect::<Result<Vec<f64>>>()?;

        ratios.sort_by(|a, b| a.total_cmp(b));
        let mean = ratios.iter().sum::<f64>() / ratios.len() as f64;
        Ok(SizeSummary {
            k,
            min: ratios[0],
            max: ratios[ratios.len() - 1],
            mean,
            median: ratios[ratios.len() / 2],
            decile: ratios[(ratios.len() as f64 * 0.9) as usize],
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::family::{Modulo, Tabulation};

    #[test]
    fn fill_sweep_emits_one_point_per_step() {
        let k = 8;
        let points = fill_sweep(k, 0.20, 77, |rng| {
            LinearTable::<Modulo>::with_rng(k, rng)
        })
        .unwrap();

        // Steps 1% .. 19%.
        assert_eq!(points.len(), 19);
        for pair in points.windows(2) {
            assert!(pair[0].fill < pair[1].fill);
        }
        for point in &points {
            assert!(point.swaps_per_insertion >= 0.0);
            assert!(point.nanos_per_insertion >= 0.0);
        }
    }

    #[test]
    fn fill_sweep_drives_the_cuckoo_engine() {
        let k = 8;
        let points = fill_sweep(k, 0.30, 13, |rng| {
            CuckooTable::<Tabulation>::with_rng(k, rng)
        })
        .unwrap();
        assert_eq!(points.len(), 29);
        // At these fills displacements happen but stay modest.
        assert!(points.iter().all(|p| p.swaps_per_insertion < 10.0));
    }

    #[test]
    fn fill_sweep_surfaces_rehash_exhaustion() {
        // 2^6 slots driven toward 90% fill is far past what cuckoo with
        // single-slot buckets can hold, so some step must spend its whole
        // rebuild budget. The driver has to return that error rather than
        // hang or panic.
        let k = 6;
        let result = fill_sweep(k, 0.90, 3, |rng| {
            CuckooTable::<Tabulation>::with_rng(k, rng)
        });
        assert!(matches!(result, Err(Error::RehashExhausted { .. })));
    }

    #[test]
    fn size_sweep_summarizes_each_exponent() {
        let summaries = size_sweep(7..9, 8, 5, |k, rng| {
            LinearTable::<Modulo>::with_rng(k, rng)
        })
        .unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].k, 7);
        assert_eq!(summaries[1].k, 8);
        for s in &summaries {
            assert!(s.min <= s.median && s.median <= s.max);
            assert!(s.min <= s.mean && s.mean <= s.max);
            assert!(s.decile <= s.max);
        }
    }
}
