//! Runs the full measurement suite: table-size sweeps under linear probing,
//! then fill-factor sweeps for both engines at `k = 20`, writing one
//! whitespace-separated text file per recorded series.

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};

use hashprobe::{
    family::{FamilyKind, Modulo, Multiplicative, Tabulation},
    sweep::{fill_sweep, size_sweep, FillPoint, SizeSummary},
    CuckooTable, LinearTable,
};

const SEED: u64 = 1234;
const SIZE_SWEEP_RUNS: usize = 100;
const SIZE_SWEEP_KS: std::ops::Range<u32> = 7..22;
const FILL_SWEEP_K: u32 = 20;

fn main() -> Result<(), Box<dyn Error>> {
    for kind in [FamilyKind::Tabulation, FamilyKind::Multiplicative] {
        println!("\nsequence sweep: linear probing, {} family", kind.name());
        let summaries = linear_size_sweep(kind)?;
        for s in &summaries {
            println!(
                "k: {}\tmin: {:.3}\tmax: {:.3}\tmean: {:.3}\tmedian: {:.3}\tdecile: {:.3}",
                s.k, s.min, s.max, s.mean, s.median, s.decile
            );
        }
        write_size_files(&format!("seq-linear-{}.txt", kind.name()), &summaries)?;
    }

    println!("\nfill sweeps: k = {FILL_SWEEP_K}");
    let k = FILL_SWEEP_K;

    let points = fill_sweep(k, 0.491, SEED, |rng| {
        CuckooTable::<Tabulation>::with_rng(k, rng)
    })?;
    report("cuckoo, table family", &points);
    write_fill_files("cuckoo-table.txt", &points)?;

    let points = fill_sweep(k, 0.491, SEED, |rng| {
        CuckooTable::<Multiplicative>::with_rng(k, rng)
    })?;
    report("cuckoo, multiplicative family", &points);
    write_fill_files("cuckoo-multiplicative.txt", &points)?;

    for kind in [
        FamilyKind::Tabulation,
        FamilyKind::Modulo,
        FamilyKind::Multiplicative,
    ] {
        let points = linear_fill_sweep(kind, k, 0.95)?;
        report(&format!("linear, {} family", kind.name()), &points);
        write_fill_files(&format!("linear-{}.txt", kind.name()), &points)?;
    }

    Ok(())
}

fn linear_size_sweep(kind: FamilyKind) -> hashprobe::Result<Vec<SizeSummary>> {
    match kind {
        FamilyKind::Multiplicative => {
            size_sweep(SIZE_SWEEP_KS, SIZE_SWEEP_RUNS, SEED, |k, rng| {
                LinearTable::<Multiplicative>::with_rng(k, rng)
            })
        }
        FamilyKind::Modulo => size_sweep(SIZE_SWEEP_KS, SIZE_SWEEP_RUNS, SEED, |k, rng| {
            LinearTable::<Modulo>::with_rng(k, rng)
        }),
        FamilyKind::Tabulation => size_sweep(SIZE_SWEEP_KS, SIZE_SWEEP_RUNS, SEED, |k, rng| {
            LinearTable::<Tabulation>::with_rng(k, rng)
        }),
    }
}

fn linear_fill_sweep(kind: FamilyKind, k: u32, max_fill: f64) -> hashprobe::Result<Vec<FillPoint>> {
    match kind {
        FamilyKind::Multiplicative => fill_sweep(k, max_fill, SEED, |rng| {
            LinearTable::<Multiplicative>::with_rng(k, rng)
        }),
        FamilyKind::Modulo => fill_sweep(k, max_fill, SEED, |rng| {
            LinearTable::<Modulo>::with_rng(k, rng)
        }),
        FamilyKind::Tabulation => fill_sweep(k, max_fill, SEED, |rng| {
            LinearTable::<Tabulation>::with_rng(k, rng)
        }),
    }
}

fn report(label: &str, points: &[FillPoint]) {
    println!("{label}");
    for p in points {
        println!(
            "fill: {:.2}\tswaps/ins: {:.3}\ttime/ins: {:.1}ns",
            p.fill, p.swaps_per_insertion, p.nanos_per_insertion
        );
    }
}

/// Writes `fill swaps` rows to `name` and `fill nanos` rows to `time-name`.
fn write_fill_files(name: &str, points: &[FillPoint]) -> std::io::Result<()> {
    let mut swaps = BufWriter::new(File::create(name)?);
    let mut time = BufWriter::new(File::create(format!("time-{name}"))?);
    for p in points {
        writeln!(swaps, "{} {}", p.fill, p.swaps_per_insertion)?;
        writeln!(time, "{} {}", p.fill, p.nanos_per_insertion)?;
    }
    Ok(())
}

/// Writes one `k stat` file per summary statistic.
fn write_size_files(name: &str, summaries: &[SizeSummary]) -> std::io::Result<()> {
    for (stat, pick) in [
        ("min", (|s: &SizeSummary| s.min) as fn(&SizeSummary) -> f64),
        ("max", |s| s.max),
        ("mean", |s| s.mean),
        ("median", |s| s.median),
        ("decil", |s| s.decile),
    ] {
        let mut out = BufWriter::new(File::create(format!("{stat}-{name}"))?);
        for s in summaries {
            writeln!(out, "{} {}", s.k, pick(s))?;
        }
    }
    Ok(())
}
