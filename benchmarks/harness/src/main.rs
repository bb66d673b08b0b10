//! algotrace-bench-harness
//!
//! Run small end-to-end benchmarks (generate -> check -> write -> read -> digest)
//! for every sorting algorithm plus the tree generator, and append CSV rows
//! into `benchmarks/reports/bench-<unix>.csv`.
//!
//! Usage examples:
//!   cargo run -p algotrace-bench-harness -- --profile benchmarks/profiles/small.toml
//!   cargo run -p algotrace-bench-harness -- --profile benchmarks/profiles/medium.toml --format json

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use algotrace_core::digest::digest_hex;
use algotrace_core::io::{read_trace_auto, write_trace_auto};
use algotrace_core::{Step, TraceChecker, TraceFile};
use algotrace_sort::{generate, input::random_values, Algorithm};
use algotrace_tree::generate_binary_tree_steps;

#[derive(Debug, Deserialize)]
struct Profile {
    /// Input length
    n: usize,
    /// Exclusive upper bound for generated values
    upper: u32,
    /// RNG seed for the input
    seed: u64,
    /// Repetitions of the whole pipeline
    repeats: u32,
}

fn parse_flag(name: &str, default: &str) -> String {
    let mut it = std::env::args().skip(1);
    while let Some(k) = it.next() {
        if k == format!("--{name}") {
            return it.next().unwrap_or_else(|| default.to_string());
        }
    }
    default.to_string()
}

fn dur_us(d: Duration) -> u128 {
    d.as_micros()
}

fn main() -> Result<()> {
    let profile_path = PathBuf::from(parse_flag("profile", "benchmarks/profiles/small.toml"));
    let format = parse_flag("format", "cbor");
    if !matches!(format.as_str(), "json" | "cbor" | "jsonl") {
        bail!("unknown --format {format} (use json|cbor|jsonl)");
    }

    let profile_src = fs::read_to_string(&profile_path)
        .with_context(|| format!("read profile {}", profile_path.display()))?;
    let profile: Profile = toml::from_str(&profile_src).context("parse profile toml")?;
    println!(
        "Profile: n={}, upper={}, seed={}, repeats={}, format={format}",
        profile.n, profile.upper, profile.seed, profile.repeats
    );

    fs::create_dir_all("benchmarks/reports").context("create benchmarks/reports")?;

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before unix epoch")?
        .as_secs();
    let csv_path = PathBuf::from(format!("benchmarks/reports/bench-{ts}.csv"));
    let mut csv = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&csv_path)?;
    writeln!(csv, "timestamp,algorithm,n,repeat,stage,us,extra")?;

    let values = random_values(profile.n, profile.upper, profile.seed);

    for rep in 0..profile.repeats {
        for alg in Algorithm::ALL {
            let t0 = Instant::now();
            let steps = generate(alg, &values);
            let t_gen = t0.elapsed();
            run_pipeline(&mut csv, ts, rep, alg.name(), &values, steps, t_gen, &format)?;
        }

        let t0 = Instant::now();
        let steps = generate_binary_tree_steps(&values)?;
        let t_gen = t0.elapsed();
        run_pipeline(&mut csv, ts, rep, "tree", &values, steps, t_gen, &format)?;
    }

    println!("Wrote report → {}", csv_path.display());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_pipeline(
    csv: &mut fs::File,
    ts: u64,
    rep: u32,
    name: &str,
    values: &[f64],
    steps: Vec<Step>,
    t_gen: Duration,
    format: &str,
) -> Result<()> {
    let n = values.len();
    writeln!(csv, "{ts},{name},{n},{rep},gen,{},steps={}", dur_us(t_gen), steps.len())?;

    // 1) check
    let input = (name != "tree").then_some(values);
    let t0 = Instant::now();
    let summary = TraceChecker::new()
        .check(&steps, input)
        .with_context(|| format!("{name}: invalid trace"))?;
    let t_check = t0.elapsed();
    writeln!(
        csv,
        "{ts},{name},{n},{rep},check,{},fallback={}",
        dur_us(t_check),
        summary.fallback
    )?;

    // 2) write + read back
    let tmp = PathBuf::from(format!("benchmarks/tmp-{name}-{ts}-{rep}.{format}"));
    let tf = TraceFile::new(name, values.to_vec(), steps);
    let t0 = Instant::now();
    write_trace_auto(&tmp, &tf)?;
    let t_write = t0.elapsed();
    let bytes = fs::metadata(&tmp).map(|m| m.len()).unwrap_or(0);
    writeln!(csv, "{ts},{name},{n},{rep},write,{},bytes={bytes}", dur_us(t_write))?;

    let t0 = Instant::now();
    let back = read_trace_auto(&tmp)?;
    let t_read = t0.elapsed();
    if back.steps != tf.steps {
        bail!("{name}: trace changed across {format} round trip");
    }
    writeln!(csv, "{ts},{name},{n},{rep},read,{},", dur_us(t_read))?;

    // 3) digest
    let t0 = Instant::now();
    let digest = digest_hex(&tf.steps)?;
    let t_digest = t0.elapsed();
    writeln!(csv, "{ts},{name},{n},{rep},digest,{},root={digest}", dur_us(t_digest))?;

    // cleanup temp files to avoid disk bloat
    let _ = fs::remove_file(&tmp);
    Ok(())
}
