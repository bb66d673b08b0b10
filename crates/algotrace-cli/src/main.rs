// crates/algotrace-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use anyhow::{bail, ensure, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use algotrace_core::{
    config::{DEFAULT_MAX_BUCKETS, DEFAULT_MAX_COUNTING_RANGE},
    digest::digest_hex,
    io::{read_trace_auto, write_trace_auto},
    CheckConfig, TraceChecker, TraceConfig, TraceFile,
};
use algotrace_sort::{
    generate_with,
    input::{parse_values, random_values},
    Algorithm,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "algotrace",
    about = "Algorithm execution trace generator",
    long_about = "Algorithm execution trace generator.\n\nUse this tool to record step-by-step traces of sorting algorithms and binary-search-tree operations, and to check or fingerprint recorded traces.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Record a sorting trace.
    /// If --out ends with `.jsonl`, writes one step per line (no envelope).
    Sort {
        /// Sorting algorithm
        #[arg(value_enum, long)]
        algo: AlgoOpt,

        #[command(flatten)]
        input: InputArgs,

        /// Bucket cap for bucket sort
        #[arg(long, default_value_t = DEFAULT_MAX_BUCKETS)]
        max_buckets: usize,

        /// Widest `max - min + 1` counting sort accepts
        #[arg(long, default_value_t = DEFAULT_MAX_COUNTING_RANGE)]
        max_counting_range: usize,

        /// Output path for the trace (JSON/CBOR/JSONL)
        #[arg(long, default_value = "trace.json")]
        out: PathBuf,
    },

    /// Record a binary-search-tree trace (insertions, deletions, then three traversals).
    Tree {
        /// Values to insert, e.g. `50,30,70`; defaults are used when omitted
        #[arg(long)]
        values: Option<String>,

        /// Values to delete after the inserts, in order
        #[arg(long)]
        delete: Option<String>,

        /// Output path for the trace (JSON/CBOR/JSONL)
        #[arg(long, default_value = "tree.json")]
        out: PathBuf,
    },

    /// Check that a recorded trace is complete, ordered, and replayable
    Check {
        /// Input path to a trace (JSON/CBOR/JSONL)
        #[arg(long)]
        trace: PathBuf,

        /// Do not require the final array to be ascending
        #[arg(long, default_value_t = false)]
        no_sorted: bool,
    },

    /// Print the BLAKE3 digest of a recorded trace
    Digest {
        /// Input path to a trace (JSON/CBOR/JSONL)
        #[arg(long)]
        trace: PathBuf,
    },

    /// List supported sorting algorithms
    List,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Comma/space separated values, e.g. `5,3,8,1`
    #[arg(long, conflicts_with = "random")]
    values: Option<String>,

    /// Generate this many random integers instead of --values
    #[arg(long)]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Exclusive upper bound for --random values
    #[arg(long, default_value_t = 100)]
    upper: u32,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum AlgoOpt {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
    Counting,
    Bucket,
    Radix,
}

impl From<AlgoOpt> for Algorithm {
    fn from(a: AlgoOpt) -> Self {
        match a {
            AlgoOpt::Bubble => Self::Bubble,
            AlgoOpt::Selection => Self::Selection,
            AlgoOpt::Insertion => Self::Insertion,
            AlgoOpt::Merge => Self::Merge,
            AlgoOpt::Quick => Self::Quick,
            AlgoOpt::Heap => Self::Heap,
            AlgoOpt::Counting => Self::Counting,
            AlgoOpt::Bucket => Self::Bucket,
            AlgoOpt::Radix => Self::Radix,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Sort {
            algo,
            input,
            max_buckets,
            max_counting_range,
            out,
        } => sort(algo.into(), &input, max_buckets, max_counting_range, &out),

        Cmd::Tree { values, delete, out } => tree(values.as_deref(), delete.as_deref(), &out),

        Cmd::Check { trace, no_sorted } => check(&trace, !no_sorted),

        Cmd::Digest { trace } => digest(&trace),

        Cmd::List => {
            list();
            Ok(())
        }
    }
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn read_input(args: &InputArgs) -> Result<Vec<f64>> {
    match (&args.values, args.random) {
        (Some(s), _) => parse_values(s).context("parsing --values"),
        (None, Some(n)) => Ok(random_values(n, args.upper, args.seed)),
        (None, None) => bail!("provide either --values or --random"),
    }
}

fn sort(
    algo: Algorithm,
    args: &InputArgs,
    max_buckets: usize,
    max_counting_range: usize,
    out: &Path,
) -> Result<()> {
    ensure!(max_buckets > 0, "--max-buckets must be at least 1");
    let values = read_input(args)?;
    let cfg = TraceConfig {
        max_buckets,
        max_counting_range,
        ..TraceConfig::default()
    };

    info!(algorithm = %algo, n = values.len(), out = %out.display(), "recording sorting trace");
    let steps = generate_with(algo, &values, &cfg);
    let summary = TraceChecker::new()
        .check(&steps, Some(&values))
        .with_context(|| format!("{algo} produced an invalid trace"))?;
    if summary.fallback {
        warn!(algorithm = %algo, "input outside the algorithm's domain; wrote fallback step");
    }

    let digest = digest_hex(&steps)?;
    let mut tf = TraceFile::new(algo.name(), values, steps);
    tf.meta = Some(serde_json::json!({
        "seed": args.random.map(|_| args.seed),
        "config": cfg,
        "stable": algo.is_stable(),
        "digest": digest,
    }));

    write_trace_auto(out, &tf).with_context(|| format!("writing trace to {}", out.display()))?;

    println!(
        "Recorded {} sort: n={} → {} steps → {}",
        algo,
        tf.input.len(),
        tf.len(),
        out.display()
    );
    Ok(())
}

fn tree(values: Option<&str>, deletions: Option<&str>, out: &Path) -> Result<()> {
    let values = values
        .map(parse_values)
        .transpose()
        .context("parsing --values")?
        .unwrap_or_default();
    let deletions = deletions
        .map(parse_values)
        .transpose()
        .context("parsing --delete")?
        .unwrap_or_default();

    info!(n = values.len(), deletions = deletions.len(), out = %out.display(), "recording tree trace");
    let steps = algotrace_tree::generate_binary_tree_delete_steps(&values, &deletions)?;
    TraceChecker::new()
        .check(&steps, None)
        .context("tree generator produced an invalid trace")?;

    let digest = digest_hex(&steps)?;
    let mut tf = TraceFile::new("tree", values, steps);
    tf.meta = Some(serde_json::json!({ "digest": digest }));
    write_trace_auto(out, &tf).with_context(|| format!("writing trace to {}", out.display()))?;

    println!("Recorded tree trace: {} steps → {}", tf.len(), out.display());
    Ok(())
}

fn check(trace: &Path, require_sorted: bool) -> Result<()> {
    info!(trace = %trace.display(), require_sorted, "checking trace");
    let tf = read_trace_auto(trace)
        .with_context(|| format!("reading trace from {}", trace.display()))?;

    let input = (!tf.input.is_empty()).then_some(tf.input.as_slice());
    let summary = TraceChecker::with_config(CheckConfig { require_sorted })
        .check(&tf.steps, input)
        .with_context(|| format!("checking {}", trace.display()))?;

    println!(
        "OK: {} trace with {} steps, {} settled{}",
        summary.kind,
        summary.steps,
        summary.settled,
        if summary.fallback { " (not-applicable fallback)" } else { "" }
    );
    Ok(())
}

fn digest(trace: &Path) -> Result<()> {
    info!(trace = %trace.display(), "digesting trace");
    let tf = read_trace_auto(trace)
        .with_context(|| format!("reading trace from {}", trace.display()))?;
    println!("{}", digest_hex(&tf.steps)?);
    Ok(())
}

fn list() {
    for alg in Algorithm::ALL {
        let mut notes = Vec::new();
        if alg.is_stable() {
            notes.push("stable");
        }
        if alg.requires_integers() {
            notes.push("integers only");
        }
        println!("{:<10} {}", alg.name(), notes.join(", "));
    }
}
