//! seqfire — k-mer accelerated batch regex matching over string corpora.
//!
//! # Usage
//!
//! ```bash
//! # Match a CSV column of regex patterns against a CSV column of strings.
//! seqfire match --patterns patterns.csv --strings seqs.csv \
//!     --pattern-col regex --string-col cdr3b --output matches.sfm
//!
//! # Inspect a written match matrix.
//! seqfire stats --matrix matches.sfm
//!
//! # Generate a synthetic CDR3β corpus for testing and benchmarks.
//! seqfire generate --count 100000 --seed 7 --output seqs.csv
//! ```
//!
//! Log verbosity follows `RUST_LOG` (e.g. `RUST_LOG=seqfire=debug`).

mod generate;
mod io;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use seqfire_core::{Matcher, DEFAULT_K};

use crate::generate::GenerateArgs;

#[derive(Parser)]
#[command(name = "seqfire", version, about = "k-mer accelerated batch regex matching")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Match regex patterns against corpus strings, writing a sparse matrix.
    Match(MatchArgs),
    /// Print shape and population of a written match matrix.
    Stats(StatsArgs),
    /// Generate a synthetic CDR3β corpus CSV.
    Generate(GenerateArgs),
}

#[derive(Args)]
struct MatchArgs {
    /// CSV file containing regex patterns.
    #[arg(long)]
    patterns: PathBuf,

    /// CSV file containing corpus strings.
    #[arg(long)]
    strings: PathBuf,

    /// Column name holding the patterns.
    #[arg(long, default_value = "regex")]
    pattern_col: String,

    /// Column name holding the strings.
    #[arg(long, default_value = "cdr3b")]
    string_col: String,

    /// Output path for the binary match matrix.
    #[arg(long)]
    output: PathBuf,

    /// Optional JSON report of patterns that failed to compile.
    #[arg(long)]
    failures: Option<PathBuf>,

    /// k-mer length used for the candidate filter.
    #[arg(long, env = "SEQFIRE_K", default_value_t = DEFAULT_K)]
    k: usize,
}

#[derive(Args)]
struct StatsArgs {
    /// Path to a written match matrix.
    #[arg(long)]
    matrix: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Match(args) => run_match(args),
        Command::Stats(args) => run_stats(args),
        Command::Generate(args) => generate::run(args),
    }
}

fn run_match(args: MatchArgs) -> anyhow::Result<()> {
    let patterns = io::read_column(&args.patterns, &args.pattern_col)?;
    let corpus = io::read_column(&args.strings, &args.string_col)?;
    tracing::info!(
        patterns = patterns.len(),
        strings = corpus.len(),
        k = args.k,
        "matching"
    );

    let started = Instant::now();
    let report = Matcher::with_k(args.k).match_all(&patterns, &corpus);
    tracing::info!(
        matches = report.matrix.nnz(),
        failures = report.failures.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "match complete"
    );

    for failure in &report.failures {
        tracing::warn!(
            index = failure.index,
            pattern = %failure.pattern,
            "pattern failed to compile: {}",
            failure.reason
        );
    }

    io::write_matrix_file(&args.output, &report.matrix)?;
    if let Some(path) = &args.failures {
        io::write_failure_report(path, &report.failures)?;
    }
    Ok(())
}

fn run_stats(args: StatsArgs) -> anyhow::Result<()> {
    let matrix = io::read_matrix_file(&args.matrix)?;
    let (rows, cols) = matrix.shape();
    println!("rows: {rows}");
    println!("cols: {cols}");
    println!("nnz: {}", matrix.nnz());
    Ok(())
}
