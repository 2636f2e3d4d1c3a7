//! Synthetic CDR3β corpus generation via V(D)J recombination simulation.
//!
//! Simplified conserved motif tables; generated corpora share realistic
//! prefixes and suffixes, which is what exercises the k-mer filter.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Conserved V-segment motifs (simplified).
const TRBV_MOTIFS: &[(&str, &str)] = &[
    ("TRBV5-1", "CASS"),
    ("TRBV7-2", "CASR"),
    ("TRBV20-1", "CASS"),
];

/// D segments.
const TRBD_SEGMENTS: &[(&str, &str)] = &[("TRBD1", "GGGGG"), ("TRBD2", "NAGGG")];

/// Conserved J-segment suffixes.
const TRBJ_SUFFIXES: &[(&str, &str)] = &[
    ("TRBJ1-1", "YEQYF"),
    ("TRBJ2-3", "FGTQYF"),
    ("TRBJ2-7", "EQYF"),
];

const AMINO_ACIDS: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

#[derive(Args)]
pub struct GenerateArgs {
    /// Number of sequences to generate.
    #[arg(long, default_value_t = 100_000)]
    count: usize,

    /// Output CSV path (columns: cdr3b,v,d,j).
    #[arg(long)]
    output: PathBuf,

    /// RNG seed for reproducible corpora.
    #[arg(long, env = "SEQFIRE_SEED")]
    seed: Option<u64>,

    /// Generate uniform random strings of this length instead of simulated
    /// recombination events.
    #[arg(long)]
    random_length: Option<usize>,
}

/// One simulated recombination event.
#[derive(Debug, Clone)]
pub struct Cdr3 {
    pub sequence: String,
    pub v: &'static str,
    pub d: &'static str,
    pub j: &'static str,
}

/// Trim up to `max_del` characters from the end of a segment.
fn trim_end(rng: &mut impl Rng, segment: &str, max_del: usize) -> String {
    let n = rng.gen_range(0..=max_del.min(segment.len()));
    segment[..segment.len() - n].to_string()
}

/// Random N/P-region insertion of 0..=max_len amino acids.
fn np_insertion(rng: &mut impl Rng, max_len: usize) -> String {
    let n = rng.gen_range(0..=max_len);
    (0..n)
        .map(|_| AMINO_ACIDS[rng.gen_range(0..AMINO_ACIDS.len())] as char)
        .collect()
}

/// Simulate one V(D)J recombination: segment choice, exonuclease trimming,
/// N/P insertions.
pub fn generate_realistic(rng: &mut impl Rng) -> Cdr3 {
    let (v_name, v_seq) = TRBV_MOTIFS[rng.gen_range(0..TRBV_MOTIFS.len())];
    let (d_name, d_seq) = TRBD_SEGMENTS[rng.gen_range(0..TRBD_SEGMENTS.len())];
    let (j_name, j_seq) = TRBJ_SUFFIXES[rng.gen_range(0..TRBJ_SUFFIXES.len())];

    let v_trimmed = trim_end(rng, v_seq, 2);
    let d_trimmed_inner = trim_end(rng, d_seq, 2);
    let d_trimmed = trim_end(rng, &d_trimmed_inner, 2);
    // J segments trim from the front.
    let j_trimmed = &j_seq[rng.gen_range(0..=2)..];

    let n1 = np_insertion(rng, 3);
    let n2 = np_insertion(rng, 3);

    Cdr3 {
        sequence: format!("{v_trimmed}{n1}{d_trimmed}{n2}{j_trimmed}"),
        v: v_name,
        d: d_name,
        j: j_name,
    }
}

/// Uniform random amino acid string of fixed length.
pub fn random_sequence(rng: &mut impl Rng, length: usize) -> String {
    (0..length)
        .map(|_| AMINO_ACIDS[rng.gen_range(0..AMINO_ACIDS.len())] as char)
        .collect()
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("open {}", args.output.display()))?;
    writer
        .write_record(["cdr3b", "v", "d", "j"])
        .context("write CSV header")?;

    for _ in 0..args.count {
        match args.random_length {
            Some(length) => {
                let sequence = random_sequence(&mut rng, length);
                writer.write_record([sequence.as_str(), "", "", ""])?;
            }
            None => {
                let event = generate_realistic(&mut rng);
                writer.write_record([event.sequence.as_str(), event.v, event.d, event.j])?;
            }
        }
    }
    writer.flush().context("flush CSV output")?;

    tracing::info!(
        count = args.count,
        output = %args.output.display(),
        "corpus written"
    );
    Ok(())
}
