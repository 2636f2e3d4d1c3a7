//! `seqfire_core` — k-mer accelerated full-string regex matching.
//!
//! Batch-matches regex patterns against an in-memory string corpus by
//! pruning candidates with a k-mer inverted index before verification with
//! the `regex` engine. The index is purely a filter: results are
//! bit-identical to brute-force anchored matching of every pattern against
//! every string.
//!
//! Modules:
//! - `kmer`    — inverted index (build once per corpus, intersect postings per query)
//! - `pattern` — mandatory-k-mer extraction from regex structure
//! - `matcher` — compile → filter → verify orchestration
//! - `matrix`  — sparse result matrix + binary CSR container
//! - `error`   — match error taxonomy

pub mod error;
pub mod kmer;
pub mod matcher;
pub mod matrix;
pub mod pattern;

pub use error::MatchError;
pub use kmer::{KmerIndex, KmerSet, DEFAULT_K};
pub use matcher::{
    match_all, match_with_row_indices, MatchReport, Matcher, PatternFailure, PatternMatches,
};
pub use matrix::{read_matrix, write_matrix, Csr, MatchMatrix, MatrixFormatError};
pub use pattern::mandatory_kmers;
