//! Batch match orchestration: compile → filter → verify → assemble.

use rayon::prelude::*;
use regex::Regex;
use roaring::RoaringBitmap;
use serde::Serialize;

use crate::error::MatchError;
use crate::kmer::{extract, KmerIndex, KmerSet, DEFAULT_K};
use crate::matrix::MatchMatrix;
use crate::pattern;

/// Pattern count at or above which rows are computed on rayon workers.
const PARALLEL_PATTERN_THRESHOLD: usize = 10;

/// One pattern that failed to compile. Its matrix row stays all-zero.
#[derive(Debug, Clone, Serialize)]
pub struct PatternFailure {
    pub index: usize,
    pub pattern: String,
    pub reason: String,
}

/// Result of a batch match: the sparse matrix plus recorded failures.
///
/// The matrix always has one row per input pattern and one column per
/// corpus string, whatever went wrong with individual patterns.
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub matrix: MatchMatrix,
    pub failures: Vec<PatternFailure>,
}

/// Per-pattern matching ids, the row-indices output shape.
#[derive(Debug, Clone, Serialize)]
pub struct PatternMatches {
    pub pattern: String,
    pub ids: Vec<u32>,
}

/// Batch matcher over a fixed k-mer length.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    k: usize,
}

impl Matcher {
    /// Matcher with the default k-mer length.
    pub fn new() -> Self {
        Matcher { k: DEFAULT_K }
    }

    /// Matcher with an explicit k-mer length.
    pub fn with_k(k: usize) -> Self {
        Matcher { k }
    }

    /// Match every pattern against every corpus string.
    ///
    /// Matching is full-string: a pattern matches only if it accounts for
    /// the entire string. The result is bit-identical to brute-force
    /// anchored matching — the index only prunes verification work, it
    /// never decides a match. A malformed pattern is recorded in
    /// `failures` and its row stays all-zero; the batch always completes.
    pub fn match_all<P, S>(&self, patterns: &[P], corpus: &[S]) -> MatchReport
    where
        P: AsRef<str> + Sync,
        S: AsRef<str> + Sync,
    {
        // The index must be complete before the first query; it is shared
        // read-only by every worker afterward.
        let index = KmerIndex::build_with_k(corpus, self.k);

        let rows: Vec<Result<RoaringBitmap, MatchError>> =
            if patterns.len() >= PARALLEL_PATTERN_THRESHOLD {
                patterns
                    .par_iter()
                    .map(|p| match_row(p.as_ref(), &index, corpus, self.k))
                    .collect()
            } else {
                patterns
                    .iter()
                    .map(|p| match_row(p.as_ref(), &index, corpus, self.k))
                    .collect()
            };

        let mut matrix = MatchMatrix::zero(patterns.len(), corpus.len());
        let mut failures = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            match row {
                Ok(bits) => matrix.set_row(index, bits),
                Err(MatchError::PatternSyntax { pattern, reason }) => {
                    failures.push(PatternFailure {
                        index,
                        pattern,
                        reason,
                    });
                }
                Err(other) => failures.push(PatternFailure {
                    index,
                    pattern: patterns[index].as_ref().to_string(),
                    reason: other.to_string(),
                }),
            }
        }

        MatchReport { matrix, failures }
    }

    /// Per-pattern matching ids instead of a matrix; same semantics as
    /// [`Matcher::match_all`], including failure containment.
    pub fn match_with_row_indices<P, S>(
        &self,
        patterns: &[P],
        corpus: &[S],
    ) -> (Vec<PatternMatches>, Vec<PatternFailure>)
    where
        P: AsRef<str> + Sync,
        S: AsRef<str> + Sync,
    {
        let report = self.match_all(patterns, corpus);
        let matches = patterns
            .iter()
            .enumerate()
            .map(|(i, p)| PatternMatches {
                pattern: p.as_ref().to_string(),
                ids: report.matrix.row_ids(i),
            })
            .collect();
        (matches, report.failures)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute one pattern's row: compile, prune, verify candidates.
fn match_row<S: AsRef<str>>(
    pattern: &str,
    index: &KmerIndex,
    corpus: &[S],
    k: usize,
) -> Result<RoaringBitmap, MatchError> {
    let mut row = RoaringBitmap::new();

    if pattern::is_literal(pattern) {
        // A literal full-matches a string exactly when it equals it, and
        // its mandatory k-mers are its own k-windows.
        let kmers: KmerSet = extract::kmers(pattern.as_bytes(), k).into_iter().collect();
        for id in index.candidates(&kmers) {
            if corpus[id as usize].as_ref() == pattern {
                row.insert(id);
            }
        }
        return Ok(row);
    }

    // Full-string semantics: anchor at both ends.
    let re = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| MatchError::PatternSyntax {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    let kmers = pattern::mandatory_kmers(pattern, k)?;

    for id in index.candidates(&kmers) {
        if re.is_match(corpus[id as usize].as_ref()) {
            row.insert(id);
        }
    }
    Ok(row)
}

/// Match with the default k-mer length.
pub fn match_all<P, S>(patterns: &[P], corpus: &[S]) -> MatchReport
where
    P: AsRef<str> + Sync,
    S: AsRef<str> + Sync,
{
    Matcher::new().match_all(patterns, corpus)
}

/// Row-indices output shape with the default k-mer length.
pub fn match_with_row_indices<P, S>(
    patterns: &[P],
    corpus: &[S],
) -> (Vec<PatternMatches>, Vec<PatternFailure>)
where
    P: AsRef<str> + Sync,
    S: AsRef<str> + Sync,
{
    Matcher::new().match_with_row_indices(patterns, corpus)
}
