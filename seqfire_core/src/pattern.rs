//! Mandatory-k-mer extraction from regex structure.
//!
//! Walks the pattern's `regex_syntax` HIR and collects every k-mer that any
//! full-matching string must contain. The result is a necessary-condition
//! filter only: containing all extracted k-mers does not imply a match, and
//! an empty set means "no usable filter", never "matches nothing".

use regex_syntax::hir::{Hir, HirKind};

use crate::error::MatchError;
use crate::kmer::KmerSet;

/// Extract the mandatory k-mers of `pattern`.
///
/// Literal runs are maximal sequences of bytes that must appear verbatim
/// and adjacent in any match; each run of length ≥ k emits all of its
/// k-windows. Constructs that can elide or relocate bytes — zero-minimum
/// quantifiers, alternations, character classes, anchors — contribute
/// nothing and break run adjacency, so no emitted k-mer ever spans one.
///
/// Malformed patterns fail with [`MatchError::PatternSyntax`].
pub fn mandatory_kmers(pattern: &str, k: usize) -> Result<KmerSet, MatchError> {
    let hir = regex_syntax::parse(pattern).map_err(|e| MatchError::PatternSyntax {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let mut out = KmerSet::new();
    collect(&hir, k, &mut out);
    Ok(out)
}

/// Recursively collect mandatory k-mers from an HIR node.
fn collect(hir: &Hir, k: usize, out: &mut KmerSet) {
    match hir.kind() {
        HirKind::Literal(lit) => emit_run(&lit.0, k, out),
        HirKind::Concat(subs) => {
            // Adjacent literal children form one run; anything else flushes
            // it and breaks adjacency.
            let mut run: Vec<u8> = Vec::new();
            for sub in subs {
                if let HirKind::Literal(lit) = sub.kind() {
                    run.extend_from_slice(&lit.0);
                } else {
                    emit_run(&run, k, out);
                    run.clear();
                    collect(sub, k, out);
                }
            }
            emit_run(&run, k, out);
        }
        HirKind::Capture(cap) => collect(&cap.sub, k, out),
        HirKind::Repetition(rep) => {
            // With min ≥ 1 the sub-expression occurs in full at least once,
            // so its mandatory k-mers stay mandatory. min = 0 means every
            // byte of the sub can be elided.
            if rep.min >= 1 {
                collect(&rep.sub, k, out);
            }
        }
        // A k-mer from one alternation branch is not a necessary substring,
        // and classes, anchors and empties carry no fixed bytes.
        HirKind::Alternation(_) | HirKind::Class(_) | HirKind::Look(_) | HirKind::Empty => {}
    }
}

/// Emit every k-window of a literal run; runs shorter than k emit nothing.
fn emit_run(run: &[u8], k: usize, out: &mut KmerSet) {
    if k == 0 || run.len() < k {
        return;
    }
    for window in run.windows(k) {
        out.insert(Box::from(window));
    }
}

/// Check whether a pattern is a plain literal (no regex metacharacters).
///
/// A literal pattern full-matches a string exactly when it equals it, so
/// the matcher verifies such candidates by equality instead of running the
/// regex engine.
pub fn is_literal(pattern: &str) -> bool {
    !pattern.chars().any(|c| {
        matches!(
            c,
            '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '^' | '$' | '\\'
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(kmers: &[&[u8]]) -> KmerSet {
        kmers.iter().map(|k| Box::from(*k)).collect()
    }

    #[test]
    fn test_pure_literal() {
        let kmers = mandatory_kmers("ABCDEF", 3).unwrap();
        assert_eq!(kmers, set(&[b"ABC", b"BCD", b"CDE", b"DEF"]));
    }

    #[test]
    fn test_runs_split_by_wildcard() {
        let kmers = mandatory_kmers("ABC.*DEF", 3).unwrap();
        assert_eq!(kmers, set(&[b"ABC", b"DEF"]));
    }

    #[test]
    fn test_no_kmer_spans_a_wildcard() {
        // "CD" + "EF" are adjacent only textually; "." sits between them.
        let kmers = mandatory_kmers("ABCD.EFGH", 3).unwrap();
        assert_eq!(kmers, set(&[b"ABC", b"BCD", b"EFG", b"FGH"]));
    }

    #[test]
    fn test_optional_literal_elided() {
        // 'D' can be elided by '?', so no k-mer may use it.
        let kmers = mandatory_kmers("ABCD?EF", 3).unwrap();
        assert_eq!(kmers, set(&[b"ABC"]));
    }

    #[test]
    fn test_short_runs_emit_nothing() {
        assert!(mandatory_kmers("AB.*EF", 3).unwrap().is_empty());
        assert!(mandatory_kmers("A.B.C", 3).unwrap().is_empty());
    }

    #[test]
    fn test_all_wildcard_is_empty() {
        assert!(mandatory_kmers(".*", 3).unwrap().is_empty());
        assert!(mandatory_kmers("", 3).unwrap().is_empty());
        assert!(mandatory_kmers("[ABC]+", 3).unwrap().is_empty());
    }

    #[test]
    fn test_alternation_contributes_nothing() {
        assert!(mandatory_kmers("ABCDE|FGHIJ", 3).unwrap().is_empty());
        // Literal run outside the alternation still counts.
        let kmers = mandatory_kmers("XYZW(ABC|DEF)", 3).unwrap();
        assert_eq!(kmers, set(&[b"XYZ", b"YZW"]));
    }

    #[test]
    fn test_group_is_transparent() {
        let kmers = mandatory_kmers("(ABCD)EF", 3).unwrap();
        // The group boundary still breaks adjacency with "EF".
        assert!(kmers.contains(&Box::from(&b"ABC"[..])));
        assert!(kmers.contains(&Box::from(&b"BCD"[..])));
        assert!(!kmers.contains(&Box::from(&b"DEF"[..])));
    }

    #[test]
    fn test_repetition_min_one_contributes() {
        let kmers = mandatory_kmers("(ABCD)+XY", 3).unwrap();
        assert_eq!(kmers, set(&[b"ABC", b"BCD"]));
        let kmers = mandatory_kmers("(?:WXYZ){2,5}", 3).unwrap();
        assert_eq!(kmers, set(&[b"WXY", b"XYZ"]));
    }

    #[test]
    fn test_repetition_min_zero_contributes_nothing() {
        assert!(mandatory_kmers("(ABCD)*", 3).unwrap().is_empty());
        assert!(mandatory_kmers("(ABCD){0,3}", 3).unwrap().is_empty());
    }

    #[test]
    fn test_anchors_break_runs_only() {
        let kmers = mandatory_kmers("^ABCD$", 3).unwrap();
        assert_eq!(kmers, set(&[b"ABC", b"BCD"]));
    }

    #[test]
    fn test_malformed_pattern_is_error() {
        let err = mandatory_kmers("[INVALID", 3).unwrap_err();
        assert!(matches!(err, MatchError::PatternSyntax { .. }));
    }

    #[test]
    fn test_is_literal() {
        assert!(is_literal("ABCDEF"));
        assert!(is_literal(""));
        assert!(is_literal("CASSQETQYF"));
        assert!(!is_literal("ABC.*"));
        assert!(!is_literal("A|B"));
        assert!(!is_literal("A\\d"));
        assert!(!is_literal("^ABC$"));
        assert!(!is_literal("A{3}"));
    }
}
