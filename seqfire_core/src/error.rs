//! Error types for pattern matching.

use std::fmt;

/// Errors that can occur while matching patterns against a corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Pattern could not be parsed or compiled. Isolated to that pattern's
    /// row; the batch continues.
    PatternSyntax { pattern: String, reason: String },
    /// The index was queried with zero k-mers. Callers holding an empty
    /// mandatory set must fall back to the full corpus instead of querying.
    EmptyQuery,
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::PatternSyntax { pattern, reason } => {
                write!(f, "Invalid pattern {:?}: {}", pattern, reason)
            }
            MatchError::EmptyQuery => write!(f, "Index queried with zero k-mers"),
        }
    }
}

impl std::error::Error for MatchError {}
