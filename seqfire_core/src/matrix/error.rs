//! Error types for the match-matrix container.

use std::fmt;

/// Errors that can occur reading or writing the binary matrix container.
#[derive(Debug)]
pub enum MatrixFormatError {
    /// Container data is corrupted.
    CorruptMatrix { reason: String },
    /// Invalid magic bytes in the container header.
    InvalidMagic,
    /// Container version does not match the expected version.
    VersionMismatch { expected: u32, found: u32 },
    /// A dimension exceeds what the container can represent.
    Overflow { what: &'static str },
}

impl fmt::Display for MatrixFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixFormatError::CorruptMatrix { reason } => {
                write!(f, "Corrupt matrix: {}", reason)
            }
            MatrixFormatError::InvalidMagic => {
                write!(f, "Invalid magic bytes in matrix header")
            }
            MatrixFormatError::VersionMismatch { expected, found } => {
                write!(f, "Version mismatch: expected {}, found {}", expected, found)
            }
            MatrixFormatError::Overflow { what } => {
                write!(f, "Matrix {} exceeds container limits", what)
            }
        }
    }
}

impl std::error::Error for MatrixFormatError {}
