//! CSV ingestion and matrix file round-trip.
//!
//! The core crate produces and consumes bytes; everything touching the
//! filesystem lives here.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use seqfire_core::{read_matrix, write_matrix, MatchMatrix, PatternFailure};

/// Read one named column of a headered CSV file.
pub fn read_column(path: &Path, column: &str) -> anyhow::Result<Vec<String>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("open {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("read CSV headers of {}", path.display()))?
        .clone();
    let Some(column_index) = headers.iter().position(|h| h == column) else {
        bail!(
            "column {:?} not found in {} (headers: {})",
            column,
            path.display(),
            headers.iter().collect::<Vec<_>>().join(", ")
        );
    };

    let mut out = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record from {}", path.display()))?;
        out.push(record.get(column_index).unwrap_or("").to_string());
    }
    Ok(out)
}

/// Serialize a match matrix and write it to `path`.
pub fn write_matrix_file(path: &Path, matrix: &MatchMatrix) -> anyhow::Result<()> {
    let bytes = write_matrix(matrix).context("serialize match matrix")?;
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))
}

/// Read and validate a match matrix from `path`.
pub fn read_matrix_file(path: &Path) -> anyhow::Result<MatchMatrix> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let matrix =
        read_matrix(&bytes).with_context(|| format!("parse match matrix {}", path.display()))?;
    Ok(matrix)
}

/// Write pattern compile failures as a JSON array.
pub fn write_failure_report(path: &Path, failures: &[PatternFailure]) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(failures).context("serialize failure report")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))
}
