//! Sparse boolean pattern × string match matrix and its binary container.
//!
//! - **format** — container constants + header (magic, CRC32)
//! - **writer** — matrix → bytes (no file I/O)
//! - **reader** — bytes → matrix with integrity validation
//! - **error** — container error types

pub mod error;
pub mod format;
pub mod reader;
pub mod writer;

pub use error::MatrixFormatError;
pub use reader::read_matrix;
pub use writer::write_matrix;

use roaring::RoaringBitmap;

/// Sparse boolean matrix with one row per pattern and one column per corpus
/// string. Cell (p, s) is 1 iff pattern p full-matches string s.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchMatrix {
    n_cols: usize,
    rows: Vec<RoaringBitmap>,
}

impl MatchMatrix {
    /// All-zero matrix of the given shape.
    pub fn zero(n_rows: usize, n_cols: usize) -> Self {
        MatchMatrix {
            n_cols,
            rows: vec![RoaringBitmap::new(); n_rows],
        }
    }

    /// (rows, cols) — (pattern count, corpus size).
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.n_cols)
    }

    /// Whether cell (row, col) is set. Out-of-shape cells read as 0.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        match (self.rows.get(row), u32::try_from(col)) {
            (Some(bits), Ok(col)) => bits.contains(col),
            _ => false,
        }
    }

    /// Set cell (row, col) to 1.
    ///
    /// Panics if `row` is out of bounds.
    pub fn set(&mut self, row: usize, col: u32) {
        self.rows[row].insert(col);
    }

    /// Replace a whole row bitmap.
    pub(crate) fn set_row(&mut self, row: usize, bits: RoaringBitmap) {
        self.rows[row] = bits;
    }

    /// Matching column ids of one row, ascending. Out-of-bounds rows are
    /// empty.
    pub fn row_ids(&self, row: usize) -> Vec<u32> {
        self.rows
            .get(row)
            .map(|bits| bits.iter().collect())
            .unwrap_or_default()
    }

    /// Number of set cells.
    pub fn nnz(&self) -> u64 {
        self.rows.iter().map(|bits| bits.len()).sum()
    }

    /// (pattern index, string index, 1) triples in row-major order, for any
    /// sparse encoder to consume.
    pub fn triples(&self) -> Vec<(u32, u32, u8)> {
        let mut out = Vec::with_capacity(self.nnz() as usize);
        for (row, bits) in self.rows.iter().enumerate() {
            for col in bits {
                out.push((row as u32, col, 1));
            }
        }
        out
    }

    /// Compressed-row view: `row_ptr` has rows + 1 entries and
    /// `col_indices` has nnz entries (all stored values are 1).
    pub fn to_csr(&self) -> Csr {
        let mut row_ptr = Vec::with_capacity(self.rows.len() + 1);
        let mut col_indices = Vec::with_capacity(self.nnz() as usize);
        row_ptr.push(0);
        for bits in &self.rows {
            col_indices.extend(bits.iter());
            row_ptr.push(col_indices.len() as u64);
        }
        Csr {
            row_ptr,
            col_indices,
        }
    }
}

/// Compressed sparse row view of a match matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Csr {
    pub row_ptr: Vec<u64>,
    pub col_indices: Vec<u32>,
}
