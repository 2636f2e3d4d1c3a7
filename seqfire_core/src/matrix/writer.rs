//! Match-matrix serialization — byte output only.
//!
//! The caller is responsible for writing the bytes to disk.

use super::error::MatrixFormatError;
use super::format::{MatrixHeader, HEADER_SIZE, VERSION};
use super::MatchMatrix;

/// Serialize a match matrix to its binary container.
///
/// Returns the complete container content as a `Vec<u8>`.
pub fn write_matrix(matrix: &MatchMatrix) -> Result<Vec<u8>, MatrixFormatError> {
    let (n_rows, n_cols) = matrix.shape();
    let n_rows = u32::try_from(n_rows).map_err(|_| MatrixFormatError::Overflow {
        what: "row count",
    })?;
    let n_cols = u32::try_from(n_cols).map_err(|_| MatrixFormatError::Overflow {
        what: "column count",
    })?;

    let csr = matrix.to_csr();
    let nnz = csr.col_indices.len() as u64;

    // Section sizes; each section carries a trailing CRC32.
    let row_ptr_size = csr.row_ptr.len() * 8 + 4;
    let col_index_size = csr.col_indices.len() * 4 + 4;

    let row_ptr_offset = HEADER_SIZE as u64;
    let col_index_offset = row_ptr_offset + row_ptr_size as u64;
    let total_size = HEADER_SIZE + row_ptr_size + col_index_size;

    let mut output = Vec::with_capacity(total_size);

    let header = MatrixHeader {
        version: VERSION,
        flags: 0,
        n_rows,
        n_cols,
        nnz,
        row_ptr_offset,
        col_index_offset,
    };
    output.extend_from_slice(&header.to_bytes());

    // Row pointer section.
    let row_ptr_start = output.len();
    for ptr in &csr.row_ptr {
        output.extend_from_slice(&ptr.to_le_bytes());
    }
    let row_ptr_crc = crc32fast::hash(&output[row_ptr_start..]);
    output.extend_from_slice(&row_ptr_crc.to_le_bytes());

    // Column index section.
    let col_index_start = output.len();
    for col in &csr.col_indices {
        output.extend_from_slice(&col.to_le_bytes());
    }
    let col_index_crc = crc32fast::hash(&output[col_index_start..]);
    output.extend_from_slice(&col_index_crc.to_le_bytes());

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::super::format::MAGIC;
    use super::*;

    #[test]
    fn test_write_empty_matrix() {
        let bytes = write_matrix(&MatchMatrix::zero(0, 0)).expect("Should serialize");
        // Header (48) + row_ptr[0] (8) + two section CRCs (8).
        assert_eq!(bytes.len(), HEADER_SIZE + 8 + 8);
        assert_eq!(&bytes[0..4], &MAGIC);
    }

    #[test]
    fn test_write_preserves_header() {
        let mut matrix = MatchMatrix::zero(3, 10);
        matrix.set(0, 1);
        matrix.set(2, 9);
        let bytes = write_matrix(&matrix).expect("Should serialize");

        let header = MatrixHeader::from_bytes(&bytes).expect("Should parse header");
        assert_eq!(header.version, VERSION);
        assert_eq!(header.n_rows, 3);
        assert_eq!(header.n_cols, 10);
        assert_eq!(header.nnz, 2);
        assert_eq!(header.row_ptr_offset, HEADER_SIZE as u64);
        assert!(header.col_index_offset > header.row_ptr_offset);
    }

    #[test]
    fn test_write_degenerate_shapes() {
        for (rows, cols) in [(1, 0), (0, 5)] {
            let bytes = write_matrix(&MatchMatrix::zero(rows, cols)).expect("Should serialize");
            let header = MatrixHeader::from_bytes(&bytes).expect("Should parse header");
            assert_eq!(header.n_rows, rows as u32);
            assert_eq!(header.n_cols, cols as u32);
            assert_eq!(header.nnz, 0);
        }
    }
}
