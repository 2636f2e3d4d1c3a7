//! Match-matrix deserialization with integrity validation.

use super::error::MatrixFormatError;
use super::format::{MatrixHeader, HEADER_SIZE, VERSION};
use super::MatchMatrix;

/// Verify a section's CRC32 checksum.
///
/// Each section is laid out as: `[data bytes][crc32 (4 bytes)]`.
/// The CRC is computed over the data bytes only.
fn verify_section_crc(
    data: &[u8],
    section_start: usize,
    section_end: usize,
    name: &str,
) -> Result<(), MatrixFormatError> {
    if section_end < section_start + 4 || section_end > data.len() {
        return Err(MatrixFormatError::CorruptMatrix {
            reason: format!("{} section too small for CRC", name),
        });
    }
    let crc_start = section_end - 4;
    let stored_crc = u32::from_le_bytes([
        data[crc_start],
        data[crc_start + 1],
        data[crc_start + 2],
        data[crc_start + 3],
    ]);
    let computed_crc = crc32fast::hash(&data[section_start..crc_start]);
    if stored_crc != computed_crc {
        return Err(MatrixFormatError::CorruptMatrix {
            reason: format!(
                "{} CRC mismatch (stored={:#010x}, computed={:#010x})",
                name, stored_crc, computed_crc
            ),
        });
    }
    Ok(())
}

fn read_u64_le(data: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
        data[offset + 4],
        data[offset + 5],
        data[offset + 6],
        data[offset + 7],
    ])
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Parse and validate a binary matrix container.
pub fn read_matrix(data: &[u8]) -> Result<MatchMatrix, MatrixFormatError> {
    if data.len() < HEADER_SIZE {
        return Err(MatrixFormatError::CorruptMatrix {
            reason: "Data too small for header".to_string(),
        });
    }

    let header = MatrixHeader::from_bytes(data).ok_or(MatrixFormatError::InvalidMagic)?;

    if header.version != VERSION {
        return Err(MatrixFormatError::VersionMismatch {
            expected: VERSION,
            found: header.version,
        });
    }

    // Validate that offsets are within bounds and ordered.
    let data_len = data.len() as u64;
    if header.row_ptr_offset > data_len
        || header.col_index_offset > data_len
        || header.row_ptr_offset != HEADER_SIZE as u64
        || header.row_ptr_offset > header.col_index_offset
    {
        return Err(MatrixFormatError::CorruptMatrix {
            reason: "Section offset exceeds data size or offsets not ordered".to_string(),
        });
    }

    let row_ptr_start = header.row_ptr_offset as usize;
    let col_index_start = header.col_index_offset as usize;

    verify_section_crc(data, row_ptr_start, col_index_start, "Row pointer")?;
    verify_section_crc(data, col_index_start, data.len(), "Column index")?;

    // Row pointer section: (n_rows + 1) × u64 followed by its CRC.
    let n_rows = header.n_rows as usize;
    let expected_row_ptr_bytes = (n_rows + 1) * 8;
    if col_index_start - row_ptr_start != expected_row_ptr_bytes + 4 {
        return Err(MatrixFormatError::CorruptMatrix {
            reason: format!(
                "Row pointer section size mismatch (expected {} entries)",
                n_rows + 1
            ),
        });
    }

    let mut row_ptr = Vec::with_capacity(n_rows + 1);
    for i in 0..=n_rows {
        row_ptr.push(read_u64_le(data, row_ptr_start + i * 8));
    }

    if row_ptr[0] != 0 {
        return Err(MatrixFormatError::CorruptMatrix {
            reason: "Row pointers must start at zero".to_string(),
        });
    }
    if row_ptr.windows(2).any(|w| w[0] > w[1]) {
        return Err(MatrixFormatError::CorruptMatrix {
            reason: "Row pointers must be non-decreasing".to_string(),
        });
    }
    if row_ptr[n_rows] != header.nnz {
        return Err(MatrixFormatError::CorruptMatrix {
            reason: "Final row pointer disagrees with header nnz".to_string(),
        });
    }

    // Column index section: nnz × u32 followed by its CRC.
    let expected_col_bytes = header.nnz as usize * 4;
    if data.len() - col_index_start != expected_col_bytes + 4 {
        return Err(MatrixFormatError::CorruptMatrix {
            reason: "Column index section size disagrees with header nnz".to_string(),
        });
    }

    let mut matrix = MatchMatrix::zero(n_rows, header.n_cols as usize);
    for row in 0..n_rows {
        let start = row_ptr[row] as usize;
        let end = row_ptr[row + 1] as usize;
        for entry in start..end {
            let col = read_u32_le(data, col_index_start + entry * 4);
            if col >= header.n_cols {
                return Err(MatrixFormatError::CorruptMatrix {
                    reason: format!("Column index {} out of bounds for {} columns", col, header.n_cols),
                });
            }
            matrix.set(row, col);
        }
    }

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::super::writer::write_matrix;
    use super::*;

    fn sample() -> MatchMatrix {
        let mut m = MatchMatrix::zero(3, 5);
        m.set(0, 0);
        m.set(0, 4);
        m.set(2, 2);
        m
    }

    #[test]
    fn test_roundtrip() {
        let matrix = sample();
        let bytes = write_matrix(&matrix).expect("Should serialize");
        let restored = read_matrix(&bytes).expect("Should deserialize");
        assert_eq!(restored, matrix);
    }

    #[test]
    fn test_roundtrip_degenerate_shapes() {
        for (rows, cols) in [(0, 0), (1, 0), (0, 5)] {
            let matrix = MatchMatrix::zero(rows, cols);
            let bytes = write_matrix(&matrix).expect("Should serialize");
            let restored = read_matrix(&bytes).expect("Should deserialize");
            assert_eq!(restored.shape(), (rows, cols));
            assert_eq!(restored.nnz(), 0);
        }
    }

    #[test]
    fn test_corrupt_magic_rejected() {
        let mut bytes = write_matrix(&sample()).expect("Should serialize");
        bytes[0] = b'X';
        assert!(matches!(
            read_matrix(&bytes),
            Err(MatrixFormatError::InvalidMagic)
        ));
    }

    #[test]
    fn test_corrupt_section_rejected() {
        let mut bytes = write_matrix(&sample()).expect("Should serialize");
        // Flip one byte inside the row pointer section.
        bytes[HEADER_SIZE + 1] ^= 0xFF;
        assert!(matches!(
            read_matrix(&bytes),
            Err(MatrixFormatError::CorruptMatrix { .. })
        ));
    }

    #[test]
    fn test_truncated_data_rejected() {
        let bytes = write_matrix(&sample()).expect("Should serialize");
        assert!(read_matrix(&bytes[..bytes.len() - 3]).is_err());
        assert!(read_matrix(&bytes[..10]).is_err());
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let matrix = MatchMatrix::zero(1, 1);
        let bytes = write_matrix(&matrix).expect("Should serialize");
        let mut header = MatrixHeader::from_bytes(&bytes).expect("Should parse header");
        header.version = VERSION + 1;
        let mut patched = header.to_bytes().to_vec();
        patched.extend_from_slice(&bytes[HEADER_SIZE..]);
        assert!(matches!(
            read_matrix(&patched),
            Err(MatrixFormatError::VersionMismatch { .. })
        ));
    }
}
