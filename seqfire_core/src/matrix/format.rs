//! Binary format constants and header for the match-matrix container.
//!
//! Layout:
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ Header (48 bytes)                           │
//! │  magic: [u8; 4] = "SFMX"                   │
//! │  version: u32 = 1                           │
//! │  flags: u32                                 │
//! │  n_rows: u32                                │
//! │  n_cols: u32                                │
//! │  nnz: u64                                   │
//! │  row_ptr_offset: u64                        │
//! │  col_index_offset: u64                      │
//! │  header_crc32: u32                          │
//! ├─────────────────────────────────────────────┤
//! │ Row Pointers                                │
//! │  (n_rows + 1) × u64 + section_crc32         │
//! ├─────────────────────────────────────────────┤
//! │ Column Indices                              │
//! │  nnz × u32 + section_crc32                  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! All stored cells are 1, so no value section exists; the container is a
//! compressed-row encoding of set membership. Little-endian throughout.

/// Magic bytes identifying a match-matrix container.
pub const MAGIC: [u8; 4] = *b"SFMX";

/// Current format version.
pub const VERSION: u32 = 1;

/// Header size in bytes (fixed).
pub const HEADER_SIZE: usize = 48;

/// Container header parsed from bytes.
#[derive(Debug, Clone)]
pub struct MatrixHeader {
    pub version: u32,
    pub flags: u32,
    pub n_rows: u32,
    pub n_cols: u32,
    pub nnz: u64,
    pub row_ptr_offset: u64,
    pub col_index_offset: u64,
}

impl MatrixHeader {
    /// Serialize header to bytes (48 bytes, little-endian).
    /// CRC32 is computed over the first 44 bytes and appended as bytes 44-47.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(&MAGIC);
        buf[4..8].copy_from_slice(&self.version.to_le_bytes());
        buf[8..12].copy_from_slice(&self.flags.to_le_bytes());
        buf[12..16].copy_from_slice(&self.n_rows.to_le_bytes());
        buf[16..20].copy_from_slice(&self.n_cols.to_le_bytes());
        buf[20..28].copy_from_slice(&self.nnz.to_le_bytes());
        buf[28..36].copy_from_slice(&self.row_ptr_offset.to_le_bytes());
        buf[36..44].copy_from_slice(&self.col_index_offset.to_le_bytes());
        // CRC32 over first 44 bytes.
        let crc = crc32fast::hash(&buf[..44]);
        buf[44..48].copy_from_slice(&crc.to_le_bytes());
        buf
    }

    /// Parse header from bytes. Returns None if invalid.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < HEADER_SIZE {
            return None;
        }

        // Check magic.
        if data[0..4] != MAGIC {
            return None;
        }

        // Check CRC32.
        let stored_crc = u32::from_le_bytes([data[44], data[45], data[46], data[47]]);
        let computed_crc = crc32fast::hash(&data[..44]);
        if stored_crc != computed_crc {
            return None;
        }

        Some(MatrixHeader {
            version: u32::from_le_bytes([data[4], data[5], data[6], data[7]]),
            flags: u32::from_le_bytes([data[8], data[9], data[10], data[11]]),
            n_rows: u32::from_le_bytes([data[12], data[13], data[14], data[15]]),
            n_cols: u32::from_le_bytes([data[16], data[17], data[18], data[19]]),
            nnz: u64::from_le_bytes([
                data[20], data[21], data[22], data[23], data[24], data[25], data[26], data[27],
            ]),
            row_ptr_offset: u64::from_le_bytes([
                data[28], data[29], data[30], data[31], data[32], data[33], data[34], data[35],
            ]),
            col_index_offset: u64::from_le_bytes([
                data[36], data[37], data[38], data[39], data[40], data[41], data[42], data[43],
            ]),
        })
    }
}
