// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! On-disk format for snippet vector indexes.
//!
//! ```text
//! ┌──────────────────────────┐
//! │ HEADER         [32B]     │ magic, version, flags, dimension, rows,
//! │                          │ table fingerprint, model id length
//! ├──────────────────────────┤
//! │ MODEL ID  [model_id_len] │ UTF-8
//! ├──────────────────────────┤
//! │ VECTORS   [rows·dim·4]   │ little-endian f32, row-major, row i = snippet i
//! ├──────────────────────────┤
//! │ FOOTER         [8B]      │ CRC32 of everything above, then "XVKD"
//! └──────────────────────────┘
//! ```
//!
//! The footer catches truncation and corruption; the header's row count and
//! fingerprint catch a perfectly valid index paired with the wrong snippet
//! table. Decoding checks sizes with checked arithmetic before allocating,
//! so a hostile header can't ask for a terabyte.
//!
//! **Invariant**: `decode` returns `Ok` only when the CRC matches and
//! `vectors.len() == dimension * row_count` with `dimension > 0`.

use std::io::{self, Write};

use crc32fast::Hasher as Crc32Hasher;
use thiserror::Error;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "DKVX" in ASCII (header)
pub const MAGIC: [u8; 4] = *b"DKVX";

/// Footer magic: "XVKD" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = *b"XVKD";

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS
// ============================================================================

/// Maximum file size: 8 GiB
pub const MAX_FILE_SIZE: u64 = 8 * 1024 * 1024 * 1024;

/// Maximum vector dimension
pub const MAX_DIMENSION: u32 = 8192;

/// Maximum number of rows
pub const MAX_ROWS: u32 = 50_000_000;

/// Maximum model id length in bytes
pub const MAX_MODEL_ID_LEN: u32 = 256;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexFormatError {
    #[error("file too short: need at least {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
    #[error("invalid magic: expected DKVX, got {0:?}")]
    BadMagic([u8; 4]),
    #[error("invalid footer magic")]
    BadFooter,
    #[error("unsupported version {0} (expected {VERSION})")]
    UnsupportedVersion(u8),
    #[error("checksum mismatch: footer says {stored:08x}, content is {computed:08x}")]
    ChecksumMismatch { stored: u32, computed: u32 },
    #[error("{field} = {value} exceeds limit {max}")]
    LimitExceeded {
        field: &'static str,
        value: u64,
        max: u64,
    },
    #[error("dimension must be non-zero")]
    ZeroDimension,
    #[error("header describes {expected} bytes but file has {actual}")]
    SizeMismatch { expected: u64, actual: u64 },
    #[error("model id is not valid UTF-8")]
    InvalidModelId,
    #[error("row {row} has {actual} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

// ============================================================================
// FLAGS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags(pub(crate) u8);

impl FormatFlags {
    pub const HAS_FINGERPRINT: u8 = 0b0000_0001;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn with_fingerprint(mut self) -> Self {
        self.0 |= Self::HAS_FINGERPRINT;
        self
    }

    pub fn has_fingerprint(self) -> bool {
        self.0 & Self::HAS_FINGERPRINT != 0
    }
}

// ============================================================================
// HEADER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHeader {
    pub version: u8,
    pub flags: FormatFlags,
    pub dimension: u32,
    pub row_count: u32,
    /// Snippet table fingerprint; meaningful only with `HAS_FINGERPRINT`.
    pub table_fingerprint: u32,
    pub model_id_len: u32,
}

impl IndexHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 2 (reserved) + 4*4 (u32s) + 8 (reserved) = 32
    pub const SIZE: usize = 32;

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version])?;
        w.write_all(&[self.flags.0])?;
        w.write_all(&[0u8; 2])?;
        w.write_all(&self.dimension.to_le_bytes())?;
        w.write_all(&self.row_count.to_le_bytes())?;
        w.write_all(&self.table_fingerprint.to_le_bytes())?;
        w.write_all(&self.model_id_len.to_le_bytes())?;
        w.write_all(&[0u8; 8])?;
        Ok(())
    }

    pub fn read(bytes: &[u8]) -> Result<Self, IndexFormatError> {
        let buf = bytes.get(..Self::SIZE).ok_or(IndexFormatError::Truncated {
            needed: Self::SIZE,
            actual: bytes.len(),
        })?;

        let magic = [buf[0], buf[1], buf[2], buf[3]];
        if magic != MAGIC {
            return Err(IndexFormatError::BadMagic(magic));
        }

        let u32_at = |at: usize| u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]);

        Ok(Self {
            version: buf[4],
            flags: FormatFlags(buf[5]),
            // buf[6..8] reserved
            dimension: u32_at(8),
            row_count: u32_at(12),
            table_fingerprint: u32_at(16),
            model_id_len: u32_at(20),
            // buf[24..32] reserved
        })
    }

    /// Fingerprint, if the header carries one.
    pub fn fingerprint(&self) -> Option<u32> {
        self.flags
            .has_fingerprint()
            .then_some(self.table_fingerprint)
    }

    /// Size of the vector section in bytes, `None` on overflow.
    fn vectors_len(&self) -> Option<u64> {
        u64::from(self.row_count)
            .checked_mul(u64::from(self.dimension))?
            .checked_mul(4)
    }

    /// Total file size this header describes, `None` on overflow.
    pub fn total_size(&self) -> Option<u64> {
        (Self::SIZE as u64 + IndexFooter::SIZE as u64)
            .checked_add(u64::from(self.model_id_len))?
            .checked_add(self.vectors_len()?)
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFooter {
    /// CRC32 of header + model id + vectors (everything before the footer)
    pub crc32: u32,
}

impl IndexFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    pub fn read(bytes: &[u8]) -> Result<Self, IndexFormatError> {
        if bytes.len() < Self::SIZE {
            return Err(IndexFormatError::Truncated {
                needed: Self::SIZE,
                actual: bytes.len(),
            });
        }
        let start = bytes.len() - Self::SIZE;
        if bytes[start + 4..] != FOOTER_MAGIC {
            return Err(IndexFormatError::BadFooter);
        }
        let crc32 = u32::from_le_bytes([
            bytes[start],
            bytes[start + 1],
            bytes[start + 2],
            bytes[start + 3],
        ]);
        Ok(Self { crc32 })
    }

    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}

// ============================================================================
// ENCODE / DECODE
// ============================================================================

/// A decoded index file: header fields plus owned vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedIndex {
    pub header: IndexHeader,
    pub model_id: String,
    /// Row-major, `row_count * dimension` values.
    pub vectors: Vec<f32>,
}

/// Encode an index file.
///
/// `vectors` is row-major and must hold a whole number of `dimension`-sized rows.
pub fn encode(
    model_id: &str,
    dimension: usize,
    fingerprint: Option<u32>,
    vectors: &[f32],
) -> Result<Vec<u8>, IndexFormatError> {
    if dimension == 0 {
        return Err(IndexFormatError::ZeroDimension);
    }
    let rows = vectors.len() / dimension;
    if rows * dimension != vectors.len() {
        return Err(IndexFormatError::RaggedRow {
            row: rows,
            expected: dimension,
            actual: vectors.len() % dimension,
        });
    }

    let header = IndexHeader {
        version: VERSION,
        flags: match fingerprint {
            Some(_) => FormatFlags::new().with_fingerprint(),
            None => FormatFlags::new(),
        },
        dimension: checked_u32("dimension", dimension, MAX_DIMENSION)?,
        row_count: checked_u32("row_count", rows, MAX_ROWS)?,
        table_fingerprint: fingerprint.unwrap_or(0),
        model_id_len: checked_u32("model_id_len", model_id.len(), MAX_MODEL_ID_LEN)?,
    };

    let mut out = Vec::with_capacity(
        IndexHeader::SIZE + model_id.len() + vectors.len() * 4 + IndexFooter::SIZE,
    );
    // Writes into a Vec cannot fail.
    let _ = header.write(&mut out);
    out.extend_from_slice(model_id.as_bytes());
    for value in vectors {
        out.extend_from_slice(&value.to_le_bytes());
    }
    let footer = IndexFooter {
        crc32: IndexFooter::compute_crc32(&out),
    };
    let _ = footer.write(&mut out);
    Ok(out)
}

fn checked_u32(field: &'static str, value: usize, max: u32) -> Result<u32, IndexFormatError> {
    match u32::try_from(value) {
        Ok(v) if v <= max => Ok(v),
        _ => Err(IndexFormatError::LimitExceeded {
            field,
            value: value as u64,
            max: u64::from(max),
        }),
    }
}

fn check_limit(field: &'static str, value: u32, max: u32) -> Result<(), IndexFormatError> {
    if value > max {
        return Err(IndexFormatError::LimitExceeded {
            field,
            value: u64::from(value),
            max: u64::from(max),
        });
    }
    Ok(())
}

/// Decode and fully validate an index file.
pub fn decode(bytes: &[u8]) -> Result<DecodedIndex, IndexFormatError> {
    let min = IndexHeader::SIZE + IndexFooter::SIZE;
    if bytes.len() < min {
        return Err(IndexFormatError::Truncated {
            needed: min,
            actual: bytes.len(),
        });
    }
    if bytes.len() as u64 > MAX_FILE_SIZE {
        return Err(IndexFormatError::LimitExceeded {
            field: "file_size",
            value: bytes.len() as u64,
            max: MAX_FILE_SIZE,
        });
    }

    let header = IndexHeader::read(bytes)?;
    if header.version != VERSION {
        return Err(IndexFormatError::UnsupportedVersion(header.version));
    }

    let footer = IndexFooter::read(bytes)?;
    let content = &bytes[..bytes.len() - IndexFooter::SIZE];
    let computed = IndexFooter::compute_crc32(content);
    if computed != footer.crc32 {
        return Err(IndexFormatError::ChecksumMismatch {
            stored: footer.crc32,
            computed,
        });
    }

    if header.dimension == 0 {
        return Err(IndexFormatError::ZeroDimension);
    }
    check_limit("dimension", header.dimension, MAX_DIMENSION)?;
    check_limit("row_count", header.row_count, MAX_ROWS)?;
    check_limit("model_id_len", header.model_id_len, MAX_MODEL_ID_LEN)?;

    let expected = header.total_size().ok_or(IndexFormatError::LimitExceeded {
        field: "file_size",
        value: u64::MAX,
        max: MAX_FILE_SIZE,
    })?;
    if expected != bytes.len() as u64 {
        return Err(IndexFormatError::SizeMismatch {
            expected,
            actual: bytes.len() as u64,
        });
    }

    let model_start = IndexHeader::SIZE;
    let model_end = model_start + header.model_id_len as usize;
    let model_id = std::str::from_utf8(&bytes[model_start..model_end])
        .map_err(|_| IndexFormatError::InvalidModelId)?
        .to_string();

    let vectors = bytes[model_end..content.len()]
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    Ok(DecodedIndex {
        header,
        model_id,
        vectors,
    })
}
