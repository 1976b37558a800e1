// src/codec/header.rs

//! The fixed 256-byte SIS header.
//!
//! ```text
//! offset  0..4    ".SIS" (ascii)
//! offset  4..8    width  (u32)
//! offset  8..12   height (u32)
//! offset 12..16   depth  (u32, bytes per pixel, always 2)
//! offset 16..256  unused
//! ```
//!
//! All fields use the byte order of the host. Files are therefore only
//! exchangeable between hosts of matching endianness, which is how the
//! files written by BECAnalyze behave.

use crate::utils::error::{Result, SisError};
use byteorder::{ByteOrder, NativeEndian, ReadBytesExt};
use log::debug;
use std::io::{Cursor, Read, Seek, SeekFrom};

/// The 4-byte magic at the start of every SIS file.
pub const SIS_MAGIC: [u8; 4] = *b".SIS";

/// Total size of the header in bytes. Pixel data starts at this offset.
pub const HEADER_SIZE: usize = 256;

/// Below this many bytes a stream is rejected with
/// [`SisError::HeaderTooShort`]; from here up to [`HEADER_SIZE`] it is
/// [`SisError::HeaderTruncated`].
pub const HEADER_MIN_LEN: usize = HEADER_SIZE / 8;

/// Bytes per pixel. Only 16-bit data is supported.
pub const PIXEL_DEPTH: u32 = 2;

/// Length of the populated part of the header (magic + three u32 fields).
const FIELDS_LEN: usize = 16;

/// Decoded header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    /// Bytes per pixel.
    pub depth: u32,
}

impl Header {
    /// Creates a header for 16-bit data.
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Header {
            width,
            height,
            depth: PIXEL_DEPTH,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Serializes the header into its 256-byte on-disk form.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[..4].copy_from_slice(&SIS_MAGIC);
        NativeEndian::write_u32(&mut buf[4..8], self.width);
        NativeEndian::write_u32(&mut buf[8..12], self.height);
        NativeEndian::write_u32(&mut buf[12..FIELDS_LEN], self.depth);
        buf
    }

    /// Parses a header from the leading bytes of a file.
    ///
    /// All 256 bytes must be present. Only the first 16 carry information;
    /// the padding contents are never inspected.
    pub fn parse(bytes: &[u8]) -> Result<Header> {
        if bytes.len() < HEADER_MIN_LEN {
            return Err(SisError::HeaderTooShort {
                len: bytes.len(),
                min: HEADER_MIN_LEN,
            });
        }
        if bytes.len() < HEADER_SIZE {
            return Err(SisError::HeaderTruncated {
                len: bytes.len(),
                expected: HEADER_SIZE,
            });
        }

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[..4]);
        if magic != SIS_MAGIC {
            return Err(SisError::NotSisFile { magic });
        }

        let mut cursor = Cursor::new(&bytes[4..FIELDS_LEN]);
        let width = cursor.read_u32::<NativeEndian>()?;
        let height = cursor.read_u32::<NativeEndian>()?;
        let depth = cursor.read_u32::<NativeEndian>()?;

        #[cfg(feature = "debug-logging")]
        log::trace!("SIS header fields: width={width} height={height} depth={depth}");

        if depth != PIXEL_DEPTH {
            return Err(SisError::UnsupportedPixelDepth {
                bits: u64::from(depth) * 8,
            });
        }

        Ok(Header {
            width,
            height,
            depth,
        })
    }

    /// Reads and parses the header from the start of `reader`, wherever it
    /// is currently positioned.
    pub fn read_from<R: Read + Seek>(reader: &mut R) -> Result<Header> {
        reader.seek(SeekFrom::Start(0))?;
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        reader.by_ref().take(HEADER_SIZE as u64).read_to_end(&mut bytes)?;
        debug!("read {} header bytes", bytes.len());
        Header::parse(&bytes)
    }
}

/// Returns the `(width, height)` declared by the header of `reader`.
pub fn read_header<R: Read + Seek>(reader: &mut R) -> Result<(u32, u32)> {
    Header::read_from(reader).map(|header| header.dimensions())
}
