use std::io;
use thiserror::Error;

/// Main error type for the SIS codec.
///
/// The messages of the format variants are matched on by existing
/// consumers: a short header mentions `header`, a bad magic mentions `SIS`
/// and a bad depth mentions `pixel depth`.
#[derive(Error, Debug)]
pub enum SisError {
    /// Fewer bytes were available than the minimum header length.
    #[error("Invalid header: expected at least {min} bytes, got {len}")]
    HeaderTooShort { len: usize, min: usize },
    /// The header is long enough to be recognized but shorter than its
    /// fixed size.
    #[error("Truncated header: expected {expected} bytes, got {len}")]
    HeaderTruncated { len: usize, expected: usize },
    /// The first four bytes are not `.SIS`.
    #[error("Not a SIS file (magic {magic:?})")]
    NotSisFile { magic: [u8; 4] },
    /// The depth field is not 2 bytes per pixel.
    #[error("Unsupported pixel depth ({bits}-bit)")]
    UnsupportedPixelDepth { bits: u64 },
    /// Pixel data does not fit the declared dimensions.
    #[error("Cannot reshape {len} pixel values into {expected}")]
    ReshapeMismatch { len: usize, expected: String },
    /// ndarray rejected a reshape.
    #[error("Cannot reshape pixel data: {0}")]
    Shape(#[from] ndarray::ShapeError),
    /// The image holds no pixel data.
    #[error("Image has no pixel data")]
    MissingPixelData,
    /// Width or height is unset.
    #[error("Image dimensions are not set")]
    MissingDimensions,
    /// Width or height is zero where a division by it is required.
    #[error("Image dimensions must be non-zero")]
    ZeroDimension,
    /// A dimension does not fit the u32 header field.
    #[error("Dimension {value} does not fit in a 32-bit header field")]
    DimensionOverflow { value: usize },
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl SisError {
    /// True for format and validation failures, false for I/O faults.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, SisError::Io(_))
    }
}

/// A specialized `Result` type for SIS operations.
pub type Result<T> = std::result::Result<T, SisError>;
