//! # SIS image library
//!
//! Reads and writes `.SIS` image files created by BECAnalyze: a fixed
//! 256-byte header followed by 16-bit grayscale pixels, one or more frames.
//!
//! This library is organized into several modules:
//! - `utils`: Error handling
//! - `codec`: The header layout and pixel element conversions
//! - `image`: The [`Image`] type with file decoding and encoding
//!
//! Header fields and pixels are stored in the byte order of the host that
//! wrote the file. Files are not converted between endiannesses.
//!
//! ```no_run
//! use sis::Image;
//!
//! let image = Image::from_path("capture.sis")?;
//! let frames = image.frames()?;
//! println!("{} frame(s) of {:?}", frames.len_of(ndarray::Axis(0)), image.dimensions());
//! image.save_to("copy.sis")?;
//! # Ok::<(), sis::SisError>(())
//! ```

// Re-export commonly used types at the crate root
pub use utils::error::{Result, SisError};

pub mod utils {
    pub mod error;
}

pub mod codec {
    pub mod header;
    pub mod pixel;
}

pub mod image;

// Public API exports
pub use crate::codec::header::{HEADER_SIZE, Header, PIXEL_DEPTH, SIS_MAGIC, read_header};
pub use crate::codec::pixel::{Pixel, ToPixel};
pub use crate::image::Image;

// Constants
pub const SIS_VERSION: &str = env!("CARGO_PKG_VERSION");
