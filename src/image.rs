// src/image.rs

//! The in-memory SIS image and its file encoding.

use crate::codec::header::{HEADER_SIZE, Header};
use crate::codec::pixel::{Pixel, ToPixel, cast_pixels, decode_pixels, pixel_bytes};
use crate::utils::error::{Result, SisError};
use log::{debug, warn};
use ndarray::{Array2, Array3, ArrayBase, ArrayD, Data, Dimension, ShapeBuilder};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// A single- or multi-frame 16-bit grayscale image.
///
/// `data` is logically shaped `(frames * height, width)` or
/// `(frames, height, width)`. The image is never modified after it has been
/// built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    width: Option<usize>,
    height: Option<usize>,
    data: Option<ArrayD<Pixel>>,
}

/// Zero counts as unset, matching how files with blank header fields are treated.
#[inline]
fn is_set(dimension: Option<usize>) -> bool {
    matches!(dimension, Some(n) if n != 0)
}

fn header_field(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| SisError::DimensionOverflow { value })
}

impl Image {
    /// Builds an image from an optional pixel buffer and optional dimensions.
    ///
    /// When either dimension is missing (or zero) both are taken from the
    /// trailing two extents of `data`. Nothing is validated here; see
    /// [`Image::is_valid`].
    pub fn new(data: Option<ArrayD<Pixel>>, width: Option<usize>, height: Option<usize>) -> Self {
        let mut image = Image {
            width,
            height,
            data,
        };
        if !is_set(image.width) || !is_set(image.height) {
            image.infer_dimensions();
        }
        image
    }

    /// Builds an image from any numeric array, converting each element with
    /// the truncating [`ToPixel`] cast.
    pub fn from_array<S, D>(data: &ArrayBase<S, D>, width: Option<usize>, height: Option<usize>) -> Self
    where
        S: Data,
        S::Elem: ToPixel,
        D: Dimension,
    {
        Image::new(Some(cast_pixels(data).into_dyn()), width, height)
    }

    /// Builds an image that has dimensions but no pixel data.
    #[inline]
    pub fn from_dimensions(width: usize, height: usize) -> Self {
        Image::new(None, Some(width), Some(height))
    }

    /// Last extent is the width, second-to-last the height. Buffers with
    /// fewer than two dimensions leave both untouched.
    fn infer_dimensions(&mut self) {
        let Some(data) = &self.data else {
            return;
        };
        let shape = data.shape();
        if shape.len() < 2 {
            return;
        }
        self.width = Some(shape[shape.len() - 1]);
        self.height = Some(shape[shape.len() - 2]);
    }

    #[inline]
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Option<usize> {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (Option<usize>, Option<usize>) {
        (self.width, self.height)
    }

    #[inline]
    pub fn data(&self) -> Option<&ArrayD<Pixel>> {
        self.data.as_ref()
    }

    fn require_dimensions(&self) -> Result<(usize, usize)> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Ok((width, height)),
            _ => Err(SisError::MissingDimensions),
        }
    }

    /// True when the image holds exactly one `(height, width)` frame.
    ///
    /// Multi-frame buffers always report false.
    pub fn is_valid(&self) -> bool {
        match (&self.data, self.width, self.height) {
            (Some(data), Some(width), Some(height)) if width != 0 && height != 0 => {
                data.shape() == [height, width].as_slice()
            }
            _ => false,
        }
    }

    /// Number of frames, computed as `(elements / width) / height`.
    ///
    /// The division truncates: a buffer that is not a whole number of
    /// frames reports the complete frames only and a warning is logged.
    pub fn frame_count(&self) -> Result<usize> {
        let data = self.data.as_ref().ok_or(SisError::MissingPixelData)?;
        let (width, height) = self.require_dimensions()?;
        if width == 0 || height == 0 {
            return Err(SisError::ZeroDimension);
        }

        let total_rows = data.len() / width;
        if data.len() % width != 0 || total_rows % height != 0 {
            warn!(
                "{} pixels are not a whole number of {}x{} frames, truncating frame count",
                data.len(),
                width,
                height
            );
        }
        Ok(total_rows / height)
    }

    /// Returns the pixel data reshaped to `(frame_count, height, width)`.
    pub fn frames(&self) -> Result<Array3<Pixel>> {
        let count = self.frame_count()?;
        let data = self.data.as_ref().ok_or(SisError::MissingPixelData)?;
        let (width, height) = self.require_dimensions()?;

        if count * height * width != data.len() {
            return Err(SisError::ReshapeMismatch {
                len: data.len(),
                expected: format!("{count} frame(s) of {height}x{width}"),
            });
        }

        Ok(data.to_shape((count, height, width))?.into_owned())
    }

    /// The 256-byte header describing this image.
    pub fn header(&self) -> Result<[u8; HEADER_SIZE]> {
        let (width, height) = self.require_dimensions()?;
        Ok(Header::new(header_field(width)?, header_field(height)?).encode())
    }

    /// Encodes the image into the complete file contents.
    ///
    /// Pixels are written with every axis of the `(frames, height, width)`
    /// array reversed: columns outermost, then rows, then frames. A single
    /// frame is therefore stored column-major.
    pub fn to_buffer(&self) -> Result<Vec<u8>> {
        let header = self.header()?;
        let frames = self.frames()?;
        let pixels: Vec<Pixel> = frames.reversed_axes().iter().copied().collect();

        let body = pixel_bytes(&pixels);
        let mut buffer = Vec::with_capacity(HEADER_SIZE + body.len());
        buffer.extend_from_slice(&header);
        buffer.extend_from_slice(body);
        debug!(
            "encoded SIS image: {} pixels, {} bytes",
            pixels.len(),
            buffer.len()
        );
        Ok(buffer)
    }

    /// Writes the encoded image to `writer` in a single call.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_buffer()?)?;
        Ok(())
    }

    /// Encodes the image and writes it to `path`, creating or truncating
    /// the file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let buffer = self.to_buffer()?;
        let mut file = File::create(path)?;
        file.write_all(&buffer)?;
        debug!("saved {} bytes to {}", buffer.len(), path.display());
        Ok(())
    }

    /// Decodes an image from a stream. The stream may be positioned
    /// anywhere; the header is always read from offset 0.
    pub fn from_reader<R: Read + Seek>(reader: &mut R) -> Result<Image> {
        let header = Header::read_from(reader)?;
        reader.seek(SeekFrom::Start(HEADER_SIZE as u64))?;

        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let pixels = decode_pixels(&bytes)?;

        let width = header.width as usize;
        let height = header.height as usize;
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(SisError::ReshapeMismatch {
                len: pixels.len(),
                expected: format!("{width}x{height}"),
            });
        }

        // Stored column-major; convert to row-major (height, width).
        let data = Array2::from_shape_vec((height, width).f(), pixels)?
            .as_standard_layout()
            .into_owned();
        debug!("decoded {width}x{height} SIS image from {} bytes", bytes.len());

        Ok(Image::new(Some(data.into_dyn()), Some(width), Some(height)))
    }

    /// Opens `path` and decodes it with [`Image::from_reader`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Image> {
        let mut file = File::open(path.as_ref())?;
        Image::from_reader(&mut file)
    }
}
