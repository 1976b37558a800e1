// src/codec/pixel.rs

//! Pixel element conversions.
//!
//! SIS pixels are `u16` stored in host byte order. Incoming buffers of any
//! primitive numeric type are converted with a plain `as` cast: integers
//! wrap to their low 16 bits, floats are truncated toward zero and
//! saturate at `0` and `u16::MAX` (NaN becomes `0`).

use crate::utils::error::{Result, SisError};
use byteorder::{ByteOrder, NativeEndian};
use ndarray::{Array, ArrayBase, Data, Dimension};

/// The pixel element type of every SIS image.
pub type Pixel = u16;

/// Truncating conversion into a SIS pixel.
pub trait ToPixel: Copy {
    fn to_pixel(self) -> Pixel;
}

macro_rules! impl_to_pixel {
    ($($t:ty),* $(,)?) => {
        $(
            impl ToPixel for $t {
                #[inline]
                fn to_pixel(self) -> Pixel {
                    self as Pixel
                }
            }
        )*
    };
}

impl_to_pixel!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

impl ToPixel for bool {
    #[inline]
    fn to_pixel(self) -> Pixel {
        Pixel::from(self)
    }
}

/// Converts every element of `array` with [`ToPixel::to_pixel`].
pub fn cast_pixels<S, D>(array: &ArrayBase<S, D>) -> Array<Pixel, D>
where
    S: Data,
    S::Elem: ToPixel,
    D: Dimension,
{
    array.mapv(ToPixel::to_pixel)
}

/// Decodes a raw pixel section into host-order `u16` values.
pub fn decode_pixels(bytes: &[u8]) -> Result<Vec<Pixel>> {
    let element_size = std::mem::size_of::<Pixel>();
    if bytes.len() % element_size != 0 {
        return Err(SisError::ReshapeMismatch {
            len: bytes.len(),
            expected: format!("a whole number of {element_size}-byte pixels"),
        });
    }
    let mut pixels = vec![0; bytes.len() / element_size];
    NativeEndian::read_u16_into(bytes, &mut pixels);
    Ok(pixels)
}

/// Views pixels as their host-order bytes without copying.
#[inline]
pub fn pixel_bytes(pixels: &[Pixel]) -> &[u8] {
    bytemuck::cast_slice(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_integer_casts_wrap() {
        assert_eq!(70_000u32.to_pixel(), 70_000u32 as u16);
        assert_eq!((-1i32).to_pixel(), u16::MAX);
        assert_eq!(255u8.to_pixel(), 255);
        assert_eq!(true.to_pixel(), 1);
    }

    #[test]
    fn test_float_casts_truncate_and_saturate() {
        assert_eq!(12.9f64.to_pixel(), 12);
        assert_eq!((-3.0f32).to_pixel(), 0);
        assert_eq!(1e9f64.to_pixel(), u16::MAX);
        assert_eq!(f64::NAN.to_pixel(), 0);
    }

    #[test]
    fn test_cast_pixels_keeps_shape() {
        let input = array![[1u8, 2, 3], [4, 5, 6]];
        let out = cast_pixels(&input);
        assert_eq!(out.shape(), &[2, 3]);
        assert_eq!(out, array![[1u16, 2, 3], [4, 5, 6]]);
    }

    #[test]
    fn test_decode_pixels_native_order() {
        let values = [1u16, 0x1234, u16::MAX];
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
        assert_eq!(decode_pixels(&bytes).unwrap(), values);
        assert_eq!(pixel_bytes(&values), bytes.as_slice());
    }

    #[test]
    fn test_decode_pixels_odd_length() {
        let err = decode_pixels(&[0, 1, 2]).unwrap_err();
        assert!(matches!(err, SisError::ReshapeMismatch { len: 3, .. }));
    }
}
