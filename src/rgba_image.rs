
use crate::error::{Error, Result};

/// Every buffer in this crate is interleaved `r, g, b, a`.
pub const CHANNELS: usize = 4;

/// Represents an image in which each pixel is either set or unset.
/// All probes read images only through this trait.
/// It is implemented for byte slices, owned buffers,
/// and `image` buffers if the feature `image_io` is activated.
pub trait OpacityImage {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Whether the pixel counts as content. See [`is_set`].
    fn is_opaque(&self, x: u32, y: u32) -> bool;
}

/// A pixel is set if any of its colour channels is non-zero.
/// Alpha is ignored, so coloured but fully transparent pixels are set too.
#[inline]
pub fn is_set(pixel: &[u8]) -> bool {
    pixel[0] != 0 || pixel[1] != 0 || pixel[2] != 0
}

/// Number of bytes an rgba image of this size occupies,
/// or `None` if that number does not fit into a `usize`.
#[inline]
pub fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)?.checked_mul(CHANNELS)
}

fn check_len(width: u32, height: u32, len: usize) -> Result<()> {
    match byte_len(width, height) {
        Some(expected) if expected == len => Ok(()),
        _ => Err(Error::InvalidDimensions { width, height, len }),
    }
}


/// A read-only rgba image borrowed from a slice of bytes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RgbaByteImage<'b> {
    width: u32,
    height: u32,

    /// A row-major image slice with four bytes per pixel.
    buffer: &'b [u8],
}

impl<'b> RgbaByteImage<'b> {
    /// View the slice as an rgba image,
    /// failing if its length is not exactly `width * height * 4`.
    pub fn from_slice(width: u32, height: u32, buffer: &'b [u8]) -> Result<Self> {
        check_len(width, height, buffer.len())?;
        Ok(RgbaByteImage { width, height, buffer })
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn as_bytes(&self) -> &'b [u8] {
        self.buffer
    }

    /// Copy the pixels into an owned buffer.
    pub fn to_buffer(&self) -> PixelBuffer {
        PixelBuffer { width: self.width, height: self.height, bytes: self.buffer.to_vec() }
    }

    /// The four bytes of the pixel at the specified position.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &'b [u8] {
        let start = self.flatten_index(x, y) * CHANNELS;
        &self.buffer[start .. start + CHANNELS]
    }

    /// Row-major pixel index, not byte index.
    #[inline]
    pub fn flatten_index(&self, x: u32, y: u32) -> usize {
        self.width as usize * y as usize + x as usize
    }
}

impl OpacityImage for RgbaByteImage<'_> {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn is_opaque(&self, x: u32, y: u32) -> bool {
        is_set(self.pixel(x, y))
    }
}


/// An owned rgba image, as produced by every operation of this crate.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Take ownership of the bytes,
    /// failing if their length is not exactly `width * height * 4`.
    pub fn from_vec(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        check_len(width, height, bytes.len())?;
        Ok(PixelBuffer { width, height, bytes })
    }

    /// Create an image with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: [u8; CHANNELS]) -> Result<Self> {
        let len = byte_len(width, height)
            .ok_or(Error::InvalidDimensions { width, height, len: 0 })?;

        let bytes = pixel.iter().copied().cycle().take(len).collect();
        Ok(PixelBuffer { width, height, bytes })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Borrow this buffer as the input of another operation.
    #[inline]
    pub fn as_image(&self) -> RgbaByteImage<'_> {
        RgbaByteImage { width: self.width, height: self.height, buffer: &self.bytes }
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; CHANNELS] {
        let start = (self.width as usize * y as usize + x as usize) * CHANNELS;
        let mut pixel = [0; CHANNELS];
        pixel.copy_from_slice(&self.bytes[start .. start + CHANNELS]);
        pixel
    }

    /// Bytes per row, never zero so that it can be used as a chunk size.
    #[inline]
    pub(crate) fn row_stride(&self) -> usize {
        (self.width as usize * CHANNELS).max(1)
    }

    #[inline]
    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    #[inline]
    pub(crate) fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.bytes.chunks_exact_mut(CHANNELS)
    }
}

impl OpacityImage for PixelBuffer {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn is_opaque(&self, x: u32, y: u32) -> bool {
        self.as_image().is_opaque(x, y)
    }
}


/// Read `image` rgba buffers directly.
#[cfg(feature = "image_io")]
pub mod piston_image {
    use image::{ImageBuffer, Rgba};
    use super::{is_set, OpacityImage};

    impl<C> OpacityImage for ImageBuffer<Rgba<u8>, C>
        where C: std::ops::Deref<Target = [u8]>
    {
        fn width(&self) -> u32 {
            ImageBuffer::width(self)
        }

        fn height(&self) -> u32 {
            ImageBuffer::height(self)
        }

        fn is_opaque(&self, x: u32, y: u32) -> bool {
            is_set(&self.get_pixel(x, y).0)
        }
    }
}
