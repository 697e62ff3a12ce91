
use crate::rgba_image::{RgbaByteImage, PixelBuffer, CHANNELS};
use crate::error::{Error, Result};


/// Four independent per-channel bitmasks packed as `0xRRGGBBAA`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct ChannelMask(pub u32);

impl ChannelMask {
    /// Keeps red and alpha, clears green and blue.
    pub const RED: ChannelMask = ChannelMask(0xff0000ff);

    /// Keeps every channel unchanged.
    pub const ALL: ChannelMask = ChannelMask(0xffffffff);

    /// The mask bytes in `r, g, b, a` order.
    #[inline]
    pub fn to_bytes(self) -> [u8; CHANNELS] {
        self.0.to_be_bytes()
    }
}

impl Default for ChannelMask {
    fn default() -> Self {
        ChannelMask::RED
    }
}

impl From<u32> for ChannelMask {
    fn from(rgba: u32) -> Self {
        ChannelMask(rgba)
    }
}


/// Bitwise-and every channel of every pixel with the matching byte of the mask.
pub fn apply_mask(image: &RgbaByteImage<'_>, mask: ChannelMask) -> PixelBuffer {
    let mask = mask.to_bytes();
    let mut output = image.to_buffer();

    for pixel in output.pixels_mut() {
        for (value, mask) in pixel.iter_mut().zip(mask.iter()) {
            *value &= mask;
        }
    }

    output
}

/// Bitwise-or two images of the same size, byte by byte.
pub fn composite(left: &RgbaByteImage<'_>, right: &RgbaByteImage<'_>) -> Result<PixelBuffer> {
    if left.dimensions() != right.dimensions() {
        return Err(Error::DimensionMismatch {
            left: left.dimensions(),
            right: right.dimensions(),
        });
    }

    let bytes = left.as_bytes().iter()
        .zip(right.as_bytes())
        .map(|(left, right)| left | right)
        .collect();

    let (width, height) = left.dimensions();
    PixelBuffer::from_vec(width, height, bytes)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn noise(width: u32, height: u32, seed: u32) -> PixelBuffer {
        let mut state = seed | 1;
        let bytes = (0 .. width * height * 4)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state as u8
            })
            .collect();

        PixelBuffer::from_vec(width, height, bytes).unwrap()
    }

    #[test]
    fn mask_bytes_are_unpacked_in_rgba_order() {
        assert_eq!(ChannelMask(0x11223344).to_bytes(), [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(ChannelMask::RED.to_bytes(), [0xff, 0x00, 0x00, 0xff]);
    }

    #[test]
    fn red_mask_keeps_red_and_alpha() {
        let image = PixelBuffer::from_vec(2, 1, vec![10, 20, 30, 40, 255, 255, 255, 0]).unwrap();
        let masked = apply_mask(&image.as_image(), ChannelMask::RED);
        assert_eq!(masked.as_bytes(), &[10, 0, 0, 40, 255, 0, 0, 0]);
    }

    #[test]
    fn partial_bitmasks_apply_per_bit() {
        let image = PixelBuffer::from_vec(1, 1, vec![0b1010_1010, 0xff, 0x0f, 0xf0]).unwrap();
        let masked = apply_mask(&image.as_image(), ChannelMask(0x0f_f0_ff_00));
        assert_eq!(masked.as_bytes(), &[0b0000_1010, 0xf0, 0x0f, 0x00]);
    }

    #[test]
    fn mask_is_idempotent() {
        let image = noise(7, 5, 42);

        for &mask in &[ChannelMask::RED, ChannelMask::ALL, ChannelMask(0), ChannelMask(0x5a3c_f00f)] {
            let once = apply_mask(&image.as_image(), mask);
            let twice = apply_mask(&once.as_image(), mask);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn full_mask_is_identity() {
        let image = noise(4, 4, 7);
        assert_eq!(apply_mask(&image.as_image(), ChannelMask::ALL), image);
    }

    #[test]
    fn composite_is_commutative_and_idempotent() {
        let a = noise(6, 3, 1);
        let b = noise(6, 3, 2);

        let ab = composite(&a.as_image(), &b.as_image()).unwrap();
        let ba = composite(&b.as_image(), &a.as_image()).unwrap();
        assert_eq!(ab, ba);

        assert_eq!(composite(&a.as_image(), &a.as_image()).unwrap(), a);
    }

    #[test]
    fn composite_of_red_fill_and_outline() {
        // red filtered sprite over a mask with one edge pixel
        let red = PixelBuffer::from_vec(2, 2, vec![
            0xff, 0, 0, 0xff,   0x80, 0, 0, 0x00,
            0x00, 0, 0, 0x00,   0x01, 0, 0, 0x7f,
        ]).unwrap();

        let outline = PixelBuffer::from_vec(2, 2, vec![
            0xff, 0xff, 0xff, 0xff,   0x00, 0x00, 0x00, 0xff,
            0x00, 0x00, 0x00, 0xff,   0xff, 0xff, 0xff, 0xff,
        ]).unwrap();

        let fill = composite(&red.as_image(), &outline.as_image()).unwrap();
        assert_eq!(fill.as_bytes(), &[
            0xff, 0xff, 0xff, 0xff,   0x80, 0x00, 0x00, 0xff,
            0x00, 0x00, 0x00, 0xff,   0xff, 0xff, 0xff, 0xff,
        ]);
    }

    #[test]
    fn composite_rejects_different_sizes() {
        let a = noise(2, 3, 1);
        let b = noise(3, 2, 1);

        match composite(&a.as_image(), &b.as_image()) {
            Err(Error::DimensionMismatch { left, right }) => {
                assert_eq!(left, (2, 3));
                assert_eq!(right, (3, 2));
            },

            other => panic!("unexpected {:?}", other),
        }
    }
}
