
//! Reading source images and writing results, using the `image` crate.

use std::path::Path;

use image::{ColorType, ImageFormat, RgbaImage};

use crate::rgba_image::PixelBuffer;
use crate::error::{Error, Result};


/// Decode any image format supported by `image` and convert it to 8-bit rgba.
pub fn load_rgba(path: impl AsRef<Path>) -> Result<PixelBuffer> {
    let path = path.as_ref();

    let image = image::open(path)
        .map_err(|source| Error::Decode { path: path.to_path_buf(), source })?;

    from_rgba_image(image.into_rgba8())
}

/// Write the buffer as an rgba png, regardless of the file extension.
pub fn save_png(path: impl AsRef<Path>, buffer: &PixelBuffer) -> Result<()> {
    let path = path.as_ref();

    image::save_buffer_with_format(
        path, buffer.as_bytes(), buffer.width(), buffer.height(),
        ColorType::Rgba8, ImageFormat::Png
    )
        .map_err(|source| Error::Encode { path: path.to_path_buf(), source })
}

pub fn from_rgba_image(image: RgbaImage) -> Result<PixelBuffer> {
    let (width, height) = image.dimensions();
    PixelBuffer::from_vec(width, height, image.into_raw())
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temporary_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("outline-field-{}-{}", std::process::id(), name))
    }

    #[test]
    fn png_keeps_every_byte() {
        let bytes: Vec<u8> = (0 .. 5 * 3 * 4).map(|index| (index * 17) as u8).collect();
        let buffer = PixelBuffer::from_vec(5, 3, bytes).unwrap();

        let path = temporary_path("keeps-bytes.png");
        save_png(&path, &buffer).unwrap();
        let loaded = load_rgba(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, buffer);
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let path = temporary_path("does-not-exist.png");
        match load_rgba(&path) {
            Err(Error::Decode { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_directory_is_an_encode_error() {
        let path = temporary_path("no-such-directory").join("out.png");
        let buffer = PixelBuffer::filled(2, 2, [1, 2, 3, 4]).unwrap();
        assert!(matches!(save_png(&path, &buffer), Err(Error::Encode { .. })));
    }

    #[test]
    fn image_buffers_keep_their_layout() {
        let image = RgbaImage::from_fn(3, 2, |x, y| image::Rgba([x as u8, y as u8, 7, 9]));
        let buffer = from_rgba_image(image).unwrap();
        assert_eq!(buffer.pixel(2, 1), [2, 1, 7, 9]);
    }
}
