
#[cfg(feature = "image_io")]
use std::path::PathBuf;

/// Everything that can go wrong while deriving images.
/// Probes that leave the image are not errors,
/// they simply find nothing at that position.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The byte buffer does not hold exactly `width * height * 4` bytes,
    /// or that product does not fit into memory.
    #[error("buffer of {len} bytes does not describe a {width}x{height} rgba image")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    /// Two images which must be combined pixel by pixel differ in size.
    #[error("cannot combine a {}x{} image with a {}x{} image", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch { left: (u32, u32), right: (u32, u32) },

    #[cfg(feature = "image_io")]
    #[error("failed to load image {}", .path.display())]
    Decode { path: PathBuf, #[source] source: image::ImageError },

    #[cfg(feature = "image_io")]
    #[error("failed to write image {}", .path.display())]
    Encode { path: PathBuf, #[source] source: image::ImageError },
}

pub type Result<T> = std::result::Result<T, Error>;
