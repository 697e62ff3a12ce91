
use crate::rgba_image::{OpacityImage, PixelBuffer, CHANNELS};
use crate::ring::{probe_ring, EdgeMode};
use crate::error::Result;

/// Written for pixels whose opacity differs from their neighbourhood.
pub const EDGE_PIXEL: [u8; CHANNELS] = [0xff, 0xff, 0xff, 0xff];

/// Written for all other pixels. Alpha stays opaque.
pub const INTERIOR_PIXEL: [u8; CHANNELS] = [0x00, 0x00, 0x00, 0xff];


/// The silhouette outline of an image.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Outline {
    /// Same dimensions as the source,
    /// with [`EDGE_PIXEL`] on the outline and [`INTERIOR_PIXEL`] elsewhere.
    pub mask: PixelBuffer,

    /// Number of maximal runs of consecutive edge pixels,
    /// counted in row-major order without breaking at row ends.
    pub edge_runs: usize,
}

/// Mark every pixel whose own opacity differs from
/// whether anything in its immediate ring is opaque.
pub fn extract_outline(image: &impl OpacityImage, mode: EdgeMode) -> Result<Outline> {
    let (width, height) = (image.width(), image.height());
    let mut mask = PixelBuffer::filled(width, height, INTERIOR_PIXEL)?;

    let mut edge_runs = 0;
    let mut inside_run = false;

    let positions = (0..height).flat_map(|y| (0..width).map(move |x| (x, y)));
    for ((x, y), pixel) in positions.zip(mask.pixels_mut()) {
        let is_edge = image.is_opaque(x, y) != probe_ring(image, x, y, 1, mode);

        if is_edge {
            pixel.copy_from_slice(&EDGE_PIXEL);
            if !inside_run {
                edge_runs += 1;
            }
        }

        inside_run = is_edge;
    }

    Ok(Outline { mask, edge_runs })
}
