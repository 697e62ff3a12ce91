
//! Tests whether the square ring of pixels at a given
//! Chebyshev distance around a pixel contains any content.

use crate::rgba_image::OpacityImage;


/// How a ring that crosses the image border is scanned.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum EdgeMode {
    /// Visit the complete perimeter of the ring in image coordinates,
    /// skipping positions outside of the image.
    /// A ring at distance zero is the centre pixel itself.
    Clamped,

    /// Scan the ring over flat, row-major pixel indices,
    /// which is how the first generation of these images was produced.
    /// Rows that leave the image at the left or right continue
    /// on the adjacent row at the opposite side. Beyond that,
    /// the bottom right corner of the ring is never visited,
    /// the first pixel of the image is never reported,
    /// segments that would start before the first pixel are skipped entirely,
    /// and a ring at distance zero is always empty.
    /// Use this to reproduce existing images bit by bit.
    Wrapping,
}

impl Default for EdgeMode {
    fn default() -> Self {
        EdgeMode::Clamped
    }
}


/// Returns true if any pixel at Chebyshev distance `distance`
/// from `(x, y)` is opaque. Positions outside the image are never read.
#[inline]
pub fn probe_ring(image: &impl OpacityImage, x: u32, y: u32, distance: u32, mode: EdgeMode) -> bool {
    match mode {
        EdgeMode::Clamped => probe_clamped(image, x, y, distance),
        EdgeMode::Wrapping => {
            let index = image.width() as i64 * y as i64 + x as i64;
            probe_wrapping(image, index, distance)
        }
    }
}

fn probe_clamped(image: &impl OpacityImage, x: u32, y: u32, distance: u32) -> bool {
    let (x, y, d) = (x as i64, y as i64, distance as i64);
    let (width, height) = (image.width() as i64, image.height() as i64);

    if d == 0 {
        return check_coordinates(x, y, width, height) && image.is_opaque(x as u32, y as u32);
    }

    // only the part of the ring inside the image is visited
    let (left, right) = ((x - d).max(0), (x + d).min(width - 1));
    let (top, bottom) = ((y - d + 1).max(0), (y + d - 1).min(height - 1));

    // top and bottom rows, corners included
    for &row in &[y - d, y + d] {
        if row >= 0 && row < height && (left ..= right).any(|px| image.is_opaque(px as u32, row as u32)) {
            return true;
        }
    }

    // left and right columns, corners excluded
    for &column in &[x - d, x + d] {
        if column >= 0 && column < width && (top ..= bottom).any(|py| image.is_opaque(column as u32, py as u32)) {
            return true;
        }
    }

    false
}

fn probe_wrapping(image: &impl OpacityImage, index: i64, distance: u32) -> bool {
    let width = image.width() as i64;
    let len = width * image.height() as i64;
    let d = distance as i64;
    let row = d * width;

    let opaque = |i: i64| {
        i > 0 && i < len && image.is_opaque((i % width) as u32, (i / width) as u32)
    };

    // a segment is a half-open range over flat indices
    let segments = [
        (index - row - d, index - row + d, 1),     // top left to top right
        (index + row - d, index + row + d, 1),     // bottom left to bottom right
        (index - row - d, index + row - d, width), // top left to bottom left
        (index - row + d, index + row + d, width), // top right to bottom right
    ];

    segments.iter().any(|&(start, end, step)| {
        // an unsigned start below zero wraps around past the end
        start >= 0 && step > 0 && (start .. end).step_by(step as usize).any(|i| opaque(i))
    })
}

/// Rings at this distance and beyond never contain a pixel that a
/// smaller ring would not have found first, so searching further is pointless.
pub fn search_limit(image: &impl OpacityImage, mode: EdgeMode) -> u32 {
    let (width, height) = (image.width() as u64, image.height() as u64);

    let limit = match mode {
        EdgeMode::Clamped => width.max(height),

        // every segment starts outside the image once `distance * (width - 1)`
        // exceeds the pixel count, a single column keeps scanning itself
        EdgeMode::Wrapping if width > 1 => width * height / (width - 1) + 1,
        EdgeMode::Wrapping => width * height + 1,
    };

    limit.min(u32::MAX as u64) as u32
}

#[inline]
fn check_coordinates(x: i64, y: i64, width: i64, height: i64) -> bool {
    x >= 0 && y >= 0 && x < width && y < height
}
