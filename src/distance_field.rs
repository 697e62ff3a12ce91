
use crate::rgba_image::{OpacityImage, PixelBuffer, CHANNELS};
use crate::ring::{probe_ring, search_limit, EdgeMode};
use crate::error::Result;


/// Rings up to, but excluding, this distance are searched.
pub const DEFAULT_MAX_DISTANCE: u32 = 20;

/// Alpha of a transparent pixel directly next to content.
pub const DEFAULT_INTENSITY: u8 = 0x60;

/// Alpha of every opaque pixel.
pub const DEFAULT_INTERIOR_ALPHA: u8 = 0x80;

/// Colour of every pixel of a distance field, only alpha carries information.
pub const FIELD_COLOR: [u8; 3] = [0xff, 0xff, 0xff];


#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct DistanceFieldSettings {
    /// Exclusive upper bound of the ring distances searched.
    pub max_distance: u32,

    /// Scales the falloff of transparent pixels.
    pub intensity: u8,

    /// Flat alpha assigned to opaque pixels.
    pub interior_alpha: u8,

    /// How rings crossing the image border are scanned.
    pub edge_mode: EdgeMode,
}

impl Default for DistanceFieldSettings {
    fn default() -> Self {
        DistanceFieldSettings {
            max_distance: DEFAULT_MAX_DISTANCE,
            intensity: DEFAULT_INTENSITY,
            interior_alpha: DEFAULT_INTERIOR_ALPHA,
            edge_mode: EdgeMode::default(),
        }
    }
}

impl DistanceFieldSettings {
    pub fn with_max_distance(self, max_distance: u32) -> Self {
        DistanceFieldSettings { max_distance, ..self }
    }

    pub fn with_intensity(self, intensity: u8) -> Self {
        DistanceFieldSettings { intensity, ..self }
    }

    pub fn with_interior_alpha(self, interior_alpha: u8) -> Self {
        DistanceFieldSettings { interior_alpha, ..self }
    }

    pub fn with_edge_mode(self, edge_mode: EdgeMode) -> Self {
        DistanceFieldSettings { edge_mode, ..self }
    }
}


/// What the distance field knows about a single pixel.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum FalloffClass {
    /// The pixel itself is opaque.
    Interior,

    /// The pixel is transparent. Contains the smallest ring distance
    /// with opaque content, if there is one within the search radius.
    Exterior { nearest_ring: Option<u32> },
}

impl FalloffClass {
    /// The alpha written into the distance field for this pixel.
    pub fn alpha(self, settings: &DistanceFieldSettings) -> u8 {
        match self {
            FalloffClass::Interior => settings.interior_alpha,
            FalloffClass::Exterior { nearest_ring: Some(ring) } => falloff_alpha(ring, settings),
            FalloffClass::Exterior { nearest_ring: None } => 0,
        }
    }
}

/// Find out whether the pixel is opaque, or else how far away the nearest content is.
pub fn classify(image: &impl OpacityImage, x: u32, y: u32, settings: &DistanceFieldSettings) -> FalloffClass {
    if image.is_opaque(x, y) {
        return FalloffClass::Interior;
    }

    // rings past the search limit cannot find anything new
    let searched = settings.max_distance.min(search_limit(image, settings.edge_mode));

    let nearest_ring = (0 .. searched)
        .find(|&distance| probe_ring(image, x, y, distance, settings.edge_mode));

    FalloffClass::Exterior { nearest_ring }
}

/// Linear falloff from `intensity` at ring zero towards zero at `max_distance`,
/// truncated to a byte.
#[inline]
pub fn falloff_alpha(ring: u32, settings: &DistanceFieldSettings) -> u8 {
    if ring >= settings.max_distance {
        return 0;
    }

    let ratio = (settings.max_distance - ring) as f32 / settings.max_distance as f32;
    (ratio * settings.intensity as f32) as u8
}


/// Compute the alpha-only distance field of the image.
/// Every pixel is white, opaque source pixels get the interior alpha
/// and transparent ones fall off with the distance to the nearest content.
pub fn compute_distance_field(
    image: &(impl OpacityImage + Sync), settings: &DistanceFieldSettings
) -> Result<PixelBuffer> {
    let (width, height) = (image.width(), image.height());
    let [r, g, b] = FIELD_COLOR;

    let mut field = PixelBuffer::filled(width, height, [r, g, b, 0x00])?;
    let stride = field.row_stride();

    let compute_row = |y: usize, row: &mut [u8]| {
        for (x, pixel) in (0..width).zip(row.chunks_exact_mut(CHANNELS)) {
            pixel[3] = classify(image, x, y as u32, settings).alpha(settings);
        }
    };

    #[cfg(feature = "parallel")] {
        use rayon::prelude::*;
        field.bytes_mut().par_chunks_mut(stride).enumerate()
            .for_each(|(y, row)| compute_row(y, row));
    }

    #[cfg(not(feature = "parallel"))] {
        field.bytes_mut().chunks_mut(stride).enumerate()
            .for_each(|(y, row)| compute_row(y, row));
    }

    Ok(field)
}
