
//! Derives both output images from one source image.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::rgba_image::{RgbaByteImage, PixelBuffer};
use crate::ring::EdgeMode;
use crate::outline::extract_outline;
use crate::channel::{apply_mask, composite, ChannelMask};
use crate::distance_field::{
    compute_distance_field, DistanceFieldSettings,
    DEFAULT_INTENSITY, DEFAULT_INTERIOR_ALPHA, DEFAULT_MAX_DISTANCE,
};
use crate::error::Result;


/// Prepended to the file name of the distance field output
/// to obtain the file name of the fill output.
pub const FILL_PREFIX: &str = "e_";


#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct PipelineSettings {
    /// Used by both the outline and the distance field.
    pub edge_mode: EdgeMode,

    /// Applied to the source before the outline is added.
    pub fill_mask: ChannelMask,

    pub max_distance: u32,
    pub intensity: u8,
    pub interior_alpha: u8,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        PipelineSettings {
            edge_mode: EdgeMode::default(),
            fill_mask: ChannelMask::RED,
            max_distance: DEFAULT_MAX_DISTANCE,
            intensity: DEFAULT_INTENSITY,
            interior_alpha: DEFAULT_INTERIOR_ALPHA,
        }
    }
}

impl PipelineSettings {
    pub fn with_edge_mode(self, edge_mode: EdgeMode) -> Self {
        PipelineSettings { edge_mode, ..self }
    }

    pub fn with_fill_mask(self, fill_mask: ChannelMask) -> Self {
        PipelineSettings { fill_mask, ..self }
    }

    pub fn distance_field_settings(&self) -> DistanceFieldSettings {
        DistanceFieldSettings {
            max_distance: self.max_distance,
            intensity: self.intensity,
            interior_alpha: self.interior_alpha,
            edge_mode: self.edge_mode,
        }
    }
}


/// Both images derived from a source, plus the outline diagnostics.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DerivedImages {
    /// The masked source combined with its outline.
    pub fill: PixelBuffer,

    /// White pixels with the falloff in the alpha channel.
    pub distance_field: PixelBuffer,

    /// See [`crate::outline::Outline::edge_runs`].
    pub edge_runs: usize,
}

/// The outline of the image, combined with the masked image itself.
/// Returns the fill image and the number of edge runs in the outline.
pub fn compute_fill(image: &RgbaByteImage<'_>, settings: &PipelineSettings) -> Result<(PixelBuffer, usize)> {
    let outline = extract_outline(image, settings.edge_mode)?;
    let masked = apply_mask(image, settings.fill_mask);
    let fill = composite(&masked.as_image(), &outline.mask.as_image())?;
    Ok((fill, outline.edge_runs))
}

pub fn derive_images(image: &RgbaByteImage<'_>, settings: &PipelineSettings) -> Result<DerivedImages> {
    let (width, height) = image.dimensions();
    log::debug!("deriving images from {}x{} source with {:?}", width, height, settings);

    let start = Instant::now();
    let (fill, edge_runs) = compute_fill(image, settings)?;
    log::debug!("outline has {} edge runs", edge_runs);
    log::trace!("fill image took {:?}", start.elapsed());

    let start = Instant::now();
    let distance_field = compute_distance_field(image, &settings.distance_field_settings())?;
    log::trace!("distance field took {:?}", start.elapsed());

    Ok(DerivedImages { fill, distance_field, edge_runs })
}

/// Where the fill image is written, given the path of the distance field:
/// the same directory, with the file name prefixed by [`FILL_PREFIX`].
pub fn fill_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(FILL_PREFIX);

    match output.file_name() {
        Some(file_name) => {
            name.push(file_name);
            output.with_file_name(name)
        },

        None => {
            name.push(output.as_os_str());
            PathBuf::from(name)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{EDGE_PIXEL, INTERIOR_PIXEL};

    fn single_dot() -> PixelBuffer {
        let mut bytes = [0, 0, 0, 0].repeat(9);
        bytes[4 * 4 .. 5 * 4].copy_from_slice(&[255, 40, 30, 200]);
        PixelBuffer::from_vec(3, 3, bytes).unwrap()
    }

    #[test]
    fn single_dot_fill_is_all_outline() {
        let image = single_dot();
        let derived = derive_images(&image.as_image(), &PipelineSettings::default()).unwrap();

        // every pixel is an edge, which covers the red channel of the dot
        assert!(derived.fill.as_bytes().chunks(4).all(|pixel| pixel == EDGE_PIXEL));
        assert_eq!(derived.edge_runs, 1);
        assert_eq!(derived.distance_field.pixel(1, 1), [255, 255, 255, 128]);
        assert_eq!(derived.distance_field.pixel(0, 0), [255, 255, 255, 91]);
    }

    #[test]
    fn fill_keeps_masked_source_off_the_outline() {
        // a filled 3x3 block inside a 7x7 image, surrounded by its outline
        let mut bytes = Vec::new();
        for y in 0..7 {
            for x in 0..7 {
                let inside = (2..5).contains(&x) && (2..5).contains(&y);
                let pixel: [u8; 4] = if inside { [0x81, 0x42, 0x24, 0x10] } else { [0, 0, 0, 0] };
                bytes.extend_from_slice(&pixel);
            }
        }

        let image = PixelBuffer::from_vec(7, 7, bytes).unwrap();
        let (fill, edge_runs) = compute_fill(&image.as_image(), &PipelineSettings::default()).unwrap();

        assert_eq!(fill.pixel(3, 3), [0x81, 0x00, 0x00, 0xff]);
        assert_eq!(fill.pixel(1, 1), EDGE_PIXEL);
        assert_eq!(fill.pixel(0, 0), INTERIOR_PIXEL);

        // rows 1 and 5 are single runs, rows 2 to 4 have a run on each side
        assert_eq!(edge_runs, 2 + 3 * 2);
    }

    #[test]
    fn custom_fill_mask() {
        let image = single_dot();
        let settings = PipelineSettings::default().with_fill_mask(ChannelMask(0x00ff0000));
        let (fill, _) = compute_fill(&image.as_image(), &settings).unwrap();
        assert_eq!(fill.pixel(1, 1), EDGE_PIXEL);
    }

    #[test]
    fn fill_path_prefixes_the_file_name() {
        assert_eq!(fill_path(Path::new("glow.png")), PathBuf::from("e_glow.png"));
        assert_eq!(fill_path(Path::new("out/sprites/glow.png")), PathBuf::from("out/sprites/e_glow.png"));
    }

    #[test]
    fn distance_field_settings_follow_the_pipeline() {
        let settings = PipelineSettings::default().with_edge_mode(EdgeMode::Wrapping);
        let field = settings.distance_field_settings();
        assert_eq!(field.edge_mode, EdgeMode::Wrapping);
        assert_eq!(field.max_distance, 20);
        assert_eq!(field.intensity, 0x60);
        assert_eq!(field.interior_alpha, 0x80);
    }
}
