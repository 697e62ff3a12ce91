//! This crate derives two auxiliary images from an rgba sprite:
//! a "fill" image, which is the red channel of the sprite combined with its outline,
//! and an alpha-only distance field, in which transparent pixels fade out
//! with the distance to the nearest opaque pixel.
//!
//! Distances are not euclidean. They are measured in square rings
//! around each pixel and the search stops at a fixed radius.
//! A pixel counts as opaque if any of its colour channels is non-zero.

pub mod error;
pub mod rgba_image;
pub mod ring;
pub mod outline;
pub mod channel;
pub mod distance_field;
pub mod pipeline;

#[cfg(feature = "image_io")]
pub mod codec;

pub mod prelude {
    pub use crate::{
        compute_outline,
        compute_default_distance_field,
        derive_default_images,
    };

    pub use crate::error::{ Error, Result };

    pub use crate::rgba_image::{
        OpacityImage, RgbaByteImage, PixelBuffer, is_set, CHANNELS
    };

    pub use crate::ring::{ probe_ring, search_limit, EdgeMode };
    pub use crate::outline::{ extract_outline, Outline };
    pub use crate::channel::{ apply_mask, composite, ChannelMask };

    pub use crate::distance_field::{
        compute_distance_field, classify, falloff_alpha,
        DistanceFieldSettings, FalloffClass
    };

    pub use crate::pipeline::{
        derive_images, compute_fill, fill_path,
        PipelineSettings, DerivedImages
    };

    #[cfg(feature = "image_io")]
    pub use crate::codec::{ load_rgba, save_png };
}


use prelude::*;

/// Compute the outline mask of the specified rgba bytes, without wrapping at the borders.
pub fn compute_outline(width: u32, height: u32, rgba: &[u8]) -> Result<Outline> {
    extract_outline(&RgbaByteImage::from_slice(width, height, rgba)?, EdgeMode::default())
}

/// Compute the distance field of the specified rgba bytes with the default settings.
pub fn compute_default_distance_field(width: u32, height: u32, rgba: &[u8]) -> Result<PixelBuffer> {
    let image = RgbaByteImage::from_slice(width, height, rgba)?;
    compute_distance_field(&image, &DistanceFieldSettings::default())
}

/// Compute both the fill image and the distance field of the specified rgba bytes
/// with the default settings.
pub fn derive_default_images(width: u32, height: u32, rgba: &[u8]) -> Result<DerivedImages> {
    derive_images(&RgbaByteImage::from_slice(width, height, rgba)?, &PipelineSettings::default())
}
