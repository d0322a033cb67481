// src/processing/imaging/crop.rs

//! Center crop to a target aspect ratio.

use image::DynamicImage;
use crate::core::AspectRatio;

/// Crop region in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Whether the region covers the whole `width` × `height` image.
    pub fn is_full(&self, width: u32, height: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == width && self.height == height
    }
}

/// Largest region of a `width` × `height` image matching `ratio`, centered.
///
/// A relatively too wide image loses columns, anything else loses rows.
/// The odd pixel of an uneven margin goes to the right/bottom side.
pub fn center_crop_region(width: u32, height: u32, ratio: &AspectRatio) -> CropRegion {
    let (w, h) = (width as u64, height as u64);
    let (rw, rh) = (ratio.width as u64, ratio.height as u64);

    // w/h > rw/rh without leaving integers
    if w * rh > h * rw {
        let new_width = ((h * rw / rh) as u32).max(1);
        let left = (width - new_width) / 2;
        CropRegion::new(left, 0, new_width, height)
    } else {
        let new_height = ((w * rh / rw) as u32).clamp(1, height);
        let top = (height - new_height) / 2;
        CropRegion::new(0, top, width, new_height)
    }
}

/// Returns a new image center-cropped to `ratio`; `image` is left untouched.
pub fn crop_to_aspect(image: &DynamicImage, ratio: &AspectRatio) -> DynamicImage {
    let region = center_crop_region(image.width(), image.height(), ratio);
    if region.is_full(image.width(), image.height()) {
        return image.clone();
    }
    image.crop_imm(region.x, region.y, region.width, region.height)
}
