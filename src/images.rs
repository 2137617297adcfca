// SPDX-License-Identifier: MPL-2.0
//! Loaded-image store and decoding helpers.
//!
//! Images are referenced from the wheel definition by key (the demo
//! uses file paths as keys) and become available asynchronously: the
//! embedding application decodes each reference off the UI thread and
//! inserts the resulting handle, triggering one redraw per completed
//! load. Rendering falls back to plain fills while a key is absent.

use crate::error::{Error, Result};
use iced::widget::image::Handle;
use image_rs::RgbaImage;
use std::collections::HashMap;
use std::f32::consts::TAU;
use std::path::Path;

/// Keyed store of decoded images, filled as loads complete.
#[derive(Debug, Clone, Default)]
pub struct Store {
    images: HashMap<String, Handle>,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, handle: Handle) {
        self.images.insert(key.into(), handle);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Handle> {
        self.images.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }
}

/// How a reference is used on the wheel, which decides its preparation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Usage {
    /// Drawn as-is (icons, the overlay).
    Plain,
    /// Clipped to one wedge of the given angular width before use as a
    /// segment background.
    Sector { angle: f32 },
}

/// Reads and decodes an image reference, preparing it for its usage.
///
/// Blocking; call from a worker thread, not the UI thread.
///
/// # Errors
///
/// Returns [`Error::Image`] when the file cannot be read or decoded.
pub fn load(path: &Path, usage: Usage) -> Result<Handle> {
    let decoded = image_rs::open(path)
        .map_err(|e| Error::Image(format!("{}: {}", path.display(), e)))?;
    let mut rgba = decoded.to_rgba8();
    if let Usage::Sector { angle } = usage {
        mask_sector(&mut rgba, angle);
    }
    Ok(to_handle(rgba))
}

/// Converts decoded pixels into an iced image handle.
#[must_use]
pub fn to_handle(image: RgbaImage) -> Handle {
    let (width, height) = image.dimensions();
    Handle::from_rgba(width, height, image.into_vec())
}

/// Clears the alpha of every pixel outside the wedge `[0, angle)`.
///
/// The image is treated as stretched over the full wheel square, so the
/// wedge apex sits at the image center and angle 0 points along +x.
/// Drawn later with a rotation of the segment's start angle, the
/// remaining pixels cover exactly that segment's sector.
pub fn mask_sector(image: &mut RgbaImage, angle: f32) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        // Normalized position in [-1, 1]² so non-square sources behave
        // like their stretched-to-square rendering.
        let nx = (x as f32 + 0.5 - half_w) / half_w;
        let ny = (y as f32 + 0.5 - half_h) / half_h;
        let inside_disc = nx * nx + ny * ny <= 1.0;
        let theta = ny.atan2(nx).rem_euclid(TAU);
        if !(inside_disc && theta < angle) {
            pixel.0[3] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn opaque_square(side: u32) -> RgbaImage {
        RgbaImage::from_pixel(side, side, image_rs::Rgba([200, 100, 50, 255]))
    }

    fn alpha_at(image: &RgbaImage, x: u32, y: u32) -> u8 {
        image.get_pixel(x, y).0[3]
    }

    #[test]
    fn store_serves_inserted_handles() {
        let mut store = Store::new();
        assert!(!store.contains("wheel-overlay"));
        store.insert("wheel-overlay", to_handle(opaque_square(4)));
        assert!(store.contains("wheel-overlay"));
        assert!(store.get("wheel-overlay").is_some());
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn quarter_mask_keeps_only_the_first_quadrant() {
        let mut image = opaque_square(64);
        mask_sector(&mut image, PI / 2.0);
        // +x+y quadrant (screen-space down-right) stays opaque.
        assert_eq!(alpha_at(&image, 48, 48), 255);
        // The other three quadrants are cleared.
        assert_eq!(alpha_at(&image, 16, 48), 0);
        assert_eq!(alpha_at(&image, 48, 16), 0);
        assert_eq!(alpha_at(&image, 16, 16), 0);
    }

    #[test]
    fn full_circle_mask_keeps_the_disc_and_clears_corners() {
        let mut image = opaque_square(64);
        mask_sector(&mut image, TAU);
        assert_eq!(alpha_at(&image, 32, 32), 255);
        assert_eq!(alpha_at(&image, 0, 0), 0);
        assert_eq!(alpha_at(&image, 63, 63), 0);
    }

    #[test]
    fn mask_scales_with_aspect_ratio() {
        // A wide image is stretched onto the square wheel, so the mask
        // must follow normalized, not pixel, angles.
        let mut image = RgbaImage::from_pixel(128, 32, image_rs::Rgba([0, 0, 0, 255]));
        mask_sector(&mut image, PI / 2.0);
        assert_eq!(alpha_at(&image, 96, 24), 255);
        assert_eq!(alpha_at(&image, 96, 8), 0);
    }

    #[test]
    fn load_reports_missing_file() {
        let result = load(Path::new("/nonexistent/wheel.png"), Usage::Plain);
        assert!(matches!(result, Err(Error::Image(_))));
    }
}
