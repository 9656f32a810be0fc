//! Boundary between patterns and pixel rasters.
//!
//! - [`rasterize`] evaluates a pattern over a rectangle into an [`RgbaImage`].
//! - [`ImagePattern`] turns a decoded raster back into a pattern.
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use tracing::debug;

use crate::color::Color;
use crate::error::Result;
use crate::geom::Rect;
use crate::pattern::{ColorModel, Pattern};

/// Samples `pattern` at every pixel of `rect`; pixel `(0, 0)` of the image is
/// `rect`'s min corner. Empty rectangles give an empty image.
pub fn rasterize(pattern: &dyn Pattern, rect: Rect) -> RgbaImage {
    let w = rect.width().max(0) as u32;
    let h = rect.height().max(0) as u32;
    let mut img = RgbaImage::new(w, h);
    for (px, py, pixel) in img.enumerate_pixels_mut() {
        let c = pattern.sample(rect.min_x + px as i32, rect.min_y + py as i32);
        *pixel = c.into();
    }
    img
}

/// A raster image placed with its top-left pixel at `origin`; transparent
/// outside.
#[derive(Clone, Debug)]
pub struct ImagePattern {
    image: RgbaImage,
    origin: (i32, i32),
}

impl ImagePattern {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image,
            origin: (0, 0),
        }
    }

    /// Decodes PNG bytes.
    pub fn decode_png(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
        let image = decoded.to_rgba8();
        debug!(
            width = image.width(),
            height = image.height(),
            "Decoded PNG raster."
        );
        Ok(Self::new(image))
    }

    /// Reads and decodes an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = image::open(path)?.to_rgba8();
        Ok(Self::new(image))
    }

    /// Snapshot of another pattern over `rect`, placed at `rect`'s min corner.
    pub fn from_pattern(pattern: &dyn Pattern, rect: Rect) -> Self {
        Self::new(rasterize(pattern, rect)).with_origin(rect.min_x, rect.min_y)
    }

    pub fn with_origin(mut self, x: i32, y: i32) -> Self {
        self.origin = (x, y);
        self
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl Pattern for ImagePattern {
    fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.0,
            self.origin.1,
            self.origin.0.saturating_add(self.image.width() as i32),
            self.origin.1.saturating_add(self.image.height() as i32),
        )
    }

    fn color_model(&self) -> ColorModel {
        ColorModel::Rgba
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let lx = x as i64 - self.origin.0 as i64;
        let ly = y as i64 - self.origin.1 as i64;
        if lx < 0 || ly < 0 || lx >= self.image.width() as i64 || ly >= self.image.height() as i64
        {
            return Color::TRANSPARENT;
        }
        Color::from(*self.image.get_pixel(lx as u32, ly as u32))
    }

    fn intrinsic_size(&self) -> Option<(i32, i32)> {
        Some((self.image.width() as i32, self.image.height() as i32))
    }
}
