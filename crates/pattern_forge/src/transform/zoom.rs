//! Integer replication and filtered resampling.
use image::imageops::{self, FilterType};
use image::RgbaImage;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::Color;
use crate::geom::{floor_div, Rect};
use crate::pattern::{ColorModel, Pattern, PatternRef};
use crate::raster::rasterize;

/// Nearest-neighbor magnification by an integer factor.
///
/// Bounds scale by `factor`; `sample(x, y) = src(⌊x / k⌋, ⌊y / k⌋)`.
#[derive(Clone, Debug)]
pub struct SimpleZoom {
    source: PatternRef,
    factor: i32,
}

impl SimpleZoom {
    /// Factors below 1 are raised to 1.
    pub fn new(source: PatternRef, factor: i32) -> Self {
        if factor < 1 {
            warn!("Zoom factor {} raised to 1.", factor);
        }
        Self {
            source,
            factor: factor.max(1),
        }
    }
}

impl Pattern for SimpleZoom {
    fn bounds(&self) -> Rect {
        let b = self.source.bounds();
        let k = self.factor;
        Rect::new(
            b.min_x.saturating_mul(k),
            b.min_y.saturating_mul(k),
            b.max_x.saturating_mul(k),
            b.max_y.saturating_mul(k),
        )
    }

    fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        self.source
            .sample(floor_div(x, self.factor), floor_div(y, self.factor))
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}

/// Resampling filter for [`Scale`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ScaleFilter {
    Nearest,
    /// Area averaging.
    Box,
    #[default]
    CatmullRom,
    /// Three-lobe Lanczos window.
    Lanczos,
}

/// Eagerly resampled copy of the source at a new size.
///
/// The source is rasterized over its bounds and resized once at construction.
/// Output bounds keep the source min corner; outside is transparent.
#[derive(Clone, Debug)]
pub struct Scale {
    image: RgbaImage,
    bounds: Rect,
    model: ColorModel,
}

impl Scale {
    pub fn new(source: &dyn Pattern, width: u32, height: u32, filter: ScaleFilter) -> Self {
        let sb = source.bounds();
        let bounds = Rect::new(
            sb.min_x,
            sb.min_y,
            sb.min_x.saturating_add(width.min(i32::MAX as u32) as i32),
            sb.min_y.saturating_add(height.min(i32::MAX as u32) as i32),
        );
        let model = source.color_model();
        if sb.is_empty() || width == 0 || height == 0 {
            return Self {
                image: RgbaImage::new(0, 0),
                bounds,
                model,
            };
        }
        let src = rasterize(source, sb);
        debug!(
            from_w = src.width(),
            from_h = src.height(),
            to_w = width,
            to_h = height,
            ?filter,
            "Scaling raster."
        );
        let image = match filter {
            ScaleFilter::Nearest => imageops::resize(&src, width, height, FilterType::Nearest),
            ScaleFilter::Box => imageops::thumbnail(&src, width, height),
            ScaleFilter::CatmullRom => {
                imageops::resize(&src, width, height, FilterType::CatmullRom)
            }
            ScaleFilter::Lanczos => imageops::resize(&src, width, height, FilterType::Lanczos3),
        };
        Self {
            image,
            bounds,
            model,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl Pattern for Scale {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn color_model(&self) -> ColorModel {
        self.model
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let lx = x as i64 - self.bounds.min_x as i64;
        let ly = y as i64 - self.bounds.min_y as i64;
        if lx < 0 || ly < 0 || lx >= self.image.width() as i64 || ly >= self.image.height() as i64
        {
            return Color::TRANSPARENT;
        }
        Color::from(*self.image.get_pixel(lx as u32, ly as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::testing::{Coords, PixelMap};
    use crate::primitives::Checker;

    #[test]
    fn zoom_replicates_pixels() {
        let src: PatternRef = Coords {
            bounds: Rect::new(-1, 0, 2, 2),
        }
        .shared();
        let z = SimpleZoom::new(src.clone(), 3);
        assert_eq!(z.bounds(), Rect::new(-3, 0, 6, 6));
        assert_eq!(z.sample(0, 0), src.sample(0, 0));
        assert_eq!(z.sample(2, 2), src.sample(0, 0));
        assert_eq!(z.sample(3, 0), src.sample(1, 0));
        assert_eq!(z.sample(-1, 0), src.sample(-1, 0));
        assert_eq!(z.sample(-3, 5), src.sample(-1, 1));
    }

    #[test]
    fn zoom_factor_is_at_least_one() {
        let src: PatternRef = Coords {
            bounds: Rect::from_size(2, 2),
        }
        .shared();
        let z = SimpleZoom::new(src.clone(), 0);
        assert_eq!(z.bounds(), src.bounds());
        assert_eq!(z.sample(1, 1), src.sample(1, 1));
    }

    #[test]
    fn nearest_scale_doubles_pixels() {
        let src = PixelMap {
            bounds: Rect::from_size(2, 1),
            pixels: vec![((0, 0), Color::RED)],
            fallback: Color::BLUE,
        };
        let s = Scale::new(&src, 4, 2, ScaleFilter::Nearest);
        assert_eq!(s.bounds(), Rect::from_size(4, 2));
        assert_eq!(s.sample(0, 0), Color::RED);
        assert_eq!(s.sample(1, 1), Color::RED);
        assert_eq!(s.sample(2, 0), Color::BLUE);
        assert_eq!(s.sample(3, 1), Color::BLUE);
        assert_eq!(s.sample(4, 0), Color::TRANSPARENT);
    }

    #[test]
    fn box_downscale_averages() {
        let src = Checker::new(Color::BLACK, Color::WHITE)
            .with_space(1)
            .with_bounds(Rect::from_size(8, 8));
        let s = Scale::new(&src, 2, 2, ScaleFilter::Box);
        let c = s.sample(0, 0);
        assert!((120..=135).contains(&c.r), "{c:?}");
    }

    #[test]
    fn constant_source_survives_every_filter() {
        let src = PixelMap {
            bounds: Rect::from_size(5, 5),
            pixels: Vec::new(),
            fallback: Color::rgb(10, 200, 30),
        };
        for filter in [
            ScaleFilter::Nearest,
            ScaleFilter::Box,
            ScaleFilter::CatmullRom,
            ScaleFilter::Lanczos,
        ] {
            let s = Scale::new(&src, 7, 3, filter);
            assert_eq!(s.sample(3, 1), Color::rgb(10, 200, 30), "{filter:?}");
        }
    }

    #[test]
    fn empty_target_is_transparent() {
        let src = Coords {
            bounds: Rect::from_size(4, 4),
        };
        let s = Scale::new(&src, 0, 3, ScaleFilter::Nearest);
        assert_eq!(s.sample(0, 0), Color::TRANSPARENT);
    }
}
