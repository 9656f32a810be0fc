//! Per-pixel tone operations: luminance color map and channel quantization.
use tracing::warn;

use crate::color::{clamp_u8, Color};
use crate::geom::Rect;
use crate::pattern::{ColorModel, Configurable, Pattern, PatternOption, PatternRef};
use crate::primitives::gradient::ColorStops;

/// Maps source luminance through piecewise-linear color stops.
#[derive(Clone, Debug)]
pub struct ColorMap {
    source: PatternRef,
    stops: ColorStops,
}

impl ColorMap {
    pub fn new(source: PatternRef, stops: ColorStops) -> Self {
        Self { source, stops }
    }
}

impl Configurable for ColorMap {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Palette(colors) => {
                self.stops = ColorStops::evenly(colors);
                true
            }
            _ => false,
        }
    }
}

impl Pattern for ColorMap {
    fn bounds(&self) -> Rect {
        self.source.bounds()
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        self.stops.at(self.source.sample(x, y).luminance())
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}

/// Highest level count; above it quantization would no longer be idempotent
/// on 8-bit channels.
pub const MAX_LEVELS: u32 = 256;

/// Reduces each straight color channel to `levels` evenly spaced values; alpha
/// is untouched.
#[derive(Clone, Debug)]
pub struct Quantize {
    source: PatternRef,
    levels: u32,
}

impl Quantize {
    /// `levels` below 2 become 2.
    pub fn new(source: PatternRef, levels: u32) -> Self {
        let clamped = levels.clamp(2, MAX_LEVELS);
        if clamped != levels {
            warn!("Quantize levels {} clamped to {}.", levels, clamped);
        }
        Self {
            source,
            levels: clamped,
        }
    }

    pub fn levels(&self) -> u32 {
        self.levels
    }

    #[inline]
    fn channel(&self, v: u8) -> u8 {
        let steps = (self.levels - 1) as f64;
        let k = (v as f64 / 255.0 * steps).round();
        clamp_u8(k / steps * 255.0)
    }
}

impl Pattern for Quantize {
    fn bounds(&self) -> Rect {
        self.source.bounds()
    }

    fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let c = self.source.sample(x, y);
        Color::new(self.channel(c.r), self.channel(c.g), self.channel(c.b), c.a)
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}
