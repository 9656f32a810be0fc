//! Ordered dithering: shift each channel by a tiled threshold, then snap to the
//! nearest palette color.
use tracing::debug;

use crate::color::{clamp_u8, Color, Palette};
use crate::dither::source::{local_contrast, Threshold, ThresholdSource};
use crate::geom::Rect;
use crate::pattern::{ColorModel, Configurable, Pattern, PatternOption, PatternRef};

/// Default channel spread for a palette: 255 for two colors or fewer,
/// `255 / |palette|` otherwise.
pub fn default_spread(palette_len: usize) -> f64 {
    if palette_len <= 2 {
        255.0
    } else {
        255.0 / palette_len as f64
    }
}

#[derive(Clone, Debug)]
pub struct OrderedDither {
    source: PatternRef,
    palette: Palette,
    kind: ThresholdSource,
    threshold: Threshold,
    spread: Option<f64>,
}

impl OrderedDither {
    pub fn new(source: PatternRef, palette: impl Into<Palette>, kind: ThresholdSource) -> Self {
        let threshold = kind.resolve();
        Self {
            source,
            palette: palette.into(),
            kind,
            threshold,
            spread: None,
        }
    }

    /// Overrides the palette-derived spread.
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread.is_finite().then_some(spread);
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn spread(&self) -> f64 {
        self.spread
            .unwrap_or_else(|| default_spread(self.palette.len()))
    }
}

impl Configurable for OrderedDither {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Palette(colors) => {
                self.palette = Palette::new(colors.clone());
            }
            PatternOption::Seed(seed) => {
                self.kind = self.kind.clone().with_seed(*seed);
                self.threshold = self.kind.resolve();
                debug!(seed, "Dither threshold reseeded.");
            }
            _ => return false,
        }
        true
    }
}

impl Pattern for OrderedDither {
    fn bounds(&self) -> Rect {
        self.source.bounds()
    }

    fn color_model(&self) -> ColorModel {
        ColorModel::Paletted
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let c = self.source.sample(x, y);
        let level = self
            .threshold
            .level(x, y, || local_contrast(self.source.as_ref(), x, y));
        let shift = (level - 0.5) * self.spread();
        let nudged = Color::rgb(
            clamp_u8(c.r as f64 + shift),
            clamp_u8(c.g as f64 + shift),
            clamp_u8(c.b as f64 + shift),
        );
        self.palette.nearest(nudged).with_alpha(c.a)
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}
