//! Knoll pattern dithering.
//!
//! Per input color an error-carrying walk picks `N²` palette entries; the list
//! is sorted by luma and indexed by the integer Bayer rank at each pixel.
use std::sync::Arc;

use crate::color::{clamp_u8, Color, Palette};
use crate::dither::plan_cache::PlanCache;
use crate::geom::Rect;
use crate::noise::threshold::{matrix_size_or_default, ThresholdMatrix};
use crate::pattern::{ColorModel, Configurable, Pattern, PatternOption, PatternRef};

pub const DEFAULT_ERROR_MULTIPLIER: f64 = 0.5;

/// Largest Bayer side, giving candidate lists of at most 256 entries.
pub const MAX_KNOLL_SIZE: usize = 16;

/// Builds the luma-sorted candidate list for `target`.
pub fn knoll_plan(palette: &Palette, target: Color, len: usize, multiplier: f64) -> Vec<usize> {
    let t = [target.r as f64, target.g as f64, target.b as f64];
    let mut error = [0.0f64; 3];
    let mut plan = Vec::with_capacity(len);
    for _ in 0..len {
        let attempt = Color::rgb(
            clamp_u8(t[0] + error[0] * multiplier),
            clamp_u8(t[1] + error[1] * multiplier),
            clamp_u8(t[2] + error[2] * multiplier),
        );
        let index = palette.nearest_index(attempt);
        let chosen = palette.colors()[index];
        error[0] += t[0] - chosen.r as f64;
        error[1] += t[1] - chosen.g as f64;
        error[2] += t[2] - chosen.b as f64;
        plan.push(index);
    }
    let colors = palette.colors();
    plan.sort_by(|&a, &b| colors[a].luminance().total_cmp(&colors[b].luminance()));
    plan
}

#[derive(Clone, Debug)]
pub struct KnollDither {
    source: PatternRef,
    palette: Palette,
    matrix: Arc<ThresholdMatrix>,
    multiplier: f64,
    plans: PlanCache<Vec<usize>>,
}

impl KnollDither {
    /// `size` is the Bayer side and the candidate list holds `size²` entries.
    ///
    /// Non-positive sizes use the default of 8. Sizes above
    /// [`MAX_KNOLL_SIZE`] are capped, so `KnollDither::new(src, palette, 64)`
    /// dithers with a 16×16 matrix and 256-entry lists.
    pub fn new(source: PatternRef, palette: impl Into<Palette>, size: i32) -> Self {
        let side = matrix_size_or_default(size).min(MAX_KNOLL_SIZE);
        Self {
            source,
            palette: palette.into(),
            matrix: Arc::new(ThresholdMatrix::bayer(side)),
            multiplier: DEFAULT_ERROR_MULTIPLIER,
            plans: PlanCache::new(),
        }
    }

    /// Error carried into each attempt; the classic value is one half.
    pub fn with_error_multiplier(mut self, multiplier: f64) -> Self {
        if multiplier.is_finite() {
            self.multiplier = multiplier;
            self.plans.clear();
        }
        self
    }

    pub fn plan(&self, target: Color) -> Arc<Vec<usize>> {
        self.plans.get_or_insert_with(target.rgb_key(), || {
            knoll_plan(&self.palette, target, self.matrix.cells(), self.multiplier)
        })
    }
}

impl Configurable for KnollDither {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Palette(colors) => {
                self.palette = Palette::new(colors.clone());
                self.plans.clear();
                true
            }
            _ => false,
        }
    }
}

impl Pattern for KnollDither {
    fn bounds(&self) -> Rect {
        self.source.bounds()
    }

    fn color_model(&self) -> ColorModel {
        ColorModel::Paletted
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let c = self.source.sample(x, y);
        let plan = self.plan(c);
        let index = plan[self.matrix.rank(x, y) as usize];
        self.palette.get_wrapped(index).with_alpha(c.a)
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}
