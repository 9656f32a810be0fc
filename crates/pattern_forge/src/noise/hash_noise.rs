//! White noise straight from the coordinate hash.
use crate::color::Color;
use crate::geom::Rect;
use crate::hash::hash_float;
use crate::pattern::{ColorModel, Configurable, Pattern, PatternBase, PatternOption};

/// `sample(x, y) = gray(hash_float(x, y, seed))`.
#[derive(Clone, Debug, Default)]
pub struct HashNoise {
    base: PatternBase,
    seed: u64,
}

impl HashNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            base: PatternBase::default(),
            seed,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }
}

impl Configurable for HashNoise {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Seed(s) => {
                self.seed = *s;
                true
            }
            other => self.base.apply(other),
        }
    }
}

impl Pattern for HashNoise {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn color_model(&self) -> ColorModel {
        ColorModel::Gray
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        Color::gray_f(hash_float(x, y, self.seed))
    }
}
