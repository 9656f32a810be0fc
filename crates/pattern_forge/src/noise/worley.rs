//! Cellular (Worley) noise.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::{Color, Palette};
use crate::geom::Rect;
use crate::hash::{hash_float, hash_index, hash_point};
use crate::pattern::{ColorModel, Configurable, Pattern, PatternBase, PatternOption};

pub const DEFAULT_WORLEY_FREQUENCY: f64 = 1.0 / 16.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum WorleyMetric {
    #[default]
    Euclidean,
    Manhattan,
    Chebyshev,
}

impl WorleyMetric {
    #[inline]
    pub fn distance(self, dx: f64, dy: f64) -> f64 {
        match self {
            WorleyMetric::Euclidean => dx.hypot(dy),
            WorleyMetric::Manhattan => dx.abs() + dy.abs(),
            WorleyMetric::Chebyshev => dx.abs().max(dy.abs()),
        }
    }
}

/// Which quantity of the feature search is emitted.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum WorleyOutput {
    /// Distance to the nearest feature point.
    #[default]
    F1,
    /// Distance to the second nearest feature point.
    F2,
    /// `F2 − F1`: near zero along cell borders.
    F2MinusF1,
    /// Identity of the nearest feature's cell.
    CellId,
}

/// Result of the 3×3 feature search, in cell units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorleySample {
    pub f1: f64,
    pub f2: f64,
    pub cell: (i32, i32),
}

/// Worley noise: one jittered feature point per lattice cell.
///
/// Distances are measured in cell units and emitted as gray `clamp(d, 0, 1)`.
#[derive(Clone, Debug)]
pub struct WorleyNoise {
    base: PatternBase,
    seed: u64,
    frequency: f64,
    jitter: f64,
    metric: WorleyMetric,
    output: WorleyOutput,
    palette: Option<Palette>,
}

impl WorleyNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            base: PatternBase::default(),
            seed,
            frequency: DEFAULT_WORLEY_FREQUENCY,
            jitter: 1.0,
            metric: WorleyMetric::Euclidean,
            output: WorleyOutput::F1,
            palette: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = checked_frequency(frequency);
        self
    }

    /// Feature displacement inside the cell, clamped to `[0, 1]`.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = if jitter.is_nan() {
            1.0
        } else {
            jitter.clamp(0.0, 1.0)
        };
        self
    }

    pub fn with_metric(mut self, metric: WorleyMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_output(mut self, output: WorleyOutput) -> Self {
        self.output = output;
        self
    }

    /// Colors for [`WorleyOutput::CellId`]; picked by hashing the cell.
    pub fn with_palette(mut self, palette: impl Into<Palette>) -> Self {
        self.palette = Some(palette.into());
        self
    }

    /// Nearest and second nearest feature distances at a continuous point given in
    /// cell units.
    pub fn search(&self, px: f64, py: f64) -> WorleySample {
        let cx = px.floor() as i64;
        let cy = py.floor() as i64;
        let mut f1 = f64::INFINITY;
        let mut f2 = f64::INFINITY;
        let mut best = (cx as i32, cy as i32);
        for dy in -1..=1i64 {
            for dx in -1..=1i64 {
                let gx = (cx + dx) as i32;
                let gy = (cy + dy) as i32;
                let (jx, jy) = hash_point(gx, gy, self.seed);
                let fx = (cx + dx) as f64 + self.jitter * jx;
                let fy = (cy + dy) as f64 + self.jitter * jy;
                let d = self.metric.distance(px - fx, py - fy);
                if d < f1 {
                    f2 = f1;
                    f1 = d;
                    best = (gx, gy);
                } else if d < f2 {
                    f2 = d;
                }
            }
        }
        WorleySample { f1, f2, cell: best }
    }
}

fn checked_frequency(frequency: f64) -> f64 {
    if frequency.is_finite() && frequency > 0.0 {
        frequency
    } else {
        warn!(
            "Worley frequency {} replaced by default {}.",
            frequency, DEFAULT_WORLEY_FREQUENCY
        );
        DEFAULT_WORLEY_FREQUENCY
    }
}

impl Configurable for WorleyNoise {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Seed(s) => self.seed = *s,
            PatternOption::Frequency(f) => self.frequency = checked_frequency(*f),
            PatternOption::Palette(colors) => self.palette = Some(Palette::new(colors.clone())),
            other => return self.base.apply(other),
        }
        true
    }
}

impl Pattern for WorleyNoise {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn color_model(&self) -> ColorModel {
        match (self.output, &self.palette) {
            (WorleyOutput::CellId, Some(_)) => ColorModel::Paletted,
            _ => ColorModel::Gray,
        }
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let s = self.search(x as f64 * self.frequency, y as f64 * self.frequency);
        match self.output {
            WorleyOutput::F1 => Color::gray_f(s.f1),
            WorleyOutput::F2 => Color::gray_f(s.f2),
            WorleyOutput::F2MinusF1 => Color::gray_f(s.f2 - s.f1),
            WorleyOutput::CellId => match &self.palette {
                Some(p) => p.get_wrapped(hash_index(s.cell.0, s.cell.1, self.seed, p.len())),
                None => Color::gray_f(hash_float(s.cell.0, s.cell.1, self.seed)),
            },
        }
    }
}
