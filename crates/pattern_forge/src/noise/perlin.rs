//! Gradient (Perlin-style) and value noise with fBm octaves.
use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::Color;
use crate::geom::Rect;
use crate::hash::hash_float;
use crate::pattern::{ColorModel, Configurable, Pattern, PatternBase, PatternOption};
use crate::primitives::gradient::ColorStops;

pub const DEFAULT_FREQUENCY: f64 = 1.0 / 32.0;
pub const DEFAULT_OCTAVES: u32 = 4;
pub const DEFAULT_PERSISTENCE: f64 = 0.5;
pub const DEFAULT_LACUNARITY: f64 = 2.0;

/// Per-lattice-corner quantity that gets interpolated.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum NoiseBasis {
    /// Random unit gradients, dotted with the offset to the corner.
    #[default]
    Gradient,
    /// Random scalar values in `[-1, 1]`.
    Value,
}

/// Fractal sum of noise octaves.
///
/// Octave `o` samples at `(x, y)·f·L^o` with seed `seed + o` and weight `p^o`;
/// the sum is normalized by the total weight and mapped from `[-1, 1]` to
/// `[0, 1]`. Output is gray, or the color ramp when one is set.
#[derive(Clone, Debug)]
pub struct PerlinNoise {
    base: PatternBase,
    seed: u64,
    frequency: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
    basis: NoiseBasis,
    ramp: Option<ColorStops>,
}

impl PerlinNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            base: PatternBase::default(),
            seed,
            frequency: DEFAULT_FREQUENCY,
            octaves: DEFAULT_OCTAVES,
            persistence: DEFAULT_PERSISTENCE,
            lacunarity: DEFAULT_LACUNARITY,
            basis: NoiseBasis::Gradient,
            ramp: None,
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

    /// Octave count; at least one octave is always evaluated.
    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves.max(1);
        self
    }

    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    pub fn with_basis(mut self, basis: NoiseBasis) -> Self {
        self.basis = basis;
        self
    }

    /// Maps the noise value through color stops instead of gray.
    pub fn with_ramp(mut self, ramp: ColorStops) -> Self {
        self.ramp = Some(ramp);
        self
    }

    /// Noise value in `[0, 1]` at a continuous point.
    pub fn value_at(&self, x: f64, y: f64) -> f64 {
        let mut sum = 0.0;
        let mut weight = 0.0;
        let mut amplitude = 1.0;
        let mut freq = self.frequency;
        for o in 0..self.octaves.max(1) {
            let seed = self.seed.wrapping_add(o as u64);
            let v = match self.basis {
                NoiseBasis::Gradient => gradient_octave(x * freq, y * freq, seed),
                NoiseBasis::Value => value_octave(x * freq, y * freq, seed),
            };
            sum += v * amplitude;
            weight += amplitude;
            amplitude *= self.persistence;
            freq *= self.lacunarity;
        }
        if weight == 0.0 || !sum.is_finite() {
            return 0.5;
        }
        ((sum / weight + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

fn checked_frequency(frequency: f64) -> f64 {
    if frequency.is_finite() && frequency > 0.0 {
        frequency
    } else {
        warn!(
            "Noise frequency {} replaced by default {}.",
            frequency, DEFAULT_FREQUENCY
        );
        DEFAULT_FREQUENCY
    }
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn corner(v: f64) -> i32 {
    v.floor().clamp(i32::MIN as f64, i32::MAX as f64) as i32
}

/// One gradient-noise octave, roughly in `[-0.71, 0.71]`.
fn gradient_octave(x: f64, y: f64, seed: u64) -> f64 {
    let x0 = corner(x);
    let y0 = corner(y);
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;
    let dot = |cx: i32, cy: i32, dx: f64, dy: f64| {
        let a = hash_float(cx, cy, seed) * TAU;
        a.cos() * dx + a.sin() * dy
    };
    let x1 = x0.wrapping_add(1);
    let y1 = y0.wrapping_add(1);
    let n00 = dot(x0, y0, fx, fy);
    let n10 = dot(x1, y0, fx - 1.0, fy);
    let n01 = dot(x0, y1, fx, fy - 1.0);
    let n11 = dot(x1, y1, fx - 1.0, fy - 1.0);
    let u = fade(fx);
    let v = fade(fy);
    let top = n00 + (n10 - n00) * u;
    let bottom = n01 + (n11 - n01) * u;
    top + (bottom - top) * v
}

/// One value-noise octave in `[-1, 1]`.
fn value_octave(x: f64, y: f64, seed: u64) -> f64 {
    let x0 = corner(x);
    let y0 = corner(y);
    let u = fade(x - x0 as f64);
    let v = fade(y - y0 as f64);
    let val = |cx: i32, cy: i32| hash_float(cx, cy, seed) * 2.0 - 1.0;
    let x1 = x0.wrapping_add(1);
    let y1 = y0.wrapping_add(1);
    let top = val(x0, y0) + (val(x1, y0) - val(x0, y0)) * u;
    let bottom = val(x0, y1) + (val(x1, y1) - val(x0, y1)) * u;
    top + (bottom - top) * v
}

impl Configurable for PerlinNoise {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Seed(s) => self.seed = *s,
            PatternOption::Frequency(f) => self.frequency = checked_frequency(*f),
            PatternOption::StartColor(c) => {
                let end = self
                    .ramp
                    .as_ref()
                    .and_then(|r| r.stops().last().map(|s| s.1))
                    .unwrap_or(Color::WHITE);
                self.ramp = Some(ColorStops::two(*c, end));
            }
            PatternOption::EndColor(c) => {
                let start = self
                    .ramp
                    .as_ref()
                    .and_then(|r| r.stops().first().map(|s| s.1))
                    .unwrap_or(Color::BLACK);
                self.ramp = Some(ColorStops::two(start, *c));
            }
            PatternOption::Palette(colors) => self.ramp = Some(ColorStops::evenly(colors)),
            other => return self.base.apply(other),
        }
        true
    }
}

impl Pattern for PerlinNoise {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn color_model(&self) -> ColorModel {
        if self.ramp.is_some() {
            ColorModel::Rgba
        } else {
            ColorModel::Gray
        }
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let v = self.value_at(x as f64, y as f64);
        match &self.ramp {
            Some(ramp) => ramp.at(v),
            None => Color::gray_f(v),
        }
    }
}
