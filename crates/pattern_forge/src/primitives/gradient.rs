//! Color stops and the three gradient shapes.
//!
//! [`ColorStops`] is also what `filter::ColorMap` evaluates, so every gradient in
//! the crate interpolates the same way: piecewise linear in premultiplied
//! 16-bit space, clamped at both ends.
use std::f64::consts::TAU;

use tracing::warn;

use crate::color::{lerp, Color};
use crate::geom::{fmod_positive, Rect};
use crate::pattern::{Configurable, Pattern, PatternBase, PatternOption};

/// Sorted `(t, color)` pairs with `t` in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorStops {
    stops: Vec<(f64, Color)>,
}

impl ColorStops {
    /// Builds stops; positions are clamped to `[0, 1]` and sorted. An empty list
    /// falls back to black to white.
    pub fn new(stops: impl IntoIterator<Item = (f64, Color)>) -> Self {
        let mut stops: Vec<(f64, Color)> = stops
            .into_iter()
            .filter(|(t, _)| t.is_finite())
            .map(|(t, c)| (t.clamp(0.0, 1.0), c))
            .collect();
        if stops.is_empty() {
            warn!("Empty color stop list replaced by black to white.");
            return Self::two(Color::BLACK, Color::WHITE);
        }
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { stops }
    }

    pub fn two(start: Color, end: Color) -> Self {
        Self {
            stops: vec![(0.0, start), (1.0, end)],
        }
    }

    /// Equally spaced stops over `[0, 1]`.
    pub fn evenly(colors: &[Color]) -> Self {
        match colors.len() {
            0 => Self::new(Vec::new()),
            1 => Self::two(colors[0], colors[0]),
            n => Self::new(
                colors
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (i as f64 / (n - 1) as f64, *c)),
            ),
        }
    }

    pub fn stops(&self) -> &[(f64, Color)] {
        &self.stops
    }

    /// Color at `t`; values outside the stop range take the end colors.
    pub fn at(&self, t: f64) -> Color {
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        if t.is_nan() || t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        // First stop strictly greater than t; t lies in [stops[i-1], stops[i]).
        let i = self.stops.partition_point(|(s, _)| *s <= t);
        let (t0, c0) = self.stops[i - 1];
        let (t1, c1) = self.stops[i];
        let span = t1 - t0;
        if span <= 0.0 {
            return c1;
        }
        lerp(c0, c1, (t - t0) / span)
    }
}

impl Default for ColorStops {
    fn default() -> Self {
        Self::two(Color::BLACK, Color::WHITE)
    }
}

/// Applies the stop-related options shared by all gradients.
fn apply_stops(stops: &mut ColorStops, option: &PatternOption) -> bool {
    match option {
        PatternOption::StartColor(c) => {
            let end = stops.stops[stops.stops.len() - 1].1;
            *stops = ColorStops::two(*c, end);
        }
        PatternOption::EndColor(c) => {
            let start = stops.stops[0].1;
            *stops = ColorStops::two(start, *c);
        }
        PatternOption::Palette(colors) => *stops = ColorStops::evenly(colors),
        _ => return false,
    }
    true
}

/// Gradient along a direction across the bounds: `t = 0` at the bounds corner
/// furthest against the direction, `t = 1` at the opposite corner.
#[derive(Clone, Debug)]
pub struct LinearGradient {
    base: PatternBase,
    stops: ColorStops,
    angle: f64,
}

impl LinearGradient {
    pub fn new(stops: ColorStops) -> Self {
        Self {
            base: PatternBase::default(),
            stops,
            angle: 0.0,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    /// Direction in degrees; 0 runs left to right, 90 top to bottom.
    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }
}

impl Configurable for LinearGradient {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Angle(a) => {
                self.angle = *a;
                true
            }
            other => apply_stops(&mut self.stops, other) || self.base.apply(other),
        }
    }
}

impl Pattern for LinearGradient {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let b = self.base.bounds;
        let (c, s) = {
            let r = self.angle.to_radians();
            (r.cos(), r.sin())
        };
        let project = |px: f64, py: f64| px * c + py * s;
        // Pixel centers of the extreme corners.
        let corners = [
            (b.min_x as f64 + 0.5, b.min_y as f64 + 0.5),
            (b.max_x as f64 - 0.5, b.min_y as f64 + 0.5),
            (b.min_x as f64 + 0.5, b.max_y as f64 - 0.5),
            (b.max_x as f64 - 0.5, b.max_y as f64 - 0.5),
        ];
        let (lo, hi) = corners
            .iter()
            .map(|&(px, py)| project(px, py))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let span = hi - lo;
        let t = if span > 0.0 {
            (project(x as f64 + 0.5, y as f64 + 0.5) - lo) / span
        } else {
            0.0
        };
        self.stops.at(t)
    }
}

/// Gradient by distance from the bounds center; `t = 1` at `radius`
/// (default: half the smaller side).
#[derive(Clone, Debug)]
pub struct RadialGradient {
    base: PatternBase,
    stops: ColorStops,
    radius: Option<f64>,
}

impl RadialGradient {
    pub fn new(stops: ColorStops) -> Self {
        Self {
            base: PatternBase::default(),
            stops,
            radius: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = (radius > 0.0).then_some(radius);
        self
    }

    fn radius(&self) -> f64 {
        self.radius.unwrap_or_else(|| {
            let b = self.base.bounds;
            (b.width().min(b.height()) as f64 / 2.0).max(1.0)
        })
    }
}

impl Configurable for RadialGradient {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Radius(r) | PatternOption::MaxRadius(r) => {
                self.radius = (*r > 0).then_some(*r as f64);
                true
            }
            other => apply_stops(&mut self.stops, other) || self.base.apply(other),
        }
    }
}

impl Pattern for RadialGradient {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let (cx, cy) = self.base.bounds.center();
        let d = (x as f64 + 0.5 - cx).hypot(y as f64 + 0.5 - cy);
        self.stops.at(d / self.radius())
    }
}

/// Gradient by polar angle around the bounds center, starting at `angle` and
/// sweeping clockwise (screen coordinates) through one turn.
#[derive(Clone, Debug)]
pub struct ConicGradient {
    base: PatternBase,
    stops: ColorStops,
    angle: f64,
}

impl ConicGradient {
    pub fn new(stops: ColorStops) -> Self {
        Self {
            base: PatternBase::default(),
            stops,
            angle: 0.0,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }
}

impl Configurable for ConicGradient {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Angle(a) => {
                self.angle = *a;
                true
            }
            other => apply_stops(&mut self.stops, other) || self.base.apply(other),
        }
    }
}

impl Pattern for ConicGradient {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let (cx, cy) = self.base.bounds.center();
        let theta = (y as f64 + 0.5 - cy).atan2(x as f64 + 0.5 - cx);
        self.stops
            .at(fmod_positive(theta - self.angle.to_radians(), TAU) / TAU)
    }
}
