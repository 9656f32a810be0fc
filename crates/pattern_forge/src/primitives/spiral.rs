//! Golden (Fibonacci) logarithmic spiral drawn by an approximate distance test.
use std::f64::consts::{PI, TAU};

use crate::color::Color;
use crate::geom::{fmod_positive, Rect};
use crate::pattern::option::positive_or;
use crate::pattern::{Configurable, Fill, Pattern, PatternBase, PatternOption};

pub const DEFAULT_SPIRAL_LINE: i32 = 3;

/// Growth rate of the golden spiral: the radius grows by φ every quarter turn.
fn golden_b() -> f64 {
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    2.0 * phi.ln() / PI
}

/// Log spiral `r = e^(bθ)` centered on the bounds center.
///
/// A point is on the curve when `ln(r)/b − θ` is close to a multiple of 2π; the
/// angular error is converted to a perpendicular distance with the spiral's
/// constant pitch angle.
#[derive(Clone, Debug)]
pub struct FibonacciSpiral {
    base: PatternBase,
    line: Fill,
    space: Fill,
    line_size: i32,
    b: f64,
}

impl FibonacciSpiral {
    pub fn new() -> Self {
        Self {
            base: PatternBase::default(),
            line: Fill::Color(Color::BLACK),
            space: Fill::Color(Color::WHITE),
            line_size: DEFAULT_SPIRAL_LINE,
            b: golden_b(),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    pub fn with_line_size(mut self, size: i32) -> Self {
        self.line_size = positive_or("line-size", size, DEFAULT_SPIRAL_LINE);
        self
    }

    pub fn with_colors(mut self, line: impl Into<Fill>, space: impl Into<Fill>) -> Self {
        self.line = line.into();
        self.space = space.into();
        self
    }

    /// Approximate distance from `(dx, dy)` (relative to the center) to the curve.
    fn distance(&self, dx: f64, dy: f64) -> f64 {
        let r = dx.hypot(dy);
        if r < 0.5 {
            return 0.0;
        }
        let theta = dy.atan2(dx);
        let val = r.ln() / self.b - theta;
        let err = fmod_positive(val + PI, TAU) - PI;
        r * err.abs() * self.b / (1.0 + self.b * self.b).sqrt()
    }
}

impl Default for FibonacciSpiral {
    fn default() -> Self {
        Self::new()
    }
}

impl Configurable for FibonacciSpiral {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::LineSize(v) => {
                self.line_size = positive_or("line-size", *v, DEFAULT_SPIRAL_LINE)
            }
            PatternOption::LineColor(c) => self.line = Fill::Color(*c),
            PatternOption::SpaceColor(c) => self.space = Fill::Color(*c),
            PatternOption::LineSource(p) => self.line = Fill::Pattern(p.clone()),
            PatternOption::SpaceSource(p) => self.space = Fill::Pattern(p.clone()),
            other => return self.base.apply(other),
        }
        true
    }
}

impl Pattern for FibonacciSpiral {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let (cx, cy) = self.base.bounds.center();
        let d = self.distance(x as f64 - cx, y as f64 - cy);
        if d <= self.line_size as f64 / 2.0 {
            self.line.sample(x, y)
        } else {
            self.space.sample(x, y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_line() {
        let s = FibonacciSpiral::new().with_bounds(Rect::from_size(100, 100));
        assert_eq!(s.sample(50, 50), Color::BLACK);
    }

    #[test]
    fn points_on_the_curve_are_line() {
        let s = FibonacciSpiral::new()
            .with_bounds(Rect::new(-100, -100, 100, 100))
            .with_line_size(3);
        let b = golden_b();
        for k in 0..3 {
            let theta = 0.3 + k as f64 * 1.7;
            let r = (b * (theta + TAU)).exp();
            let x = (r * theta.cos()).round() as i32;
            let y = (r * theta.sin()).round() as i32;
            assert_eq!(s.sample(x, y), Color::BLACK, "theta {theta}");
        }
    }

    #[test]
    fn halfway_between_turns_is_space() {
        let s = FibonacciSpiral::new().with_bounds(Rect::new(-200, -200, 200, 200));
        let b = golden_b();
        // Along theta = 0 the curve crosses at r = e^(2πbk); the geometric
        // midpoint between two crossings is half a turn off the curve.
        let r = (b * (TAU + PI)).exp();
        assert_eq!(s.sample(r.round() as i32, 0), Color::WHITE);
    }

    #[test]
    fn growth_rate_is_golden() {
        let s = FibonacciSpiral::new();
        let b = golden_b();
        assert!((b - 0.306_349).abs() < 1e-5);
        assert_eq!(s.distance(0.1, 0.1), 0.0);
    }
}
