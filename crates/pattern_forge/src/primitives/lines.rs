//! Stripe-family patterns: horizontal and vertical lines, cross-hatching.
//!
//! All of them are periodic with `period = line_size + space_size` and defined on
//! the whole plane. A zero period degenerates to the line fill everywhere.
use crate::color::Color;
use crate::geom::{fmod_positive, Rect};
use crate::pattern::option::non_negative_or;
use crate::pattern::{Configurable, Fill, Pattern, PatternBase, PatternOption};

pub const DEFAULT_LINE_SIZE: i32 = 2;
pub const DEFAULT_SPACE_SIZE: i32 = 6;

/// Shared stripe settings.
#[derive(Clone, Debug)]
struct Stripes {
    line: Fill,
    space: Fill,
    line_size: i32,
    space_size: i32,
    phase: f64,
}

impl Stripes {
    fn new() -> Self {
        Self {
            line: Fill::Color(Color::BLACK),
            space: Fill::Color(Color::WHITE),
            line_size: DEFAULT_LINE_SIZE,
            space_size: DEFAULT_SPACE_SIZE,
            phase: 0.0,
        }
    }

    fn apply(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::LineSize(v) => {
                self.line_size = non_negative_or("line-size", *v, DEFAULT_LINE_SIZE)
            }
            PatternOption::SpaceSize(v) => {
                self.space_size = non_negative_or("space-size", *v, DEFAULT_SPACE_SIZE)
            }
            PatternOption::LineColor(c) => self.line = Fill::Color(*c),
            PatternOption::SpaceColor(c) => self.space = Fill::Color(*c),
            PatternOption::LineSource(p) => self.line = Fill::Pattern(p.clone()),
            PatternOption::SpaceSource(p) => self.space = Fill::Pattern(p.clone()),
            PatternOption::Phase(v) => self.phase = *v,
            _ => return false,
        }
        true
    }

    fn period(&self) -> i32 {
        self.line_size.saturating_add(self.space_size)
    }

    /// Whether a coordinate along the stripe axis lies on a line.
    #[inline]
    fn on_line(&self, d: f64) -> bool {
        let period = self.period();
        if period <= 0 {
            return true;
        }
        fmod_positive(d - self.phase, period as f64) < self.line_size as f64
    }

    #[inline]
    fn pick(&self, on: bool, x: i32, y: i32) -> Color {
        if on {
            self.line.sample(x, y)
        } else {
            self.space.sample(x, y)
        }
    }
}

macro_rules! stripe_builders {
    ($ty:ident) => {
        impl $ty {
            pub fn with_bounds(mut self, bounds: Rect) -> Self {
                self.base.bounds = bounds;
                self
            }

            /// Sets line and space widths; negative widths fall back to defaults.
            pub fn with_sizes(mut self, line_size: i32, space_size: i32) -> Self {
                self.stripes.line_size = non_negative_or("line-size", line_size, DEFAULT_LINE_SIZE);
                self.stripes.space_size =
                    non_negative_or("space-size", space_size, DEFAULT_SPACE_SIZE);
                self
            }

            pub fn with_colors(mut self, line: impl Into<Fill>, space: impl Into<Fill>) -> Self {
                self.stripes.line = line.into();
                self.stripes.space = space.into();
                self
            }

            pub fn with_phase(mut self, phase: f64) -> Self {
                self.stripes.phase = phase;
                self
            }
        }
    };
}

/// Horizontal bands: lines run along X, repeat along Y.
#[derive(Clone, Debug)]
pub struct HorizontalLine {
    base: PatternBase,
    stripes: Stripes,
}

impl HorizontalLine {
    pub fn new() -> Self {
        Self {
            base: PatternBase::default(),
            stripes: Stripes::new(),
        }
    }
}

impl Default for HorizontalLine {
    fn default() -> Self {
        Self::new()
    }
}

stripe_builders!(HorizontalLine);

impl Configurable for HorizontalLine {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        self.stripes.apply(option) || self.base.apply(option)
    }
}

impl Pattern for HorizontalLine {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        self.stripes.pick(self.stripes.on_line(y as f64), x, y)
    }
}

/// Vertical bands: lines run along Y, repeat along X.
#[derive(Clone, Debug)]
pub struct VerticalLine {
    base: PatternBase,
    stripes: Stripes,
}

impl VerticalLine {
    pub fn new() -> Self {
        Self {
            base: PatternBase::default(),
            stripes: Stripes::new(),
        }
    }
}

impl Default for VerticalLine {
    fn default() -> Self {
        Self::new()
    }
}

stripe_builders!(VerticalLine);

impl Configurable for VerticalLine {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        self.stripes.apply(option) || self.base.apply(option)
    }
}

impl Pattern for VerticalLine {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        self.stripes.pick(self.stripes.on_line(x as f64), x, y)
    }
}

/// Union of line families at several angles.
///
/// A point is on a line when `x cos θ + y sin θ` falls in `[0, line_size)` modulo
/// the period for any of the angles.
#[derive(Clone, Debug)]
pub struct CrossHatch {
    base: PatternBase,
    stripes: Stripes,
    directions: Vec<(f64, f64)>,
}

impl CrossHatch {
    pub fn new() -> Self {
        Self {
            base: PatternBase::default(),
            stripes: Stripes::new(),
            directions: directions(&[45.0, -45.0]),
        }
    }

    /// Sets the hatching angles in degrees.
    pub fn with_angles(mut self, angles: &[f64]) -> Self {
        self.directions = directions(angles);
        self
    }
}

impl Default for CrossHatch {
    fn default() -> Self {
        Self::new()
    }
}

stripe_builders!(CrossHatch);

fn directions(angles: &[f64]) -> Vec<(f64, f64)> {
    angles
        .iter()
        .map(|a| {
            let r = a.to_radians();
            (r.cos(), r.sin())
        })
        .collect()
}

impl Configurable for CrossHatch {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Angle(a) => {
                self.directions = directions(&[*a]);
                true
            }
            PatternOption::Angles(a) => {
                self.directions = directions(a);
                true
            }
            other => self.stripes.apply(other) || self.base.apply(other),
        }
    }
}

impl Pattern for CrossHatch {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let (fx, fy) = (x as f64, y as f64);
        let on = self
            .directions
            .iter()
            .any(|(c, s)| self.stripes.on_line(fx * c + fy * s));
        self.stripes.pick(on, x, y)
    }
}
