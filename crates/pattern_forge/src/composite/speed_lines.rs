//! Manga-style radial speed lines.
use std::f64::consts::TAU;

use crate::color::Color;
use crate::geom::{fmod_positive, Rect};
use crate::hash::hash_float;
use crate::pattern::option::positive_or;
use crate::pattern::{Configurable, Fill, Pattern, PatternBase, PatternOption};

pub const DEFAULT_SLOTS: u32 = 72;
pub const DEFAULT_MIN_RADIUS: i32 = 40;
pub const DEFAULT_MAX_RADIUS: i32 = 100;

/// The full turn is cut into `slots` angular wedges. Wedge `k` is lit when
/// `hash_float(k, 0, seed) < ½` and then starts at a hashed inner radius in
/// `[min_radius, max_radius)`; the center stays clear.
#[derive(Clone, Debug)]
pub struct SpeedLines {
    base: PatternBase,
    center: Option<(f64, f64)>,
    slots: u32,
    min_radius: i32,
    max_radius: i32,
    seed: u64,
    line: Fill,
    space: Fill,
}

impl SpeedLines {
    pub fn new() -> Self {
        Self {
            base: PatternBase::default(),
            center: None,
            slots: DEFAULT_SLOTS,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
            seed: 0,
            line: Fill::Color(Color::BLACK),
            space: Fill::Color(Color::WHITE),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    pub fn with_center(mut self, x: f64, y: f64) -> Self {
        self.center = Some((x, y));
        self
    }

    /// Wedges per full turn; zero becomes one.
    pub fn with_slots(mut self, slots: u32) -> Self {
        self.slots = slots.max(1);
        self
    }

    /// Inner radius range; the bounds are swapped when given out of order.
    pub fn with_radii(mut self, min_radius: i32, max_radius: i32) -> Self {
        self.min_radius = min_radius.min(max_radius).max(0);
        self.max_radius = max_radius.max(min_radius).max(0);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_colors(mut self, line: impl Into<Fill>, space: impl Into<Fill>) -> Self {
        self.line = line.into();
        self.space = space.into();
        self
    }

    /// Inner radius of wedge `k`, or `None` when the wedge is dark.
    pub fn slot(&self, k: i32) -> Option<f64> {
        if hash_float(k, 0, self.seed) >= 0.5 {
            return None;
        }
        let span = (self.max_radius - self.min_radius) as f64;
        Some(self.min_radius as f64 + hash_float(k, 1, self.seed) * span)
    }

    fn slot_at(&self, x: i32, y: i32) -> (i32, f64) {
        let (cx, cy) = self.center.unwrap_or_else(|| self.base.bounds.center());
        let dx = x as f64 + 0.5 - cx;
        let dy = y as f64 + 0.5 - cy;
        let theta = fmod_positive(dy.atan2(dx), TAU);
        let k = ((theta / TAU * self.slots as f64) as i32).min(self.slots as i32 - 1);
        (k, dx.hypot(dy))
    }
}

impl Default for SpeedLines {
    fn default() -> Self {
        Self::new()
    }
}

impl Configurable for SpeedLines {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Density(d) => {
                self.slots = if d.is_finite() && *d >= 1.0 {
                    d.round().min(u32::MAX as f64) as u32
                } else {
                    DEFAULT_SLOTS
                }
            }
            PatternOption::MinRadius(r) => {
                self.min_radius = positive_or("min-radius", *r, DEFAULT_MIN_RADIUS)
            }
            PatternOption::MaxRadius(r) => {
                self.max_radius = positive_or("max-radius", *r, DEFAULT_MAX_RADIUS)
            }
            PatternOption::Seed(s) => self.seed = *s,
            PatternOption::LineColor(c) => self.line = Fill::Color(*c),
            PatternOption::SpaceColor(c) => self.space = Fill::Color(*c),
            PatternOption::LineSource(p) => self.line = Fill::Pattern(p.clone()),
            PatternOption::SpaceSource(p) => self.space = Fill::Pattern(p.clone()),
            other => return self.base.apply(other),
        }
        true
    }
}

impl Pattern for SpeedLines {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let (k, r) = self.slot_at(x, y);
        match self.slot(k) {
            Some(inner) if r >= inner => self.line.sample(x, y),
            _ => self.space.sample(x, y),
        }
    }
}
