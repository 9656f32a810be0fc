//! Glyphs arranged on a circle, each turned to follow the tangent.
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::color::{over, Color};
use crate::geom::Rect;
use crate::pattern::{Configurable, Fill, Pattern, PatternBase, PatternOption, PatternRef};

pub const DEFAULT_RING_RADIUS: f64 = 80.0;

/// Glyph `i` of `n` sits at angle `2πi/n − π/2` (the first at the top) and is
/// rotated by that angle plus a quarter turn. Glyphs are looked up with
/// nearest-neighbor inverse rotation and composited source-over in order.
#[derive(Clone, Debug)]
pub struct GlyphRing {
    base: PatternBase,
    glyphs: Vec<PatternRef>,
    radius: f64,
    center: Option<(f64, f64)>,
    background: Fill,
}

/// Placement of one glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Placement {
    x: f64,
    y: f64,
    sin: f64,
    cos: f64,
}

impl GlyphRing {
    pub fn new(glyphs: Vec<PatternRef>) -> Self {
        Self {
            base: PatternBase::default(),
            glyphs,
            radius: DEFAULT_RING_RADIUS,
            center: None,
            background: Fill::Color(Color::TRANSPARENT),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        if radius.is_finite() && radius >= 0.0 {
            self.radius = radius;
        }
        self
    }

    pub fn with_center(mut self, x: f64, y: f64) -> Self {
        self.center = Some((x, y));
        self
    }

    pub fn with_background(mut self, fill: impl Into<Fill>) -> Self {
        self.background = fill.into();
        self
    }

    fn placement(&self, i: usize) -> Placement {
        let (cx, cy) = self.center.unwrap_or_else(|| self.base.bounds.center());
        let angle = TAU * i as f64 / self.glyphs.len() as f64 - FRAC_PI_2;
        let (sin, cos) = (angle + FRAC_PI_2).sin_cos();
        Placement {
            x: cx + self.radius * angle.cos(),
            y: cy + self.radius * angle.sin(),
            sin,
            cos,
        }
    }

    fn glyph_sample(&self, glyph: &dyn Pattern, at: Placement, x: i32, y: i32) -> Option<Color> {
        let b = glyph.bounds();
        if b.is_empty() {
            return None;
        }
        let dx = x as f64 + 0.5 - at.x;
        let dy = y as f64 + 0.5 - at.y;
        let lx = dx * at.cos + dy * at.sin + b.width() as f64 * 0.5;
        let ly = -dx * at.sin + dy * at.cos + b.height() as f64 * 0.5;
        if lx < 0.0 || ly < 0.0 || lx >= b.width() as f64 || ly >= b.height() as f64 {
            return None;
        }
        Some(glyph.sample(b.min_x + lx as i32, b.min_y + ly as i32))
    }
}

impl Configurable for GlyphRing {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Radius(r) if *r >= 0 => self.radius = *r as f64,
            PatternOption::SpaceColor(c) => self.background = Fill::Color(*c),
            PatternOption::SpaceSource(p) => self.background = Fill::Pattern(p.clone()),
            other => return self.base.apply(other),
        }
        true
    }
}

impl Pattern for GlyphRing {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let mut acc = self.background.sample(x, y);
        for (i, glyph) in self.glyphs.iter().enumerate() {
            if let Some(c) = self.glyph_sample(glyph.as_ref(), self.placement(i), x, y) {
                acc = over(c, acc);
            }
        }
        acc
    }
}
