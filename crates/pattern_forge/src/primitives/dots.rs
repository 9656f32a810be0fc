//! Lattice-of-circles patterns: polka dots, halftone screen tone, fish scales.
use crate::color::Color;
use crate::geom::Rect;
use crate::pattern::option::positive_or;
use crate::pattern::{Configurable, Fill, Pattern, PatternBase, PatternOption};

pub const DEFAULT_SPACING: i32 = 20;
pub const DEFAULT_DOT_RADIUS: i32 = 5;

/// Rotated lattice used by polka and screen-tone.
#[derive(Clone, Copy, Debug)]
struct Lattice {
    spacing: f64,
    cos: f64,
    sin: f64,
}

impl Lattice {
    fn new(spacing: i32, angle_deg: f64) -> Self {
        let r = angle_deg.to_radians();
        Self {
            spacing: spacing.max(1) as f64,
            cos: r.cos(),
            sin: r.sin(),
        }
    }

    /// Lattice-space coordinates of a pixel center.
    #[inline]
    fn to_local(&self, x: i32, y: i32) -> (f64, f64) {
        let px = x as f64 + 0.5;
        let py = y as f64 + 0.5;
        (px * self.cos + py * self.sin, -px * self.sin + py * self.cos)
    }

    /// World coordinates of a lattice-space point.
    #[inline]
    fn to_world(&self, u: f64, v: f64) -> (f64, f64) {
        (u * self.cos - v * self.sin, u * self.sin + v * self.cos)
    }

    /// Offset from the nearest cell center and that center in lattice space.
    #[inline]
    fn cell(&self, u: f64, v: f64) -> ((f64, f64), (f64, f64)) {
        let s = self.spacing;
        let cu = ((u / s).floor() + 0.5) * s;
        let cv = ((v / s).floor() + 0.5) * s;
        ((u - cu, v - cv), (cu, cv))
    }
}

/// Circles of `radius` on a lattice of `spacing`, rotated by `angle` degrees.
#[derive(Clone, Debug)]
pub struct Polka {
    base: PatternBase,
    fill: Fill,
    space: Fill,
    spacing: i32,
    radius: i32,
    angle: f64,
}

impl Polka {
    pub fn new() -> Self {
        Self {
            base: PatternBase::default(),
            fill: Fill::Color(Color::BLACK),
            space: Fill::Color(Color::WHITE),
            spacing: DEFAULT_SPACING,
            radius: DEFAULT_DOT_RADIUS,
            angle: 0.0,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = positive_or("space-size", spacing, DEFAULT_SPACING);
        self
    }

    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius.max(0);
        self
    }

    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }

    pub fn with_colors(mut self, fill: impl Into<Fill>, space: impl Into<Fill>) -> Self {
        self.fill = fill.into();
        self.space = space.into();
        self
    }
}

impl Default for Polka {
    fn default() -> Self {
        Self::new()
    }
}

impl Configurable for Polka {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::SpaceSize(v) => {
                self.spacing = positive_or("space-size", *v, DEFAULT_SPACING)
            }
            PatternOption::Radius(v) => self.radius = (*v).max(0),
            PatternOption::Angle(a) => self.angle = *a,
            PatternOption::FillColor(c) | PatternOption::LineColor(c) => {
                self.fill = Fill::Color(*c)
            }
            PatternOption::SpaceColor(c) => self.space = Fill::Color(*c),
            PatternOption::FillSource(p) | PatternOption::LineSource(p) => {
                self.fill = Fill::Pattern(p.clone())
            }
            PatternOption::SpaceSource(p) => self.space = Fill::Pattern(p.clone()),
            other => return self.base.apply(other),
        }
        true
    }
}

impl Pattern for Polka {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let lattice = Lattice::new(self.spacing, self.angle);
        let (u, v) = lattice.to_local(x, y);
        let ((du, dv), _) = lattice.cell(u, v);
        if (du * du + dv * dv).sqrt() < self.radius as f64 {
            self.fill.sample(x, y)
        } else {
            self.space.sample(x, y)
        }
    }
}

/// Halftone screen: dots on a rotated lattice whose radius follows the darkness of
/// an optional source sampled at each cell center.
///
/// Without a source every dot uses the fixed `radius`.
#[derive(Clone, Debug)]
pub struct ScreenTone {
    base: PatternBase,
    fill: Fill,
    space: Fill,
    source: Option<Fill>,
    spacing: i32,
    radius: i32,
    angle: f64,
}

impl ScreenTone {
    pub fn new() -> Self {
        Self {
            base: PatternBase::default(),
            fill: Fill::Color(Color::BLACK),
            space: Fill::Color(Color::WHITE),
            source: None,
            spacing: 8,
            radius: 3,
            angle: 45.0,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    /// Drives dot sizes from the luminance of `source`.
    pub fn with_source(mut self, source: impl Into<Fill>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = positive_or("space-size", spacing, 8);
        self
    }

    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }

    pub fn with_colors(mut self, fill: impl Into<Fill>, space: impl Into<Fill>) -> Self {
        self.fill = fill.into();
        self.space = space.into();
        self
    }

    fn dot_radius(&self, lattice: &Lattice, center: (f64, f64)) -> f64 {
        match &self.source {
            None => self.radius as f64,
            Some(src) => {
                let (wx, wy) = lattice.to_world(center.0, center.1);
                let c = src.sample(wx.floor() as i32, wy.floor() as i32);
                let darkness = (1.0 - c.luminance()) * (c.a as f64 / 255.0);
                // Full darkness covers the cell: radius reaches the half diagonal.
                lattice.spacing * std::f64::consts::FRAC_1_SQRT_2 * darkness.clamp(0.0, 1.0).sqrt()
            }
        }
    }
}

impl Default for ScreenTone {
    fn default() -> Self {
        Self::new()
    }
}

impl Configurable for ScreenTone {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::SpaceSize(v) => self.spacing = positive_or("space-size", *v, 8),
            PatternOption::Radius(v) => self.radius = (*v).max(0),
            PatternOption::Angle(a) => self.angle = *a,
            PatternOption::FillColor(c) | PatternOption::LineColor(c) => {
                self.fill = Fill::Color(*c)
            }
            PatternOption::SpaceColor(c) => self.space = Fill::Color(*c),
            PatternOption::FillSource(p) => self.source = Some(Fill::Pattern(p.clone())),
            PatternOption::LineSource(p) => self.fill = Fill::Pattern(p.clone()),
            PatternOption::SpaceSource(p) => self.space = Fill::Pattern(p.clone()),
            other => return self.base.apply(other),
        }
        true
    }
}

impl Pattern for ScreenTone {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let lattice = Lattice::new(self.spacing, self.angle);
        let (u, v) = lattice.to_local(x, y);
        let ((du, dv), center) = lattice.cell(u, v);
        let radius = self.dot_radius(&lattice, center);
        if (du * du + dv * dv).sqrt() < radius {
            self.fill.sample(x, y)
        } else {
            self.space.sample(x, y)
        }
    }
}

/// Overlapping fish scales in rows offset by half a scale.
///
/// Each scale is a disk of radius `size / 2`; rows further down are drawn on top,
/// and the outer `line_size` pixels of each disk use the line fill.
#[derive(Clone, Debug)]
pub struct Scales {
    base: PatternBase,
    fill: Fill,
    line: Fill,
    size: i32,
    line_size: i32,
}

impl Scales {
    pub fn new() -> Self {
        Self {
            base: PatternBase::default(),
            fill: Fill::Color(Color::rgb(46, 139, 87)),
            line: Fill::Color(Color::rgb(20, 60, 40)),
            size: 24,
            line_size: 2,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    pub fn with_size(mut self, size: i32) -> Self {
        self.size = positive_or("space-size", size, 24);
        self
    }

    pub fn with_colors(mut self, fill: impl Into<Fill>, line: impl Into<Fill>) -> Self {
        self.fill = fill.into();
        self.line = line.into();
        self
    }
}

impl Default for Scales {
    fn default() -> Self {
        Self::new()
    }
}

impl Configurable for Scales {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::SpaceSize(v) => self.size = positive_or("space-size", *v, 24),
            PatternOption::LineSize(v) => self.line_size = (*v).max(0),
            PatternOption::FillColor(c) => self.fill = Fill::Color(*c),
            PatternOption::LineColor(c) => self.line = Fill::Color(*c),
            PatternOption::FillSource(p) => self.fill = Fill::Pattern(p.clone()),
            PatternOption::LineSource(p) => self.line = Fill::Pattern(p.clone()),
            other => return self.base.apply(other),
        }
        true
    }
}

impl Pattern for Scales {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let size = self.size as f64;
        let r = size * 0.5;
        let px = x as f64 + 0.5;
        let py = y as f64 + 0.5;
        let row0 = (py / r).floor() as i64;
        // The lowest row whose disk covers the point is the one drawn on top.
        for row in [row0 + 1, row0, row0 - 1] {
            let cy = row as f64 * r;
            let offset = if row.rem_euclid(2) == 1 { r } else { 0.0 };
            let col = ((px - offset) / size).round();
            let cx = col * size + offset;
            let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
            if d < r {
                return if d >= r - self.line_size as f64 {
                    self.line.sample(x, y)
                } else {
                    self.fill.sample(x, y)
                };
            }
        }
        self.line.sample(x, y)
    }
}
