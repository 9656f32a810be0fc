//! Orthographic sphere projection.
//!
//! Pixels map onto the disk inscribed in the bounds; each disk point is lifted
//! to the unit sphere, rotated by tilt (about X) then angle (about Y), and
//! converted to equirectangular UV. With a texture the UV is scaled to the
//! texture bounds; without one a latitude/longitude graticule is drawn.
use std::f64::consts::{PI, TAU};

use glam::{DMat3, DVec3};

use crate::color::Color;
use crate::geom::Rect;
use crate::pattern::{Configurable, Fill, Pattern, PatternBase, PatternOption, PatternRef};

pub const DEFAULT_TILT: f64 = 23.5;
pub const DEFAULT_GRID_STEP: f64 = 15.0;
/// Graticule half-width in fractional grid steps.
pub const DEFAULT_LINE_THRESHOLD: f64 = 0.04;
pub const DEFAULT_OCEAN: Color = Color::rgb(24, 64, 140);

#[derive(Clone, Debug)]
pub struct Globe {
    base: PatternBase,
    tilt: f64,
    angle: f64,
    texture: Option<PatternRef>,
    grid_step: f64,
    threshold: f64,
    line: Color,
    fill: Fill,
    space: Fill,
}

impl Globe {
    pub fn new() -> Self {
        Self {
            base: PatternBase::default(),
            tilt: DEFAULT_TILT,
            angle: 0.0,
            texture: None,
            grid_step: DEFAULT_GRID_STEP,
            threshold: DEFAULT_LINE_THRESHOLD,
            line: Color::WHITE,
            fill: Fill::Color(DEFAULT_OCEAN),
            space: Fill::Color(Color::TRANSPARENT),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    /// Axial tilt in degrees.
    pub fn with_tilt(mut self, degrees: f64) -> Self {
        self.tilt = if degrees.is_finite() { degrees } else { DEFAULT_TILT };
        self
    }

    /// Spin about the vertical axis in degrees.
    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = if degrees.is_finite() { degrees } else { 0.0 };
        self
    }

    pub fn with_texture(mut self, texture: PatternRef) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_grid(mut self, step_degrees: f64, threshold: f64) -> Self {
        if step_degrees > 0.0 {
            self.grid_step = step_degrees;
        }
        if threshold >= 0.0 {
            self.threshold = threshold;
        }
        self
    }

    pub fn with_colors(mut self, line: Color, fill: impl Into<Fill>, space: impl Into<Fill>) -> Self {
        self.line = line;
        self.fill = fill.into();
        self.space = space.into();
        self
    }

    /// Equirectangular `(u, v)` in `[0, 1]²` for the pixel, or `None` off the disk.
    pub fn uv(&self, x: i32, y: i32) -> Option<(f64, f64)> {
        let b = self.base.bounds;
        let radius = b.width().min(b.height()) as f64 * 0.5;
        if radius <= 0.0 {
            return None;
        }
        let (cx, cy) = b.center();
        let nx = (x as f64 + 0.5 - cx) / radius;
        let ny = (y as f64 + 0.5 - cy) / radius;
        let d2 = nx * nx + ny * ny;
        if d2 > 1.0 {
            return None;
        }
        let rotation = DMat3::from_rotation_y(self.angle.to_radians())
            * DMat3::from_rotation_x(self.tilt.to_radians());
        let p = rotation * DVec3::new(nx, -ny, (1.0 - d2).sqrt());

        let phi = p.y.clamp(-1.0, 1.0).asin();
        let theta = p.x.atan2(p.z);
        Some(((theta + PI) / TAU, 0.5 - phi / PI))
    }

    fn on_graticule(&self, u: f64, v: f64) -> bool {
        let lon = u * 360.0 / self.grid_step;
        let lat = v * 180.0 / self.grid_step;
        let off = |f: f64| (f - f.round()).abs();
        off(lon) < self.threshold || off(lat) < self.threshold
    }
}

impl Default for Globe {
    fn default() -> Self {
        Self::new()
    }
}

impl Configurable for Globe {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Angle(a) if a.is_finite() => self.angle = *a,
            PatternOption::Angles(a) => match a.as_slice() {
                [tilt, angle, ..] if tilt.is_finite() && angle.is_finite() => {
                    self.tilt = *tilt;
                    self.angle = *angle;
                }
                _ => return false,
            },
            PatternOption::LineColor(c) => self.line = *c,
            PatternOption::FillColor(c) => self.fill = Fill::Color(*c),
            PatternOption::SpaceColor(c) => self.space = Fill::Color(*c),
            PatternOption::FillSource(p) => self.texture = Some(p.clone()),
            PatternOption::SpaceSource(p) => self.space = Fill::Pattern(p.clone()),
            other => return self.base.apply(other),
        }
        true
    }
}

impl Pattern for Globe {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let Some((u, v)) = self.uv(x, y) else {
            return self.space.sample(x, y);
        };
        match &self.texture {
            Some(tex) => {
                let tb = tex.bounds();
                let w = tb.width().max(1);
                let h = tb.height().max(1);
                let tx = ((u * w as f64) as i32).clamp(0, w - 1);
                let ty = ((v * h as f64) as i32).clamp(0, h - 1);
                tex.sample(tb.min_x + tx, tb.min_y + ty)
            }
            None if self.on_graticule(u, v) => self.line,
            None => self.fill.sample(x, y),
        }
    }
}
