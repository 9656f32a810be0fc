//! Roads drawn from signed distance functions.
//!
//! Pixel centers are taken relative to the road center and rotated by
//! `−direction`; the shape's signed distance gives anti-aliased coverage
//! `α = 1 − smoothstep(0, 1, sd)` and, inside, a local (across, along) frame
//! for lane markings.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::{lerp, Color};
use crate::geom::{fmod_positive, Rect};
use crate::pattern::option::positive_or;
use crate::pattern::{Configurable, Fill, Pattern, PatternBase, PatternOption};

pub const DEFAULT_ROAD_WIDTH: i32 = 48;
pub const DEFAULT_LANES: u32 = 2;
pub const DEFAULT_ASPHALT: Color = Color::rgb(58, 58, 62);
pub const DEFAULT_VERGE: Color = Color::rgb(86, 128, 60);

const EDGE_INSET: f64 = 3.0;
const EDGE_WIDTH: f64 = 2.0;
const DIVIDER_WIDTH: f64 = 2.0;
const DASH_PERIOD: f64 = 20.0;
const DASH_ON: f64 = 10.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[non_exhaustive]
pub enum RoadShape {
    #[default]
    Straight,
    /// Arc through the center, bending toward +y with the given radius.
    Curved { radius: f64 },
    /// Straight road with one arm toward +y.
    T,
    /// Two crossing roads.
    Intersection,
}

/// Hermite smoothstep of `x` between `e0` and `e1`.
#[inline]
pub fn smoothstep(e0: f64, e1: f64, x: f64) -> f64 {
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[derive(Clone, Debug)]
pub struct Road {
    base: PatternBase,
    shape: RoadShape,
    center: Option<(f64, f64)>,
    direction: f64,
    width: i32,
    lanes: u32,
    asphalt: Fill,
    marking: Color,
    background: Fill,
}

impl Road {
    pub fn new(shape: RoadShape) -> Self {
        Self {
            base: PatternBase::default(),
            shape,
            center: None,
            direction: 0.0,
            width: DEFAULT_ROAD_WIDTH,
            lanes: DEFAULT_LANES,
            asphalt: Fill::Color(DEFAULT_ASPHALT),
            marking: Color::WHITE,
            background: Fill::Color(DEFAULT_VERGE),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    /// Road center; defaults to the bounds center.
    pub fn with_center(mut self, x: f64, y: f64) -> Self {
        self.center = Some((x, y));
        self
    }

    /// Heading in degrees, clockwise in screen space.
    pub fn with_direction(mut self, degrees: f64) -> Self {
        self.direction = if degrees.is_finite() { degrees } else { 0.0 };
        self
    }

    pub fn with_width(mut self, width: i32) -> Self {
        self.width = positive_or("road-width", width, DEFAULT_ROAD_WIDTH);
        self
    }

    /// Lane count; zero becomes one.
    pub fn with_lanes(mut self, lanes: u32) -> Self {
        self.lanes = lanes.max(1);
        self
    }

    pub fn with_asphalt(mut self, fill: impl Into<Fill>) -> Self {
        self.asphalt = fill.into();
        self
    }

    pub fn with_marking(mut self, color: Color) -> Self {
        self.marking = color;
        self
    }

    pub fn with_background(mut self, fill: impl Into<Fill>) -> Self {
        self.background = fill.into();
        self
    }

    fn half(&self) -> f64 {
        self.width as f64 * 0.5
    }

    /// Local coordinates of the pixel center at `(x, y)`.
    fn local(&self, x: i32, y: i32) -> (f64, f64) {
        let (cx, cy) = self.center.unwrap_or_else(|| self.base.bounds.center());
        let px = x as f64 + 0.5 - cx;
        let py = y as f64 + 0.5 - cy;
        let (s, c) = (-self.direction.to_radians()).sin_cos();
        (px * c - py * s, px * s + py * c)
    }

    /// Signed distance to the road surface; negative inside.
    pub fn signed_distance(&self, x: i32, y: i32) -> f64 {
        let (px, py) = self.local(x, y);
        let half = self.half();
        match self.shape {
            RoadShape::Straight => py.abs() - half,
            RoadShape::Intersection => py.abs().min(px.abs()) - half,
            RoadShape::T => {
                let d = if py > 0.0 { py.abs().min(px.abs()) } else { py.abs() };
                d - half
            }
            RoadShape::Curved { radius } => ((px).hypot(py - radius) - radius).abs() - half,
        }
    }

    /// `(across, along)` in the frame of the nearest arm, or `None` in the
    /// crossing square where no markings are drawn.
    fn lane_frame(&self, px: f64, py: f64) -> Option<(f64, f64)> {
        let half = self.half();
        match self.shape {
            RoadShape::Straight => Some((py, px)),
            RoadShape::Curved { radius } => {
                let across = px.hypot(py - radius) - radius;
                let along = radius * px.atan2(radius - py);
                Some((across, along))
            }
            RoadShape::Intersection | RoadShape::T => {
                let vertical_arm = matches!(self.shape, RoadShape::Intersection) || py > 0.0;
                if px.abs() < half && py.abs() < half {
                    None
                } else if vertical_arm && px.abs() < py.abs() {
                    Some((px, py))
                } else {
                    Some((py, px))
                }
            }
        }
    }

    fn is_marking(&self, across: f64, along: f64) -> bool {
        let half = self.half();
        let a = across.abs();
        let outer = half - EDGE_INSET;
        if a < outer && a >= outer - EDGE_WIDTH {
            return true;
        }
        if fmod_positive(along, DASH_PERIOD) >= DASH_ON {
            return false;
        }
        let lane = self.width as f64 / self.lanes as f64;
        (1..self.lanes).any(|k| {
            let divider = -half + k as f64 * lane;
            (across - divider).abs() < DIVIDER_WIDTH * 0.5
        })
    }
}

impl Configurable for Road {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Angle(a) if a.is_finite() => self.direction = *a,
            PatternOption::LineSize(w) => {
                self.width = positive_or("road-width", *w, DEFAULT_ROAD_WIDTH)
            }
            PatternOption::Radius(r) => {
                if let RoadShape::Curved { radius } = &mut self.shape {
                    *radius = *r as f64;
                } else {
                    return false;
                }
            }
            PatternOption::FillColor(c) => self.asphalt = Fill::Color(*c),
            PatternOption::FillSource(p) => self.asphalt = Fill::Pattern(p.clone()),
            PatternOption::LineColor(c) => self.marking = *c,
            PatternOption::SpaceColor(c) => self.background = Fill::Color(*c),
            PatternOption::SpaceSource(p) => self.background = Fill::Pattern(p.clone()),
            other => return self.base.apply(other),
        }
        true
    }
}

impl Pattern for Road {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let alpha = 1.0 - smoothstep(0.0, 1.0, self.signed_distance(x, y));
        let background = self.background.sample(x, y);
        if alpha <= 0.0 {
            return background;
        }
        let (px, py) = self.local(x, y);
        let surface = match self.lane_frame(px, py) {
            Some((across, along)) if self.is_marking(across, along) => self.marking,
            _ => self.asphalt.sample(x, y),
        };
        if alpha >= 1.0 {
            surface
        } else {
            lerp(background, surface, alpha)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight() -> Road {
        Road::new(RoadShape::Straight).with_bounds(Rect::from_size(200, 200))
    }

    #[test]
    fn straight_road_has_solid_edges_and_dashed_center() {
        let r = straight();
        // Centerline pixel row y = 100 (local across = 0.5).
        assert_eq!(r.sample(100, 100), Color::WHITE);
        assert_eq!(r.sample(112, 100), DEFAULT_ASPHALT);
        // Edge line occupies |across| in [19, 21).
        assert_eq!(r.sample(112, 119), Color::WHITE);
        assert_eq!(r.sample(112, 80), Color::WHITE);
        assert_eq!(r.sample(112, 122), DEFAULT_ASPHALT);
        assert_eq!(r.sample(112, 125), DEFAULT_VERGE);
        assert_eq!(r.sample(112, 10), DEFAULT_VERGE);
    }

    #[test]
    fn boundary_pixels_are_blended() {
        let r = straight();
        // across = 24.5, half a pixel outside the surface.
        let c = r.sample(112, 124);
        assert_ne!(c, DEFAULT_ASPHALT);
        assert_ne!(c, DEFAULT_VERGE);
    }

    #[test]
    fn direction_rotates_the_road() {
        let r = straight().with_direction(90.0);
        assert_eq!(r.sample(10, 100), DEFAULT_VERGE);
        assert_ne!(r.sample(100, 10), DEFAULT_VERGE);
    }

    #[test]
    fn angle_option_needs_a_finite_value() {
        let turned = straight().with_options(&[PatternOption::Angle(90.0)]);
        assert_eq!(turned.sample(10, 100), DEFAULT_VERGE);
        let kept = straight().with_options(&[PatternOption::Angle(f64::INFINITY)]);
        for (x, y) in [(10, 100), (100, 10), (100, 100)] {
            assert_eq!(kept.sample(x, y), straight().sample(x, y));
        }
    }

    #[test]
    fn signed_distances_by_shape() {
        let rect = Rect::from_size(200, 200);
        let cross = Road::new(RoadShape::Intersection).with_bounds(rect);
        assert!(cross.signed_distance(100, 10) < 0.0);
        assert!(cross.signed_distance(10, 100) < 0.0);
        assert!(cross.signed_distance(10, 10) > 0.0);

        let tee = Road::new(RoadShape::T).with_bounds(rect);
        assert!(tee.signed_distance(100, 180) < 0.0);
        assert!(tee.signed_distance(100, 20) > 0.0);
        assert!(tee.signed_distance(10, 100) < 0.0);

        let curve = Road::new(RoadShape::Curved { radius: 50.0 }).with_bounds(rect);
        assert!(curve.signed_distance(100, 100) < 0.0);
        assert!(curve.signed_distance(100, 150) > 0.0);
    }

    #[test]
    fn crossing_square_has_no_markings() {
        let cross = Road::new(RoadShape::Intersection).with_bounds(Rect::from_size(200, 200));
        assert_eq!(cross.sample(100, 100), DEFAULT_ASPHALT);
    }

    #[test]
    fn smoothstep_edges() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    }
}
