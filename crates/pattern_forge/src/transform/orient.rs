//! Exact pixel permutations: mirror, quarter-turn rotation, transpose.
//!
//! All three map the source bounds onto the output bounds one-to-one and are
//! involutions (mirror, transpose) or of order four (rotate).
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::geom::{positive_mod, Rect};
use crate::pattern::{ColorModel, Pattern, PatternRef};

/// Axes flipped by [`Mirror`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MirrorAxis {
    /// Flip left-right.
    Horizontal,
    /// Flip top-bottom.
    Vertical,
    Both,
}

/// Reflection around the midpoint of the source bounds.
#[derive(Clone, Debug)]
pub struct Mirror {
    source: PatternRef,
    axis: MirrorAxis,
}

impl Mirror {
    pub fn new(source: PatternRef, axis: MirrorAxis) -> Self {
        Self { source, axis }
    }
}

impl Pattern for Mirror {
    fn bounds(&self) -> Rect {
        self.source.bounds()
    }

    fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let b = self.source.bounds();
        let fx = || (b.min_x as i64 + b.max_x as i64 - 1 - x as i64) as i32;
        let fy = || (b.min_y as i64 + b.max_y as i64 - 1 - y as i64) as i32;
        let (sx, sy) = match self.axis {
            MirrorAxis::Horizontal => (fx(), y),
            MirrorAxis::Vertical => (x, fy()),
            MirrorAxis::Both => (fx(), fy()),
        };
        self.source.sample(sx, sy)
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}

/// Clockwise quarter turns.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Parses a multiple of 90 degrees (any sign).
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        if degrees % 90 != 0 {
            return Err(Error::InvalidConfig(format!(
                "rotation must be a multiple of 90 degrees, got {degrees}"
            )));
        }
        Ok(match positive_mod(degrees / 90, 4) {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        })
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Clockwise rotation in 90 degree steps, anchored at the source bounds min.
///
/// For 90 and 270 degrees the output bounds swap width and height. With
/// `(lx, ly)` relative to the min corner and `w × h` the source size,
/// `Rotate90.sample = src(ly, h − 1 − lx)`.
#[derive(Clone, Debug)]
pub struct Rotate {
    source: PatternRef,
    rotation: Rotation,
}

impl Rotate {
    pub fn new(source: PatternRef, rotation: Rotation) -> Self {
        Self { source, rotation }
    }

    pub fn by_degrees(source: PatternRef, degrees: i32) -> Result<Self> {
        Ok(Self::new(source, Rotation::from_degrees(degrees)?))
    }
}

impl Pattern for Rotate {
    fn bounds(&self) -> Rect {
        let b = self.source.bounds();
        if self.rotation.swaps_axes() {
            Rect::new(b.min_x, b.min_y, b.min_x + b.height(), b.min_y + b.width())
        } else {
            b
        }
    }

    fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let b = self.source.bounds();
        let (w, h) = (b.width() as i64, b.height() as i64);
        let lx = x as i64 - b.min_x as i64;
        let ly = y as i64 - b.min_y as i64;
        let (sx, sy) = match self.rotation {
            Rotation::Deg0 => (lx, ly),
            Rotation::Deg90 => (ly, h - 1 - lx),
            Rotation::Deg180 => (w - 1 - lx, h - 1 - ly),
            Rotation::Deg270 => (w - 1 - ly, lx),
        };
        self.source
            .sample((b.min_x as i64 + sx) as i32, (b.min_y as i64 + sy) as i32)
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}

/// Swaps X and Y, then shifts by `(dx, dy)`.
#[derive(Clone, Debug)]
pub struct Transpose {
    source: PatternRef,
    dx: i32,
    dy: i32,
}

impl Transpose {
    pub fn new(source: PatternRef) -> Self {
        Self {
            source,
            dx: 0,
            dy: 0,
        }
    }

    pub fn with_offset(mut self, dx: i32, dy: i32) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }
}

impl Pattern for Transpose {
    fn bounds(&self) -> Rect {
        self.source.bounds().transposed().translate(self.dx, self.dy)
    }

    fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        self.source
            .sample(y.wrapping_sub(self.dy), x.wrapping_sub(self.dx))
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::testing::{Coords, PixelMap};

    fn red_corner() -> PatternRef {
        PixelMap {
            bounds: Rect::from_size(2, 3),
            pixels: vec![((0, 0), Color::RED)],
            fallback: Color::BLACK,
        }
        .shared()
    }

    #[test]
    fn rotate_quarter_turn_moves_corner() {
        let r = Rotate::new(red_corner(), Rotation::Deg90);
        assert_eq!(r.bounds(), Rect::from_size(3, 2));
        assert_eq!(r.sample(2, 0), Color::RED);
        assert_eq!(r.sample(0, 0), Color::BLACK);
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        let src: PatternRef = Coords {
            bounds: Rect::new(-3, 2, 4, 7),
        }
        .shared();
        let mut p = src.clone();
        for _ in 0..4 {
            p = Rotate::new(p, Rotation::Deg90).shared();
        }
        assert_eq!(p.bounds(), src.bounds());
        for y in 2..7 {
            for x in -3..4 {
                assert_eq!(p.sample(x, y), src.sample(x, y));
            }
        }
    }

    #[test]
    fn rotations_permute_pixels() {
        let src: PatternRef = Coords {
            bounds: Rect::new(1, 1, 6, 4),
        }
        .shared();
        for rot in [Rotation::Deg90, Rotation::Deg180, Rotation::Deg270] {
            let r = Rotate::new(src.clone(), rot);
            let b = r.bounds();
            let mut seen = Vec::new();
            for y in b.min_y..b.max_y {
                for x in b.min_x..b.max_x {
                    seen.push(r.sample(x, y).rgb_key());
                }
            }
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), 15, "{rot:?}");
        }
    }

    #[test]
    fn degrees_parse() {
        assert_eq!(Rotation::from_degrees(-90).unwrap(), Rotation::Deg270);
        assert_eq!(Rotation::from_degrees(450).unwrap(), Rotation::Deg90);
        assert!(Rotation::from_degrees(45).is_err());
    }

    #[test]
    fn mirror_twice_is_identity() {
        let src: PatternRef = Coords {
            bounds: Rect::new(-2, -2, 5, 3),
        }
        .shared();
        for axis in [MirrorAxis::Horizontal, MirrorAxis::Vertical, MirrorAxis::Both] {
            let once: PatternRef = Mirror::new(src.clone(), axis).shared();
            let twice = Mirror::new(once.clone(), axis);
            for y in -2..3 {
                for x in -2..5 {
                    assert_eq!(twice.sample(x, y), src.sample(x, y));
                }
            }
        }
        let h = Mirror::new(src.clone(), MirrorAxis::Horizontal);
        assert_eq!(h.sample(-2, 0), src.sample(4, 0));
    }

    #[test]
    fn transpose_twice_is_identity() {
        let src: PatternRef = Coords {
            bounds: Rect::new(0, 3, 4, 9),
        }
        .shared();
        let t: PatternRef = Transpose::new(src.clone()).shared();
        assert_eq!(t.bounds(), Rect::new(3, 0, 9, 4));
        assert_eq!(t.sample(5, 1), src.sample(1, 5));
        let tt = Transpose::new(t);
        for y in 3..9 {
            for x in 0..4 {
                assert_eq!(tt.sample(x, y), src.sample(x, y));
            }
        }
    }
}
