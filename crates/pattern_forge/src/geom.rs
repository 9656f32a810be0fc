//! Integer rectangles and modular arithmetic used by every pattern.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Half-open integer rectangle: a point is inside when `min <= p < max` on both axes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

/// Bounds used by patterns that are not given explicit bounds.
pub const DEFAULT_BOUNDS: Rect = Rect::new(0, 0, 255, 255);

impl Rect {
    /// Creates a rectangle from its corners. Corners are not reordered.
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates a rectangle at the origin with the given size.
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Width, saturating at `i32::MAX` for rectangles spanning the whole axis.
    pub fn width(&self) -> i32 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub fn height(&self) -> i32 {
        self.max_y.saturating_sub(self.min_y)
    }

    /// Returns `true` if the rectangle covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Half-open membership test.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    /// Center in continuous coordinates (pixel centers sit at half-integers).
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x as f64 + self.max_x as f64) * 0.5,
            (self.min_y as f64 + self.max_y as f64) * 0.5,
        )
    }

    /// Moves the rectangle by `(dx, dy)`; corners saturate at the `i32` range.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.min_x.saturating_add(dx),
            self.min_y.saturating_add(dy),
            self.max_x.saturating_add(dx),
            self.max_y.saturating_add(dy),
        )
    }

    /// Grows the rectangle by the given margins on each side.
    pub fn expand_by(&self, left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(
            self.min_x.saturating_sub(left),
            self.min_y.saturating_sub(top),
            self.max_x.saturating_add(right),
            self.max_y.saturating_add(bottom),
        )
    }

    /// Swaps the axes of the rectangle.
    pub fn transposed(&self) -> Self {
        Self::new(self.min_y, self.min_x, self.max_y, self.max_x)
    }

    /// Clamps a point to the last covered pixel on each axis.
    ///
    /// Empty rectangles clamp to their min corner.
    pub fn clamp_point(&self, x: i32, y: i32) -> (i32, i32) {
        let cx = if self.width() <= 0 {
            self.min_x
        } else {
            x.clamp(self.min_x, self.max_x - 1)
        };
        let cy = if self.height() <= 0 {
            self.min_y
        } else {
            y.clamp(self.min_y, self.max_y - 1)
        };
        (cx, cy)
    }

    /// Intersection of two rectangles; empty when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let r = Rect::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        );
        if r.is_empty() {
            Rect::default()
        } else {
            r
        }
    }
}

/// Positive modulo: the result always lies in `[0, m)` for `m > 0`.
///
/// Returns 0 for a non-positive modulus so callers never divide by zero.
#[inline]
pub fn positive_mod(v: i32, m: i32) -> i32 {
    if m <= 0 {
        return 0;
    }
    v.rem_euclid(m)
}

/// Positive modulo on 64-bit values, used where coordinate sums may overflow `i32`.
#[inline]
pub fn positive_mod_i64(v: i64, m: i64) -> i64 {
    if m <= 0 {
        return 0;
    }
    v.rem_euclid(m)
}

/// Floored division (rounds toward negative infinity). Returns 0 for a zero divisor.
#[inline]
pub fn floor_div(v: i32, d: i32) -> i32 {
    if d == 0 {
        return 0;
    }
    if d == -1 {
        return v.wrapping_neg();
    }
    v.div_euclid(d) - if d < 0 && v.rem_euclid(d) != 0 { 1 } else { 0 }
}

/// Positive modulo for floating point values.
#[inline]
pub fn fmod_positive(v: f64, m: f64) -> f64 {
    if m <= 0.0 || !m.is_finite() {
        return 0.0;
    }
    let r = v % m;
    if r < 0.0 {
        r + m
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_open_membership() {
        let r = Rect::new(0, 0, 2, 3);
        assert!(r.contains(0, 0));
        assert!(r.contains(1, 2));
        assert!(!r.contains(2, 0));
        assert!(!r.contains(0, 3));
        assert_eq!((r.width(), r.height()), (2, 3));
    }

    #[test]
    fn positive_mod_wraps_negatives() {
        assert_eq!(positive_mod(-1, 4), 3);
        assert_eq!(positive_mod(-8, 4), 0);
        assert_eq!(positive_mod(5, 4), 1);
        assert_eq!(positive_mod(5, 0), 0);
    }

    #[test]
    fn floor_div_rounds_down() {
        assert_eq!(floor_div(-1, 3), -1);
        assert_eq!(floor_div(-3, 3), -1);
        assert_eq!(floor_div(-4, 3), -2);
        assert_eq!(floor_div(4, 3), 1);
        assert_eq!(floor_div(7, 0), 0);
    }

    #[test]
    fn clamp_point_stays_inside() {
        let r = Rect::new(2, 2, 5, 4);
        assert_eq!(r.clamp_point(-10, 10), (2, 3));
        assert_eq!(r.clamp_point(3, 3), (3, 3));
    }

    #[test]
    fn intersect_of_disjoint_is_empty() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(5, 5, 6, 6);
        assert!(a.intersect(&b).is_empty());
        assert_eq!(a.intersect(&Rect::new(1, 1, 4, 4)), Rect::new(1, 1, 2, 2));
    }

    #[test]
    fn extreme_rects_saturate() {
        let full = Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(full.width(), i32::MAX);
        let moved = Rect::from_size(10, 10).translate(i32::MAX, i32::MIN);
        assert_eq!(moved, Rect::new(i32::MAX, i32::MIN, i32::MAX, i32::MIN + 10));
        assert_eq!(
            Rect::from_size(1, 1).expand_by(i32::MAX, 0, i32::MAX, 0),
            Rect::new(-i32::MAX, 0, i32::MAX, 1)
        );
    }

    #[test]
    fn fmod_positive_handles_negative_input() {
        assert!((fmod_positive(-1.0, 4.0) - 3.0).abs() < 1e-12);
        assert_eq!(fmod_positive(1.0, 0.0), 0.0);
    }
}
