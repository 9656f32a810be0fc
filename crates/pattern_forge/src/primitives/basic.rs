//! Flat fills and simple shapes: uniform, checker, circle, rectangle.
use crate::color::Color;
use crate::geom::{floor_div, Rect};
use crate::pattern::option::positive_or;
use crate::pattern::{Configurable, Fill, Pattern, PatternBase, PatternOption};

/// One color everywhere. Mathematical out-of-bounds policy.
#[derive(Clone, Debug)]
pub struct Uniform {
    base: PatternBase,
    color: Color,
}

impl Uniform {
    pub fn new(color: Color) -> Self {
        Self {
            base: PatternBase::default(),
            color,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Configurable for Uniform {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::FillColor(c) | PatternOption::LineColor(c) => self.color = *c,
            other => return self.base.apply(other),
        }
        true
    }
}

impl Pattern for Uniform {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, _x: i32, _y: i32) -> Color {
        self.color
    }
}

pub const DEFAULT_CHECKER_SIZE: i32 = 10;

/// Alternating squares. `sample` uses the first fill where
/// `floor(x / space_x) + floor(y / space_y)` is even.
#[derive(Clone, Debug)]
pub struct Checker {
    base: PatternBase,
    first: Fill,
    second: Fill,
    space_x: i32,
    space_y: i32,
}

impl Checker {
    pub fn new(first: impl Into<Fill>, second: impl Into<Fill>) -> Self {
        Self {
            base: PatternBase::default(),
            first: first.into(),
            second: second.into(),
            space_x: DEFAULT_CHECKER_SIZE,
            space_y: DEFAULT_CHECKER_SIZE,
        }
    }

    /// Square size on both axes; non-positive sizes fall back to the default.
    pub fn with_space(mut self, size: i32) -> Self {
        let size = positive_or("space-size", size, DEFAULT_CHECKER_SIZE);
        self.space_x = size;
        self.space_y = size;
        self
    }

    /// Independent cell sizes per axis.
    pub fn with_space_xy(mut self, sx: i32, sy: i32) -> Self {
        self.space_x = positive_or("space-size", sx, DEFAULT_CHECKER_SIZE);
        self.space_y = positive_or("space-size", sy, DEFAULT_CHECKER_SIZE);
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }
}

impl Configurable for Checker {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::SpaceSize(v) => {
                let size = positive_or("space-size", *v, DEFAULT_CHECKER_SIZE);
                self.space_x = size;
                self.space_y = size;
            }
            PatternOption::LineColor(c) | PatternOption::FillColor(c) => {
                self.first = Fill::Color(*c)
            }
            PatternOption::SpaceColor(c) => self.second = Fill::Color(*c),
            PatternOption::LineSource(p) | PatternOption::FillSource(p) => {
                self.first = Fill::Pattern(p.clone())
            }
            PatternOption::SpaceSource(p) => self.second = Fill::Pattern(p.clone()),
            other => return self.base.apply(other),
        }
        true
    }
}

impl Pattern for Checker {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let cx = floor_div(x, self.space_x) as i64;
        let cy = floor_div(y, self.space_y) as i64;
        if (cx + cy).rem_euclid(2) == 0 {
            self.first.sample(x, y)
        } else {
            self.second.sample(x, y)
        }
    }
}

/// A filled circle inscribed in the bounds, centered, with `diameter = min(w, h)`.
///
/// The test uses doubled half-integer coordinates so it stays exact in integers.
/// Points outside the circle (including outside the bounds) use the space fill.
#[derive(Clone, Debug)]
pub struct Circle {
    base: PatternBase,
    fill: Fill,
    space: Fill,
}

impl Circle {
    pub fn new(fill: impl Into<Fill>) -> Self {
        Self {
            base: PatternBase::default(),
            fill: fill.into(),
            space: Fill::Color(Color::TRANSPARENT),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    pub fn with_space(mut self, space: impl Into<Fill>) -> Self {
        self.space = space.into();
        self
    }

    fn inside(&self, x: i32, y: i32) -> bool {
        let b = self.base.bounds;
        let diameter = b.width().min(b.height()) as i64;
        if diameter <= 0 {
            return false;
        }
        let cx2 = b.min_x as i64 + b.max_x as i64;
        let cy2 = b.min_y as i64 + b.max_y as i64;
        let dx = 2 * x as i64 + 1 - cx2;
        let dy = 2 * y as i64 + 1 - cy2;
        dx * dx + dy * dy <= diameter * diameter
    }
}

impl Configurable for Circle {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
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

impl Pattern for Circle {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        if self.inside(x, y) {
            self.fill.sample(x, y)
        } else {
            self.space.sample(x, y)
        }
    }
}

/// A filled rectangle covering the bounds, with an optional border of `line_size`.
/// Points outside the bounds use the space fill.
#[derive(Clone, Debug)]
pub struct RectShape {
    base: PatternBase,
    fill: Fill,
    line: Fill,
    space: Fill,
    line_size: i32,
}

impl RectShape {
    pub fn new(fill: impl Into<Fill>) -> Self {
        Self {
            base: PatternBase::default(),
            fill: fill.into(),
            line: Fill::Color(Color::BLACK),
            space: Fill::Color(Color::TRANSPARENT),
            line_size: 0,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    pub fn with_border(mut self, size: i32, line: impl Into<Fill>) -> Self {
        self.line_size = size.max(0);
        self.line = line.into();
        self
    }
}

impl Configurable for RectShape {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::FillColor(c) => self.fill = Fill::Color(*c),
            PatternOption::LineColor(c) => self.line = Fill::Color(*c),
            PatternOption::SpaceColor(c) => self.space = Fill::Color(*c),
            PatternOption::FillSource(p) => self.fill = Fill::Pattern(p.clone()),
            PatternOption::LineSource(p) => self.line = Fill::Pattern(p.clone()),
            PatternOption::SpaceSource(p) => self.space = Fill::Pattern(p.clone()),
            PatternOption::LineSize(v) => self.line_size = (*v).max(0),
            other => return self.base.apply(other),
        }
        true
    }
}

impl Pattern for RectShape {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let b = self.base.bounds;
        if !b.contains(x, y) {
            return self.space.sample(x, y);
        }
        let edge = (x - b.min_x)
            .min(b.max_x - 1 - x)
            .min(y - b.min_y)
            .min(b.max_y - 1 - y);
        if edge < self.line_size {
            self.line.sample(x, y)
        } else {
            self.fill.sample(x, y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checker_unit_squares() {
        let c = Checker::new(Color::BLACK, Color::WHITE).with_space(1);
        assert_eq!(c.sample(0, 0), Color::BLACK);
        assert_eq!(c.sample(1, 0), Color::WHITE);
        assert_eq!(c.sample(1, 1), Color::BLACK);
        assert_eq!(c.sample(-1, 0), Color::WHITE);
    }

    #[test]
    fn checker_negative_cells_alternate() {
        let c = Checker::new(Color::BLACK, Color::WHITE).with_space(4);
        assert_eq!(c.sample(-1, -1), Color::BLACK);
        assert_eq!(c.sample(-5, -1), Color::WHITE);
        assert_eq!(c.sample(3, 3), Color::BLACK);
        assert_eq!(c.sample(4, 3), Color::WHITE);
    }

    #[test]
    fn checker_options_override_roles() {
        let c = Checker::new(Color::BLACK, Color::WHITE).with_options(&[
            PatternOption::SpaceSize(2),
            PatternOption::LineColor(Color::RED),
            PatternOption::SpaceColor(Color::BLUE),
            PatternOption::Seed(99),
        ]);
        assert_eq!(c.sample(0, 0), Color::RED);
        assert_eq!(c.sample(2, 0), Color::BLUE);
        assert_eq!(c.sample(1, 1), Color::RED);
    }

    #[test]
    fn checker_negative_size_uses_default() {
        let c = Checker::new(Color::BLACK, Color::WHITE).with_space(-3);
        assert_eq!(c.sample(9, 0), Color::BLACK);
        assert_eq!(c.sample(10, 0), Color::WHITE);
    }

    #[test]
    fn circle_is_centered_and_integer_exact() {
        let c = Circle::new(Color::WHITE)
            .with_bounds(Rect::from_size(10, 10))
            .with_space(Color::BLACK);
        assert_eq!(c.sample(5, 5), Color::WHITE);
        assert_eq!(c.sample(0, 0), Color::BLACK);
        assert_eq!(c.sample(0, 4), Color::WHITE);
        assert_eq!(c.sample(9, 5), Color::WHITE);
        assert_eq!(c.sample(-1, 5), Color::BLACK);
        // Symmetric about the center.
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(c.sample(x, y), c.sample(9 - x, 9 - y));
            }
        }
    }

    #[test]
    fn rect_shape_draws_border() {
        let r = RectShape::new(Color::WHITE)
            .with_bounds(Rect::from_size(5, 5))
            .with_border(1, Color::RED);
        assert_eq!(r.sample(0, 0), Color::RED);
        assert_eq!(r.sample(2, 2), Color::WHITE);
        assert_eq!(r.sample(4, 2), Color::RED);
        assert_eq!(r.sample(5, 2), Color::TRANSPARENT);
    }

    #[test]
    fn uniform_is_constant() {
        let u = Uniform::new(Color::GREEN).with_options(&[PatternOption::Bounds(Rect::from_size(
            3, 3,
        ))]);
        assert_eq!(u.sample(-100, 100), Color::GREEN);
        assert_eq!(u.bounds(), Rect::from_size(3, 3));
    }
}
