//! Integer-arithmetic patterns: XOR texture, modulo stripes, concentric rings and
//! the two Sierpinski fractals.
use crate::color::{Color, Palette};
use crate::geom::{positive_mod_i64, Rect};
use crate::pattern::option::positive_or;
use crate::pattern::{ColorModel, Configurable, Fill, Pattern, PatternBase, PatternOption};

/// `v = x XOR y`, emitted as gray `v mod 256`, or as a palette index `v mod N`
/// when a palette is set.
#[derive(Clone, Debug, Default)]
pub struct XorPattern {
    base: PatternBase,
    palette: Option<Palette>,
}

impl XorPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    pub fn with_palette(mut self, palette: impl Into<Palette>) -> Self {
        self.palette = Some(palette.into());
        self
    }
}

impl Configurable for XorPattern {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Palette(colors) => {
                self.palette = Some(Palette::new(colors.clone()));
                true
            }
            other => self.base.apply(other),
        }
    }
}

impl Pattern for XorPattern {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn color_model(&self) -> ColorModel {
        if self.palette.is_some() {
            ColorModel::Paletted
        } else {
            ColorModel::Gray
        }
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let v = (x ^ y) as i64;
        match &self.palette {
            Some(p) => p.get_wrapped(positive_mod_i64(v, p.len() as i64) as usize),
            None => Color::gray(positive_mod_i64(v, 256) as u8),
        }
    }
}

/// Diagonal stripes: palette index `(x + y) mod N` with positive modulo.
#[derive(Clone, Debug)]
pub struct ModuloStripe {
    base: PatternBase,
    palette: Palette,
}

impl ModuloStripe {
    pub fn new(palette: impl Into<Palette>) -> Self {
        Self {
            base: PatternBase::default(),
            palette: palette.into(),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }
}

impl Configurable for ModuloStripe {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Palette(colors) => {
                self.palette = Palette::new(colors.clone());
                true
            }
            other => self.base.apply(other),
        }
    }
}

impl Pattern for ModuloStripe {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn color_model(&self) -> ColorModel {
        ColorModel::Paletted
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let idx = positive_mod_i64(x as i64 + y as i64, self.palette.len() as i64);
        self.palette.get_wrapped(idx as usize)
    }
}

/// Rings around a center: palette index `floor(hypot(x - cx, y - cy) / width) mod N`.
#[derive(Clone, Debug)]
pub struct ConcentricRings {
    base: PatternBase,
    palette: Palette,
    center: (i32, i32),
    ring_width: i32,
}

impl ConcentricRings {
    pub fn new(palette: impl Into<Palette>) -> Self {
        Self {
            base: PatternBase::default(),
            palette: palette.into(),
            center: (0, 0),
            ring_width: 1,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    pub fn with_center(mut self, cx: i32, cy: i32) -> Self {
        self.center = (cx, cy);
        self
    }

    pub fn with_ring_width(mut self, width: i32) -> Self {
        self.ring_width = positive_or("line-size", width, 1);
        self
    }
}

impl Configurable for ConcentricRings {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Palette(colors) => self.palette = Palette::new(colors.clone()),
            PatternOption::LineSize(v) => self.ring_width = positive_or("line-size", *v, 1),
            other => return self.base.apply(other),
        }
        true
    }
}

impl Pattern for ConcentricRings {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn color_model(&self) -> ColorModel {
        ColorModel::Paletted
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let dx = x as f64 - self.center.0 as f64;
        let dy = y as f64 - self.center.1 as f64;
        let ring = (dx.hypot(dy) / self.ring_width as f64).floor() as i64;
        let idx = positive_mod_i64(ring, self.palette.len() as i64);
        self.palette.get_wrapped(idx as usize)
    }
}

/// Pascal's triangle mod 2 with rows along X: filled where `C(x, y)` is odd,
/// i.e. `((x - y) AND y) == 0`.
#[derive(Clone, Debug)]
pub struct SierpinskiTriangle {
    base: PatternBase,
    fill: Fill,
    space: Fill,
}

impl SierpinskiTriangle {
    pub fn new(fill: impl Into<Fill>, space: impl Into<Fill>) -> Self {
        Self {
            base: PatternBase::default(),
            fill: fill.into(),
            space: space.into(),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }
}

impl Default for SierpinskiTriangle {
    fn default() -> Self {
        Self::new(Color::BLACK, Color::WHITE)
    }
}

impl Configurable for SierpinskiTriangle {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        apply_fill_space(&mut self.base, &mut self.fill, &mut self.space, option)
    }
}

impl Pattern for SierpinskiTriangle {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let (x, y) = (x as i64, y as i64);
        if ((x - y) & y) == 0 {
            self.fill.sample(x as i32, y as i32)
        } else {
            self.space.sample(x as i32, y as i32)
        }
    }
}

/// Sierpinski carpet: filled unless some base-3 digit position has a 1 in both
/// `x` and `y`.
#[derive(Clone, Debug)]
pub struct SierpinskiCarpet {
    base: PatternBase,
    fill: Fill,
    space: Fill,
}

impl SierpinskiCarpet {
    pub fn new(fill: impl Into<Fill>, space: impl Into<Fill>) -> Self {
        Self {
            base: PatternBase::default(),
            fill: fill.into(),
            space: space.into(),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }
}

impl Default for SierpinskiCarpet {
    fn default() -> Self {
        Self::new(Color::BLACK, Color::WHITE)
    }
}

impl Configurable for SierpinskiCarpet {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        apply_fill_space(&mut self.base, &mut self.fill, &mut self.space, option)
    }
}

impl Pattern for SierpinskiCarpet {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let mut a = x.unsigned_abs();
        let mut b = y.unsigned_abs();
        while a > 0 || b > 0 {
            if a % 3 == 1 && b % 3 == 1 {
                return self.space.sample(x, y);
            }
            a /= 3;
            b /= 3;
        }
        self.fill.sample(x, y)
    }
}

fn apply_fill_space(
    base: &mut PatternBase,
    fill: &mut Fill,
    space: &mut Fill,
    option: &PatternOption,
) -> bool {
    match option {
        PatternOption::FillColor(c) | PatternOption::LineColor(c) => *fill = Fill::Color(*c),
        PatternOption::SpaceColor(c) => *space = Fill::Color(*c),
        PatternOption::FillSource(p) | PatternOption::LineSource(p) => {
            *fill = Fill::Pattern(p.clone())
        }
        PatternOption::SpaceSource(p) => *space = Fill::Pattern(p.clone()),
        other => return base.apply(other),
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sierpinski_triangle_matches_pascal_parity() {
        let s = SierpinskiTriangle::new(Color::BLACK, Color::WHITE);
        assert_eq!(s.sample(0, 0), Color::BLACK);
        assert_eq!(s.sample(1, 1), Color::BLACK);
        assert_eq!(s.sample(2, 1), Color::WHITE);
        assert_eq!(s.sample(3, 1), Color::BLACK);
        assert_eq!(s.sample(1, 2), Color::WHITE);

        // Row n of Pascal's triangle: C(n, k) odd iff k is a bit-subset of n.
        for n in 0..32i32 {
            for k in 0..=n {
                let odd = (k & !n) == 0;
                let expected = if odd { Color::BLACK } else { Color::WHITE };
                assert_eq!(s.sample(n, k), expected, "C({n}, {k})");
            }
        }
    }

    #[test]
    fn sierpinski_carpet_holes() {
        let s = SierpinskiCarpet::default();
        assert_eq!(s.sample(0, 0), Color::BLACK);
        assert_eq!(s.sample(1, 1), Color::WHITE);
        assert_eq!(s.sample(4, 4), Color::WHITE);
        assert_eq!(s.sample(3, 1), Color::BLACK);
        assert_eq!(s.sample(3, 3), Color::WHITE);
        assert_eq!(s.sample(10, 10), Color::WHITE);
        assert_eq!(s.sample(9, 2), Color::BLACK);
        assert_eq!(s.sample(-1, -1), Color::WHITE);
    }

    #[test]
    fn xor_gray_and_palette() {
        let x = XorPattern::new();
        assert_eq!(x.sample(3, 5), Color::gray(6));
        assert_eq!(x.sample(-1, 0), Color::gray(255));
        assert_eq!(x.color_model(), ColorModel::Gray);

        let p = XorPattern::new().with_palette(vec![Color::RED, Color::GREEN, Color::BLUE]);
        assert_eq!(p.sample(3, 5), Color::RED);
        assert_eq!(p.sample(1, 0), Color::GREEN);
    }

    #[test]
    fn modulo_stripe_handles_negatives() {
        let m = ModuloStripe::new(vec![Color::RED, Color::GREEN, Color::BLUE]);
        assert_eq!(m.sample(0, 0), Color::RED);
        assert_eq!(m.sample(1, 0), Color::GREEN);
        assert_eq!(m.sample(1, 1), Color::BLUE);
        assert_eq!(m.sample(-1, 0), Color::BLUE);
    }

    #[test]
    fn rings_index_by_distance() {
        let r = ConcentricRings::new(vec![Color::BLACK, Color::WHITE]);
        assert_eq!(r.sample(0, 0), Color::BLACK);
        assert_eq!(r.sample(1, 0), Color::WHITE);
        assert_eq!(r.sample(3, 4), Color::WHITE);
        assert_eq!(r.sample(0, -2), Color::BLACK);

        let wide = ConcentricRings::new(vec![Color::BLACK, Color::WHITE])
            .with_center(10, 10)
            .with_ring_width(5);
        assert_eq!(wide.sample(14, 10), Color::BLACK);
        assert_eq!(wide.sample(15, 10), Color::WHITE);
    }
}
