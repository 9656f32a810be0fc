//! Running-bond brick wall.
use crate::color::Color;
use crate::geom::{positive_mod, Rect};
use crate::hash::hash_index;
use crate::pattern::option::{non_negative_or, positive_or};
use crate::pattern::{Configurable, Fill, Pattern, PatternBase, PatternOption, PatternRef};

pub const DEFAULT_BRICK_WIDTH: i32 = 40;
pub const DEFAULT_BRICK_HEIGHT: i32 = 16;
pub const DEFAULT_MORTAR: i32 = 4;
pub const DEFAULT_ROW_OFFSET: f64 = 0.5;
pub const DEFAULT_BRICK_COLOR: Color = Color::rgb(165, 62, 42);
pub const DEFAULT_MORTAR_COLOR: Color = Color::GRAY;

/// Bricks of `width × height` separated by mortar; odd rows shift by
/// `offset · (width + mortar)`.
///
/// Each brick face is textured by one of `faces`, picked per cell with
/// `stable_hash(col, row, seed)`, and tiled in cell-local coordinates.
#[derive(Clone, Debug)]
pub struct Brick {
    base: PatternBase,
    width: i32,
    height: i32,
    mortar: i32,
    offset: f64,
    seed: u64,
    faces: Vec<PatternRef>,
    face_color: Color,
    mortar_fill: Fill,
}

/// Where a point falls inside the wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrickCell {
    Mortar,
    /// Face of the brick at `(col, row)`, with face-local coordinates.
    Face { col: i32, row: i32, lx: i32, ly: i32 },
}

impl Brick {
    pub fn new() -> Self {
        Self {
            base: PatternBase::default(),
            width: DEFAULT_BRICK_WIDTH,
            height: DEFAULT_BRICK_HEIGHT,
            mortar: DEFAULT_MORTAR,
            offset: DEFAULT_ROW_OFFSET,
            seed: 0,
            faces: Vec::new(),
            face_color: DEFAULT_BRICK_COLOR,
            mortar_fill: Fill::Color(DEFAULT_MORTAR_COLOR),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    /// Brick face size; non-positive values fall back to the defaults.
    pub fn with_brick_size(mut self, width: i32, height: i32) -> Self {
        self.width = positive_or("brick-width", width, DEFAULT_BRICK_WIDTH);
        self.height = positive_or("brick-height", height, DEFAULT_BRICK_HEIGHT);
        self
    }

    pub fn with_mortar(mut self, mortar: i32) -> Self {
        self.mortar = non_negative_or("mortar", mortar, DEFAULT_MORTAR);
        self
    }

    /// Fraction of a cell by which odd rows shift.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = if offset.is_finite() {
            offset
        } else {
            DEFAULT_ROW_OFFSET
        };
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_faces(mut self, faces: Vec<PatternRef>) -> Self {
        self.faces = faces;
        self
    }

    pub fn with_mortar_fill(mut self, fill: impl Into<Fill>) -> Self {
        self.mortar_fill = fill.into();
        self
    }

    /// Resolves `(x, y)` to mortar or a brick face.
    pub fn locate(&self, x: i32, y: i32) -> BrickCell {
        let cell_w = self.width as i64 + self.mortar as i64;
        let cell_h = self.height as i64 + self.mortar as i64;
        let half = self.mortar as i64 / 2;

        let y = y as i64;
        let row = y.div_euclid(cell_h);
        let ly = y.rem_euclid(cell_h);
        let shift = if row.rem_euclid(2) == 1 {
            (self.offset * cell_w as f64).round() as i64
        } else {
            0
        };
        let xs = (x as i64).saturating_sub(shift);
        let col = xs.div_euclid(cell_w);
        let lx = xs.rem_euclid(cell_w);

        let inside = |v: i64, len: i32| v >= half && v < half + len as i64;
        if inside(lx, self.width) && inside(ly, self.height) {
            BrickCell::Face {
                col: clamp_i32(col),
                row: clamp_i32(row),
                lx: (lx - half) as i32,
                ly: (ly - half) as i32,
            }
        } else {
            BrickCell::Mortar
        }
    }

    fn face(&self, col: i32, row: i32, lx: i32, ly: i32) -> Color {
        if self.faces.is_empty() {
            return self.face_color;
        }
        let texture = &self.faces[hash_index(col, row, self.seed, self.faces.len())];
        let tb = texture.bounds();
        if tb.is_empty() {
            return texture.sample(lx, ly);
        }
        texture.sample(
            tb.min_x + positive_mod(lx, tb.width()),
            tb.min_y + positive_mod(ly, tb.height()),
        )
    }
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl Default for Brick {
    fn default() -> Self {
        Self::new()
    }
}

impl Configurable for Brick {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::LineSize(v) => {
                self.mortar = non_negative_or("mortar", *v, DEFAULT_MORTAR)
            }
            PatternOption::Phase(v) if v.is_finite() => self.offset = *v,
            PatternOption::Seed(s) => self.seed = *s,
            PatternOption::FillColor(c) => {
                self.face_color = *c;
                self.faces.clear();
            }
            PatternOption::FillSource(p) => self.faces = vec![p.clone()],
            PatternOption::SpaceColor(c) | PatternOption::LineColor(c) => {
                self.mortar_fill = Fill::Color(*c)
            }
            PatternOption::SpaceSource(p) | PatternOption::LineSource(p) => {
                self.mortar_fill = Fill::Pattern(p.clone())
            }
            other => return self.base.apply(other),
        }
        true
    }
}

impl Pattern for Brick {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        match self.locate(x, y) {
            BrickCell::Mortar => self.mortar_fill.sample(x, y),
            BrickCell::Face { col, row, lx, ly } => self.face(col, row, lx, ly),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::pattern::testing::Coords;
    use crate::primitives::Uniform;

    fn small() -> Brick {
        // Cells are 6×4 with a one-pixel mortar border.
        Brick::new().with_brick_size(4, 2).with_mortar(2)
    }

    #[test]
    fn mortar_surrounds_faces() {
        let b = small();
        assert_eq!(b.locate(0, 0), BrickCell::Mortar);
        assert_eq!(
            b.locate(1, 1),
            BrickCell::Face {
                col: 0,
                row: 0,
                lx: 0,
                ly: 0
            }
        );
        assert_eq!(b.locate(5, 1), BrickCell::Mortar);
        assert_eq!(b.locate(1, 3), BrickCell::Mortar);
        assert_eq!(b.sample(0, 0), DEFAULT_MORTAR_COLOR);
        assert_eq!(b.sample(2, 2), DEFAULT_BRICK_COLOR);
    }

    #[test]
    fn odd_rows_are_offset() {
        let b = small();
        // Row 1 shifts by half a cell (3 px).
        assert_eq!(b.locate(3, 5), BrickCell::Mortar);
        assert!(matches!(b.locate(4, 5), BrickCell::Face { col: 0, row: 1, lx: 0, .. }));
        assert!(matches!(b.locate(1, 5), BrickCell::Face { col: -1, row: 1, lx: 3, .. }));
    }

    #[test]
    fn negative_coordinates_tile() {
        let b = small();
        assert_eq!(b.locate(-6, -8), b.locate(0, 0));
        assert!(matches!(b.locate(-5, -7), BrickCell::Face { col: -1, row: -2, .. }));
    }

    #[test]
    fn huge_bricks_do_not_overflow() {
        let b = Brick::new().with_brick_size(i32::MAX, 16);
        assert_eq!(b.sample(0, 0), DEFAULT_MORTAR_COLOR);
        assert_eq!(
            b.locate(10, 5),
            BrickCell::Face {
                col: 0,
                row: 0,
                lx: 8,
                ly: 3
            }
        );
        let wide = Brick::new()
            .with_brick_size(i32::MAX, i32::MAX)
            .with_mortar(i32::MAX);
        for (x, y) in [(0, 0), (i32::MAX, i32::MIN), (i32::MIN, i32::MAX)] {
            wide.sample(x, y);
        }
    }

    #[test]
    fn non_finite_phase_option_is_ignored() {
        let b = small().with_options(&[PatternOption::Phase(f64::NAN)]);
        assert_eq!(b.locate(4, 5), small().locate(4, 5));
        let b = small().with_options(&[PatternOption::Phase(0.0)]);
        assert!(matches!(b.locate(1, 5), BrickCell::Face { col: 0, row: 1, lx: 0, .. }));
    }

    #[test]
    fn faces_are_chosen_per_cell() {
        let faces = vec![
            Uniform::new(Color::RED).shared(),
            Uniform::new(Color::BLUE).shared(),
        ];
        let b = Brick::new().with_faces(faces).with_seed(7);
        let mut seen: HashMap<(i32, i32), Color> = HashMap::new();
        for y in 0..200 {
            for x in 0..400 {
                if let BrickCell::Face { col, row, .. } = b.locate(x, y) {
                    let c = b.sample(x, y);
                    let prev = seen.entry((col, row)).or_insert(c);
                    assert_eq!(*prev, c, "brick ({col}, {row}) is not uniform");
                }
            }
        }
        let reds = seen.values().filter(|&&c| c == Color::RED).count();
        assert!(reds > 0 && reds < seen.len());
    }

    #[test]
    fn face_textures_tile_in_cell_space() {
        let tex = Coords {
            bounds: Rect::from_size(3, 3),
        }
        .shared();
        let b = small().with_faces(vec![tex.clone()]);
        // Face-local (0, 0) and (3, 0) wrap to the same texel.
        assert_eq!(b.sample(1, 1), tex.sample(0, 0));
        assert_eq!(b.sample(4, 1), tex.sample(0, 0));
        assert_eq!(b.sample(2, 2), tex.sample(1, 1));
    }
}
