//! Table layout of child patterns.
//!
//! Column widths and row heights are the largest intrinsic size of the cells
//! in each track. With a fixed outer size, any surplus is split among empty
//! (zero-size) tracks; the division remainder goes to the first of them one
//! pixel each. Without empty tracks the surplus is ignored and the outer
//! bounds are taken as given.
use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::color::Color;
use crate::geom::Rect;
use crate::pattern::{Fill, Pattern, PatternRef};

/// Track sizes and their prefix sums along one axis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Tracks {
    sizes: Vec<i32>,
    /// `offsets[i]` is the start of track `i`; the last entry is the total.
    offsets: Vec<i64>,
}

impl Tracks {
    fn new(sizes: Vec<i32>) -> Self {
        let mut offsets = Vec::with_capacity(sizes.len() + 1);
        let mut acc = 0i64;
        offsets.push(acc);
        for &s in &sizes {
            acc += s as i64;
            offsets.push(acc);
        }
        Self { sizes, offsets }
    }

    fn total(&self) -> i64 {
        self.offsets.last().copied().unwrap_or(0)
    }

    /// Track index and track-local offset of `v`.
    fn locate(&self, v: i64) -> Option<(usize, i32)> {
        if v < 0 || v >= self.total() {
            return None;
        }
        let i = self.offsets.partition_point(|&o| o <= v) - 1;
        Some((i, (v - self.offsets[i]) as i32))
    }
}

/// Spreads `surplus` over the zero-size tracks of `sizes`.
fn distribute(sizes: &mut [i32], surplus: i64) {
    if surplus <= 0 {
        return;
    }
    let flexible: Vec<usize> = (0..sizes.len()).filter(|&i| sizes[i] == 0).collect();
    if flexible.is_empty() {
        debug!(surplus, "No flexible tracks; surplus ignored.");
        return;
    }
    let share = surplus / flexible.len() as i64;
    let remainder = (surplus % flexible.len() as i64) as usize;
    for (k, &i) in flexible.iter().enumerate() {
        let extra = if k < remainder { 1 } else { 0 };
        sizes[i] = (share + extra).min(i32::MAX as i64) as i32;
    }
}

fn cell_size(p: &dyn Pattern) -> (i32, i32) {
    p.intrinsic_size().unwrap_or_else(|| {
        let b = p.bounds();
        (b.width().max(0), b.height().max(0))
    })
}

/// Children placed in a table of `(row, col)` cells.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: BTreeMap<(usize, usize), PatternRef>,
    grid_size: Option<(usize, usize)>,
    fixed_size: Option<(i32, i32)>,
    background: Fill,
    columns: Tracks,
    rows: Tracks,
    intrinsic: (i32, i32),
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
            grid_size: None,
            fixed_size: None,
            background: Fill::Color(Color::TRANSPARENT),
            columns: Tracks::default(),
            rows: Tracks::default(),
            intrinsic: (0, 0),
        }
    }

    /// Places `child` at `(row, col)`, replacing any previous child there.
    pub fn with_cell(mut self, row: usize, col: usize, child: PatternRef) -> Self {
        self.cells.insert((row, col), child);
        self.relayout();
        self
    }

    /// Minimum track counts; cells beyond them still extend the table.
    pub fn with_grid_size(mut self, cols: usize, rows: usize) -> Self {
        self.grid_size = Some((cols, rows));
        self.relayout();
        self
    }

    /// Outer size; negative dimensions are ignored.
    pub fn with_fixed_size(mut self, width: i32, height: i32) -> Self {
        if width < 0 || height < 0 {
            warn!("Negative grid size {}x{} ignored.", width, height);
            return self;
        }
        self.fixed_size = Some((width, height));
        self.relayout();
        self
    }

    /// Fill for points outside every track and for empty cells.
    pub fn with_background(mut self, fill: impl Into<Fill>) -> Self {
        self.background = fill.into();
        self
    }

    pub fn column_widths(&self) -> &[i32] {
        &self.columns.sizes
    }

    pub fn row_heights(&self) -> &[i32] {
        &self.rows.sizes
    }

    fn relayout(&mut self) {
        let (min_cols, min_rows) = self.grid_size.unwrap_or((0, 0));
        let n_cols = self
            .cells
            .keys()
            .map(|&(_, c)| c + 1)
            .max()
            .unwrap_or(0)
            .max(min_cols);
        let n_rows = self
            .cells
            .keys()
            .map(|&(r, _)| r + 1)
            .max()
            .unwrap_or(0)
            .max(min_rows);

        let mut widths = vec![0i32; n_cols];
        let mut heights = vec![0i32; n_rows];
        for (&(r, c), child) in &self.cells {
            let (w, h) = cell_size(child.as_ref());
            widths[c] = widths[c].max(w);
            heights[r] = heights[r].max(h);
        }
        let sum = |v: &[i32]| v.iter().map(|&s| s as i64).sum::<i64>();
        let (sum_w, sum_h) = (sum(&widths), sum(&heights));
        self.intrinsic = (
            sum_w.min(i32::MAX as i64) as i32,
            sum_h.min(i32::MAX as i64) as i32,
        );

        if let Some((fw, fh)) = self.fixed_size {
            distribute(&mut widths, fw as i64 - sum_w);
            distribute(&mut heights, fh as i64 - sum_h);
        }
        self.columns = Tracks::new(widths);
        self.rows = Tracks::new(heights);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern for Grid {
    fn bounds(&self) -> Rect {
        let (w, h) = self.fixed_size.unwrap_or((
            self.columns.total().min(i32::MAX as i64) as i32,
            self.rows.total().min(i32::MAX as i64) as i32,
        ));
        Rect::from_size(w, h)
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let hit = self
            .columns
            .locate(x as i64)
            .zip(self.rows.locate(y as i64))
            .and_then(|((col, lx), (row, ly))| {
                self.cells.get(&(row, col)).map(|child| (child, lx, ly))
            });
        match hit {
            Some((child, lx, ly)) => {
                let b = child.bounds();
                child.sample(b.min_x.wrapping_add(lx), b.min_y.wrapping_add(ly))
            }
            None => self.background.sample(x, y),
        }
    }

    fn intrinsic_size(&self) -> Option<(i32, i32)> {
        Some(self.intrinsic)
    }

    fn is_dirty(&self) -> Option<bool> {
        let states: Vec<bool> = self.cells.values().filter_map(|c| c.is_dirty()).collect();
        if states.is_empty() {
            None
        } else {
            Some(states.into_iter().any(|d| d))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::testing::Coords;
    use crate::primitives::Uniform;

    fn block(c: Color, w: i32, h: i32) -> PatternRef {
        Uniform::new(c).with_bounds(Rect::from_size(w, h)).shared()
    }

    #[test]
    fn tracks_take_the_largest_cell() {
        let g = Grid::new()
            .with_cell(0, 0, block(Color::RED, 10, 5))
            .with_cell(0, 1, block(Color::BLUE, 20, 8))
            .with_cell(1, 0, block(Color::GREEN, 4, 3));
        assert_eq!(g.column_widths(), &[10, 20]);
        assert_eq!(g.row_heights(), &[8, 3]);
        assert_eq!(g.bounds(), Rect::from_size(30, 11));
        assert_eq!(g.sample(0, 0), Color::RED);
        assert_eq!(g.sample(9, 7), Color::RED);
        assert_eq!(g.sample(10, 0), Color::BLUE);
        assert_eq!(g.sample(0, 8), Color::GREEN);
        assert_eq!(g.sample(12, 9), Color::TRANSPARENT);
        assert_eq!(g.sample(30, 0), Color::TRANSPARENT);
        assert_eq!(g.sample(-1, 0), Color::TRANSPARENT);
    }

    #[test]
    fn surplus_goes_to_empty_tracks_with_remainder_first() {
        let g = Grid::new()
            .with_grid_size(4, 1)
            .with_cell(0, 0, block(Color::RED, 10, 5))
            .with_cell(0, 2, block(Color::BLUE, 3, 5))
            .with_fixed_size(26, 5);
        assert_eq!(g.column_widths(), &[10, 7, 3, 6]);
        assert_eq!(g.bounds(), Rect::from_size(26, 5));
        assert_eq!(g.sample(17, 0), Color::BLUE);
        assert_eq!(g.intrinsic_size(), Some((13, 5)));
    }

    #[test]
    fn fixed_size_grows_empty_rows_and_columns() {
        let g = Grid::new()
            .with_grid_size(2, 2)
            .with_cell(0, 0, block(Color::RED, 4, 4))
            .with_fixed_size(10, 9)
            .with_background(Color::WHITE);
        assert_eq!(g.column_widths(), &[4, 6]);
        assert_eq!(g.row_heights(), &[4, 5]);
        assert_eq!(g.bounds(), Rect::from_size(10, 9));
        assert_eq!(g.sample(3, 3), Color::RED);
        assert_eq!(g.sample(5, 5), Color::WHITE);
    }

    #[test]
    fn surplus_without_flexible_tracks_is_ignored() {
        let g = Grid::new()
            .with_cell(0, 0, block(Color::RED, 10, 5))
            .with_fixed_size(40, 40);
        assert_eq!(g.column_widths(), &[10]);
        assert_eq!(g.bounds(), Rect::from_size(40, 40));
        assert_eq!(g.sample(20, 20), Color::TRANSPARENT);
    }

    #[test]
    fn children_are_sampled_from_their_bounds_min() {
        let child = Coords {
            bounds: Rect::new(100, 200, 104, 203),
        }
        .shared();
        let g = Grid::new()
            .with_cell(0, 0, block(Color::RED, 2, 2))
            .with_cell(1, 1, child.clone());
        assert_eq!(g.sample(3, 3), child.sample(101, 201));
    }

    #[test]
    fn intrinsic_size_beats_bounds() {
        struct Hinted;
        impl Pattern for Hinted {
            fn bounds(&self) -> Rect {
                Rect::from_size(100, 100)
            }
            fn sample(&self, _x: i32, _y: i32) -> Color {
                Color::RED
            }
            fn intrinsic_size(&self) -> Option<(i32, i32)> {
                Some((6, 4))
            }
        }
        let g = Grid::new().with_cell(0, 0, Hinted.shared());
        assert_eq!(g.bounds(), Rect::from_size(6, 4));
    }

    #[test]
    fn nested_grids_use_intrinsic_size() {
        let inner = Grid::new()
            .with_cell(0, 0, block(Color::RED, 3, 3))
            .with_cell(0, 1, block(Color::BLUE, 3, 3))
            .shared();
        let outer = Grid::new()
            .with_cell(0, 0, inner)
            .with_cell(0, 1, block(Color::GREEN, 2, 3));
        assert_eq!(outer.column_widths(), &[6, 2]);
        assert_eq!(outer.sample(4, 1), Color::BLUE);
        assert_eq!(outer.sample(6, 1), Color::GREEN);
    }

    #[test]
    fn background_fills_gaps() {
        let g = Grid::new()
            .with_grid_size(2, 1)
            .with_cell(0, 0, block(Color::RED, 2, 2))
            .with_fixed_size(5, 2)
            .with_background(Color::WHITE);
        assert_eq!(g.sample(3, 0), Color::WHITE);
        assert_eq!(g.sample(9, 9), Color::WHITE);
    }
}
