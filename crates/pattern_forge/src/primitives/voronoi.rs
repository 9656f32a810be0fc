//! Voronoi diagram over an explicit seed list.
use mint::Point2;
use rand::Rng;

use crate::color::{Color, Palette};
use crate::geom::Rect;
use crate::pattern::{ColorModel, Configurable, Pattern, PatternBase, PatternOption};

/// Nearest-seed coloring by squared Euclidean distance.
///
/// Seed `i` is painted with palette entry `i mod N`. Ties keep the earlier seed.
/// With no seeds every point is transparent.
#[derive(Clone, Debug)]
pub struct Voronoi {
    base: PatternBase,
    seeds: Vec<(i32, i32)>,
    palette: Palette,
}

impl Voronoi {
    pub fn new<I, P>(seeds: I, palette: impl Into<Palette>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Point2<i32>>,
    {
        let seeds = seeds
            .into_iter()
            .map(|p| {
                let p = p.into();
                (p.x, p.y)
            })
            .collect();
        Self {
            base: PatternBase::default().with_model(ColorModel::Paletted),
            seeds,
            palette: palette.into(),
        }
    }

    /// Seeds drawn uniformly inside `bounds` from the caller's RNG.
    pub fn scattered(
        count: usize,
        bounds: Rect,
        palette: impl Into<Palette>,
        rng: &mut dyn Rng,
    ) -> Self {
        let w = bounds.width().max(1) as u64;
        let h = bounds.height().max(1) as u64;
        let seeds: Vec<[i32; 2]> = (0..count)
            .map(|_| {
                let x = bounds.min_x as i64 + (rng.next_u64() % w) as i64;
                let y = bounds.min_y as i64 + (rng.next_u64() % h) as i64;
                [x as i32, y as i32]
            })
            .collect();
        Self::new(seeds, palette).with_bounds(bounds)
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.bounds = bounds;
        self
    }

    pub fn seeds(&self) -> &[(i32, i32)] {
        &self.seeds
    }

    /// Index of the nearest seed, or `None` without seeds.
    pub fn nearest_seed(&self, x: i32, y: i32) -> Option<usize> {
        let mut best: Option<(usize, i64)> = None;
        for (i, &(sx, sy)) in self.seeds.iter().enumerate() {
            let dx = x as i64 - sx as i64;
            let dy = y as i64 - sy as i64;
            let d = dx * dx + dy * dy;
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }
}

impl Configurable for Voronoi {
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

impl Pattern for Voronoi {
    fn bounds(&self) -> Rect {
        self.base.bounds
    }

    fn color_model(&self) -> ColorModel {
        self.base.model
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        match self.nearest_seed(x, y) {
            Some(i) => self.palette.get_wrapped(i),
            None => Color::TRANSPARENT,
        }
    }
}
