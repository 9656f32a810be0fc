//! Yliluoma's positional dithering.
//!
//! Both variants build a plan per distinct input color (cached by RGB) and
//! pick from it with the threshold at each pixel:
//!
//! - [`Yliluoma1`] mixes the best pair of palette colors at a ratio.
//! - [`Yliluoma2`] keeps a luma-sorted list of palette indices whose average
//!   approximates the target.
use std::sync::Arc;

use tracing::trace;

use crate::color::{Color, Palette, LUMA_B, LUMA_G, LUMA_R};
use crate::dither::plan_cache::PlanCache;
use crate::dither::source::{local_contrast, Threshold, ThresholdSource};
use crate::geom::Rect;
use crate::pattern::{ColorModel, Configurable, Pattern, PatternOption, PatternRef};

/// Longest candidate list built by [`Yliluoma2`]. Building a list costs
/// `O(len² · |palette|)`, so larger matrices share 64 list slots.
pub const MAX_PLAN_LEN: usize = 64;

/// Weight of the pair-distance penalty in [`Yliluoma1`].
const PAIR_PENALTY: f64 = 0.1;

type Rgb = [f64; 3];

fn rgb(c: Color) -> Rgb {
    [c.r as f64, c.g as f64, c.b as f64]
}

fn luma(c: &Rgb) -> f64 {
    c[0] * LUMA_R + c[1] * LUMA_G + c[2] * LUMA_B
}

/// Perceptual color distance: weighted channel error plus squared luma error.
pub fn color_compare(a: &Rgb, b: &Rgb) -> f64 {
    let (dr, dg, db) = (a[0] - b[0], a[1] - b[1], a[2] - b[2]);
    let dl = luma(a) - luma(b);
    0.75 * (dr * dr * LUMA_R + dg * dg * LUMA_G + db * db * LUMA_B) + dl * dl
}

/// Pair plan: `high` is shown where the threshold is below `ratio`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MixPlan {
    pub low: usize,
    pub high: usize,
    pub ratio: f64,
}

impl MixPlan {
    /// Searches every palette pair for the mix closest to `target`.
    pub fn build(palette: &Palette, target: Color) -> Self {
        let t = rgb(target);
        let colors: Vec<Rgb> = palette.colors().iter().copied().map(rgb).collect();
        let mut best = MixPlan {
            low: 0,
            high: 0,
            ratio: 0.0,
        };
        let mut least = f64::INFINITY;
        for (i, ci) in colors.iter().enumerate() {
            for (j, cj) in colors.iter().enumerate().skip(i) {
                let d = [cj[0] - ci[0], cj[1] - ci[1], cj[2] - ci[2]];
                let len2 = d[0] * d[0] + d[1] * d[1] + d[2] * d[2];
                let ratio = if len2 > 0.0 {
                    let proj = (t[0] - ci[0]) * d[0] + (t[1] - ci[1]) * d[1] + (t[2] - ci[2]) * d[2];
                    (proj / len2).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let mix = [
                    ci[0] + ratio * d[0],
                    ci[1] + ratio * d[1],
                    ci[2] + ratio * d[2],
                ];
                let penalty = color_compare(&t, &mix)
                    + PAIR_PENALTY * color_compare(ci, cj) * ((ratio - 0.5).abs() + 0.5);
                if penalty < least {
                    least = penalty;
                    best = MixPlan {
                        low: i,
                        high: j,
                        ratio,
                    };
                }
            }
        }
        best
    }

    #[inline]
    pub fn pick(&self, level: f64) -> usize {
        if level < self.ratio {
            self.high
        } else {
            self.low
        }
    }
}

/// Candidate list plan: palette indices sorted by luma.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListPlan {
    pub indices: Vec<usize>,
}

impl ListPlan {
    /// Grows the list greedily, trying each color at doubling multiplicities,
    /// until it holds `len` entries.
    pub fn build(palette: &Palette, target: Color, len: usize) -> Self {
        let t = rgb(target);
        let colors: Vec<Rgb> = palette.colors().iter().copied().map(rgb).collect();
        let len = len.max(1);
        let mut indices = Vec::with_capacity(len);
        let mut sum = [0.0; 3];
        while indices.len() < len {
            let total = indices.len();
            let max_count = total.max(1);
            let mut least = f64::INFINITY;
            let (mut chosen, mut amount) = (0, 1);
            for (i, c) in colors.iter().enumerate() {
                let mut count = 1;
                while count <= max_count {
                    let n = (total + count) as f64;
                    let k = count as f64;
                    let test = [
                        (sum[0] + c[0] * k) / n,
                        (sum[1] + c[1] * k) / n,
                        (sum[2] + c[2] * k) / n,
                    ];
                    let penalty = color_compare(&t, &test);
                    if penalty < least {
                        least = penalty;
                        chosen = i;
                        amount = count;
                    }
                    count *= 2;
                }
            }
            let amount = amount.min(len - total);
            for (s, c) in sum.iter_mut().zip(colors[chosen]) {
                *s += c * amount as f64;
            }
            indices.extend(std::iter::repeat_n(chosen, amount));
        }
        indices.sort_by(|&a, &b| luma(&colors[a]).total_cmp(&luma(&colors[b])));
        Self { indices }
    }

    #[inline]
    pub fn pick(&self, level: f64) -> usize {
        let n = self.indices.len();
        let i = ((level * n as f64) as usize).min(n - 1);
        self.indices[i]
    }
}

/// Shared state of both Yliluoma variants.
#[derive(Clone, Debug)]
struct Positional<P> {
    source: PatternRef,
    palette: Palette,
    kind: ThresholdSource,
    threshold: Threshold,
    plans: PlanCache<P>,
}

impl<P> Positional<P> {
    fn new(source: PatternRef, palette: Palette, kind: ThresholdSource) -> Self {
        let threshold = kind.resolve();
        Self {
            source,
            palette,
            kind,
            threshold,
            plans: PlanCache::new(),
        }
    }

    fn apply(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Palette(colors) => {
                self.palette = Palette::new(colors.clone());
                self.plans.clear();
            }
            PatternOption::Seed(seed) => {
                self.kind = self.kind.clone().with_seed(*seed);
                self.threshold = self.kind.resolve();
            }
            _ => return false,
        }
        true
    }

    fn level(&self, x: i32, y: i32) -> f64 {
        self.threshold
            .level(x, y, || local_contrast(self.source.as_ref(), x, y))
    }
}

/// Two-color mixing dither.
#[derive(Clone, Debug)]
pub struct Yliluoma1 {
    inner: Positional<MixPlan>,
}

impl Yliluoma1 {
    pub fn new(source: PatternRef, palette: impl Into<Palette>, kind: ThresholdSource) -> Self {
        Self {
            inner: Positional::new(source, palette.into(), kind),
        }
    }

    /// Plan for `target`, from the cache when present.
    pub fn plan(&self, target: Color) -> MixPlan {
        let palette = &self.inner.palette;
        *self
            .inner
            .plans
            .get_or_insert_with(target.rgb_key(), || {
                trace!(key = target.rgb_key(), "Building mix plan.");
                MixPlan::build(palette, target)
            })
    }

    pub fn cached_plans(&self) -> usize {
        self.inner.plans.len()
    }
}

impl Configurable for Yliluoma1 {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        self.inner.apply(option)
    }
}

impl Pattern for Yliluoma1 {
    fn bounds(&self) -> Rect {
        self.inner.source.bounds()
    }

    fn color_model(&self) -> ColorModel {
        ColorModel::Paletted
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let c = self.inner.source.sample(x, y);
        let index = self.plan(c).pick(self.inner.level(x, y));
        self.inner.palette.get_wrapped(index).with_alpha(c.a)
    }

    fn is_dirty(&self) -> Option<bool> {
        self.inner.source.is_dirty()
    }
}

/// Multi-color blend-list dither.
#[derive(Clone, Debug)]
pub struct Yliluoma2 {
    inner: Positional<ListPlan>,
    plan_len: usize,
}

impl Yliluoma2 {
    /// The list length is the threshold matrix area `N²`, capped at
    /// [`MAX_PLAN_LEN`]. Above the cap each list slot covers `N² / 64`
    /// neighboring threshold levels, so `Bayer(16)` and up mix in steps of
    /// 1/64 rather than `1/N²`. Random thresholds always use the cap.
    pub fn new(source: PatternRef, palette: impl Into<Palette>, kind: ThresholdSource) -> Self {
        let inner = Positional::new(source, palette.into(), kind);
        let cells = match &inner.threshold {
            Threshold::Matrix(m) => m.cells(),
            Threshold::MultiScale { fine, coarse } => fine.cells().max(coarse.cells()),
            Threshold::Random(_) => MAX_PLAN_LEN,
        };
        Self {
            inner,
            plan_len: cells.clamp(1, MAX_PLAN_LEN),
        }
    }

    pub fn plan(&self, target: Color) -> Arc<ListPlan> {
        let palette = &self.inner.palette;
        let len = self.plan_len;
        self.inner
            .plans
            .get_or_insert_with(target.rgb_key(), || ListPlan::build(palette, target, len))
    }

    pub fn cached_plans(&self) -> usize {
        self.inner.plans.len()
    }
}

impl Configurable for Yliluoma2 {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        self.inner.apply(option)
    }
}

impl Pattern for Yliluoma2 {
    fn bounds(&self) -> Rect {
        self.inner.source.bounds()
    }

    fn color_model(&self) -> ColorModel {
        ColorModel::Paletted
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let c = self.inner.source.sample(x, y);
        let index = self.plan(c).pick(self.inner.level(x, y));
        self.inner.palette.get_wrapped(index).with_alpha(c.a)
    }

    fn is_dirty(&self) -> Option<bool> {
        self.inner.source.is_dirty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Uniform;

    fn rgb_palette() -> Palette {
        Palette::new(vec![Color::BLACK, Color::WHITE, Color::RED])
    }

    fn count_white(p: &dyn Pattern) -> usize {
        (0..8)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .filter(|&(x, y)| p.sample(x, y) == Color::WHITE)
            .count()
    }

    #[test]
    fn exact_palette_colors_pass_through() {
        let src = Uniform::new(Color::RED).shared();
        let y1 = Yliluoma1::new(src.clone(), rgb_palette(), ThresholdSource::Bayer(4));
        let y2 = Yliluoma2::new(src, rgb_palette(), ThresholdSource::Bayer(4));
        for (x, y) in [(0, 0), (3, 1), (-5, 7)] {
            assert_eq!(y1.sample(x, y), Color::RED);
            assert_eq!(y2.sample(x, y), Color::RED);
        }
    }

    #[test]
    fn mid_gray_mixes_black_and_white_evenly() {
        let src = Uniform::new(Color::gray(128)).shared();
        let y1 = Yliluoma1::new(src.clone(), Palette::black_white(), ThresholdSource::Bayer(8));
        let plan = y1.plan(Color::gray(128));
        assert_eq!((plan.low, plan.high), (0, 1));
        assert!((plan.ratio - 128.0 / 255.0).abs() < 1e-12);
        assert_eq!(count_white(&y1), 32);

        let y2 = Yliluoma2::new(src, Palette::black_white(), ThresholdSource::Bayer(8));
        assert_eq!(count_white(&y2), 32);
    }

    #[test]
    fn list_length_follows_matrix_area_up_to_the_cap() {
        let src = Uniform::new(Color::gray(100)).shared();
        let len = |kind: ThresholdSource| {
            Yliluoma2::new(src.clone(), Palette::black_white(), kind)
                .plan(Color::gray(100))
                .indices
                .len()
        };
        assert_eq!(len(ThresholdSource::Bayer(4)), 16);
        assert_eq!(len(ThresholdSource::Bayer(8)), 64);
        assert_eq!(len(ThresholdSource::Bayer(16)), MAX_PLAN_LEN);
        assert_eq!(len(ThresholdSource::Random { seed: 4 }), MAX_PLAN_LEN);
    }

    #[test]
    fn list_plan_is_proportional_and_sorted() {
        let palette = Palette::black_white();
        for (g, whites) in [(0u8, 0usize), (64, 16), (128, 32), (192, 48), (255, 64)] {
            let plan = ListPlan::build(&palette, Color::gray(g), 64);
            assert_eq!(plan.indices.len(), 64);
            assert_eq!(plan.indices.iter().filter(|&&i| i == 1).count(), whites, "gray {g}");
            assert!(plan.indices.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn plans_are_cached_per_color() {
        let src = Uniform::new(Color::rgb(10, 20, 30)).shared();
        let y1 = Yliluoma1::new(src, rgb_palette(), ThresholdSource::Bayer(2));
        for x in 0..16 {
            y1.sample(x, 0);
        }
        assert_eq!(y1.cached_plans(), 1);
        let y1 = y1.with_options(&[PatternOption::Palette(vec![Color::BLACK, Color::BLUE])]);
        assert_eq!(y1.cached_plans(), 0);
    }

    #[test]
    fn compare_weights_luma() {
        let black = [0.0, 0.0, 0.0];
        let green = [0.0, 255.0, 0.0];
        let blue = [0.0, 0.0, 255.0];
        assert!(color_compare(&black, &green) > color_compare(&black, &blue));
        assert_eq!(color_compare(&green, &green), 0.0);
    }
}
