//! Threshold sources shared by the dither family.
use std::sync::Arc;

use crate::hash::hash_float;
use crate::noise::blue_noise::blue_noise;
use crate::noise::threshold::{matrix_size_or_default, ThresholdMatrix};
use crate::pattern::Pattern;

/// Gain applied to the local luminance difference before it selects between
/// the fine and coarse matrices of a multi-scale source.
pub const EDGE_GAIN: f64 = 4.0;

/// Where a dither takes its per-pixel threshold from.
///
/// Sizes are matrix side lengths; non-positive sizes fall back to
/// [`crate::noise::threshold::DEFAULT_MATRIX_SIZE`].
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum ThresholdSource {
    /// Recursive Bayer matrix (sizes round up to a power of two).
    Bayer(i32),
    /// Clustered-dot halftone cell.
    Halftone(i32),
    /// Blue-noise mask from the shared cache.
    BlueNoise { size: i32, seed: u64 },
    /// White noise hashed at `(x, y, seed)`.
    Random { seed: u64 },
    /// A caller-supplied matrix.
    Matrix(Arc<ThresholdMatrix>),
    /// Two Bayer matrices blended per pixel by local contrast: edges use the
    /// fine matrix, flat areas the coarse one.
    MultiScale { fine: i32, coarse: i32 },
}

impl Default for ThresholdSource {
    fn default() -> Self {
        ThresholdSource::Bayer(8)
    }
}

impl ThresholdSource {
    /// Replaces the seed of seeded sources; others are returned unchanged.
    pub fn with_seed(self, seed: u64) -> Self {
        match self {
            ThresholdSource::BlueNoise { size, .. } => ThresholdSource::BlueNoise { size, seed },
            ThresholdSource::Random { .. } => ThresholdSource::Random { seed },
            other => other,
        }
    }

    /// Builds (or fetches) the matrices this source needs.
    pub fn resolve(&self) -> Threshold {
        match self {
            ThresholdSource::Bayer(n) => {
                Threshold::Matrix(Arc::new(ThresholdMatrix::bayer(matrix_size_or_default(*n))))
            }
            ThresholdSource::Halftone(n) => Threshold::Matrix(Arc::new(ThresholdMatrix::halftone(
                matrix_size_or_default(*n),
            ))),
            ThresholdSource::BlueNoise { size, seed } => {
                Threshold::Matrix(blue_noise(matrix_size_or_default(*size), *seed))
            }
            ThresholdSource::Random { seed } => Threshold::Random(*seed),
            ThresholdSource::Matrix(m) => Threshold::Matrix(Arc::clone(m)),
            ThresholdSource::MultiScale { fine, coarse } => Threshold::MultiScale {
                fine: Arc::new(ThresholdMatrix::bayer(matrix_size_or_default(*fine))),
                coarse: Arc::new(ThresholdMatrix::bayer(matrix_size_or_default(*coarse))),
            },
        }
    }
}

/// A resolved threshold field with values in `[0, 1)`.
#[derive(Clone, Debug)]
pub enum Threshold {
    Matrix(Arc<ThresholdMatrix>),
    Random(u64),
    MultiScale {
        fine: Arc<ThresholdMatrix>,
        coarse: Arc<ThresholdMatrix>,
    },
}

impl Threshold {
    /// Threshold at `(x, y)`. Matrix cells use the centered value
    /// `(rank + ½) / N²`; `edge` is only evaluated by multi-scale sources.
    #[inline]
    pub fn level(&self, x: i32, y: i32, edge: impl FnOnce() -> f64) -> f64 {
        match self {
            Threshold::Matrix(m) => m.centered(x, y),
            Threshold::Random(seed) => hash_float(x, y, *seed),
            Threshold::MultiScale { fine, coarse } => {
                let e = edge().clamp(0.0, 1.0);
                e * fine.centered(x, y) + (1.0 - e) * coarse.centered(x, y)
            }
        }
    }
}

/// Largest absolute luminance difference between `(x, y)` and its four
/// neighbors, scaled by [`EDGE_GAIN`].
pub fn local_contrast(src: &dyn Pattern, x: i32, y: i32) -> f64 {
    let center = src.sample(x, y).luminance();
    [(0, -1), (0, 1), (-1, 0), (1, 0)]
        .iter()
        .map(|&(dx, dy)| {
            (src.sample(x.wrapping_add(dx), y.wrapping_add(dy)).luminance() - center).abs()
        })
        .fold(0.0, f64::max)
        * EDGE_GAIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::pattern::testing::Ramp;
    use crate::primitives::Uniform;

    #[test]
    fn matrix_levels_are_centered() {
        let t = ThresholdSource::Bayer(2).resolve();
        let levels: Vec<f64> = [(0, 0), (1, 0), (0, 1), (1, 1)]
            .iter()
            .map(|&(x, y)| t.level(x, y, || 0.0))
            .collect();
        assert_eq!(levels, vec![0.125, 0.875, 0.625, 0.375]);
    }

    #[test]
    fn non_positive_size_uses_default() {
        match ThresholdSource::Halftone(-3).resolve() {
            Threshold::Matrix(m) => assert_eq!(m.size(), 8),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn seed_replaces_only_seeded_sources() {
        match (ThresholdSource::Random { seed: 1 }).with_seed(9) {
            ThresholdSource::Random { seed } => assert_eq!(seed, 9),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            ThresholdSource::Bayer(4).with_seed(9),
            ThresholdSource::Bayer(4)
        ));
    }

    #[test]
    fn random_levels_are_unit_interval() {
        let t = ThresholdSource::Random { seed: 3 }.resolve();
        for i in 0..200 {
            let v = t.level(i, -i, || 0.0);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn multi_scale_picks_matrix_by_edge() {
        let t = ThresholdSource::MultiScale { fine: 2, coarse: 8 }.resolve();
        let fine = ThresholdMatrix::bayer(2);
        let coarse = ThresholdMatrix::bayer(8);
        assert_eq!(t.level(3, 5, || 1.0), fine.centered(3, 5));
        assert_eq!(t.level(3, 5, || 0.0), coarse.centered(3, 5));
    }

    #[test]
    fn contrast_is_zero_on_flat_sources() {
        let flat = Uniform::new(Color::GRAY);
        assert_eq!(local_contrast(&flat, 4, 4), 0.0);
        let ramp = Ramp {
            bounds: crate::geom::Rect::from_size(256, 1),
        };
        assert!(local_contrast(&ramp, 10, 0) > 0.0);
    }
}
