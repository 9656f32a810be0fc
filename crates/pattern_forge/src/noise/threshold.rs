//! Threshold matrices for ordered dithering.
//!
//! A [`ThresholdMatrix`] stores integer ranks `0..N²`. Knoll dithering indexes
//! candidate lists by [`ThresholdMatrix::rank`]; ordered dithering shifts colors
//! by [`ThresholdMatrix::centered`].
use std::cmp::Ordering;
use std::f64::consts::TAU;

use tracing::warn;

use crate::error::{Error, Result};
use crate::geom::positive_mod_i64;

/// Side length used when a caller asks for a non-positive matrix size.
pub const DEFAULT_MATRIX_SIZE: usize = 8;

/// Square table of ranks, tiled over the plane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThresholdMatrix {
    size: usize,
    ranks: Vec<u32>,
}

impl ThresholdMatrix {
    /// Creates a matrix from row-major ranks; every rank must be below `size²`.
    pub fn new(size: usize, ranks: Vec<u32>) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidConfig("threshold matrix size is zero".into()));
        }
        let cells = size * size;
        if ranks.len() != cells {
            return Err(Error::InvalidConfig(format!(
                "threshold matrix of side {size} needs {cells} ranks, got {}",
                ranks.len()
            )));
        }
        if let Some(bad) = ranks.iter().find(|&&r| r as usize >= cells) {
            return Err(Error::InvalidConfig(format!(
                "threshold rank {bad} out of range for side {size}"
            )));
        }
        Ok(Self { size, ranks })
    }

    /// Recursive Bayer matrix. Sizes round up to a power of two; zero becomes 1.
    pub fn bayer(size: usize) -> Self {
        let target = size.max(1).next_power_of_two();
        let mut ranks = vec![0u32];
        let mut k = 1usize;
        while k < target {
            let n = k * 2;
            let mut next = vec![0u32; n * n];
            for y in 0..n {
                for x in 0..n {
                    let corner = BAYER_CORNERS[y / k][x / k];
                    next[y * n + x] = 4 * ranks[(y % k) * k + (x % k)] + corner;
                }
            }
            ranks = next;
            k = n;
        }
        Self {
            size: target,
            ranks,
        }
    }

    /// Clustered-dot halftone cell: the spot function
    /// `cos(2π(x+½)/N) + cos(2π(y+½)/N)` ranked ascending (ties by index), so
    /// the lowest ranks sit at the cell center and dots grow outward.
    pub fn halftone(size: usize) -> Self {
        let n = size.max(1);
        let spot = |i: usize| {
            let x = (i % n) as f64 + 0.5;
            let y = (i / n) as f64 + 0.5;
            (TAU * x / n as f64).cos() + (TAU * y / n as f64).cos()
        };
        let mut order: Vec<usize> = (0..n * n).collect();
        order.sort_by(|&a, &b| {
            spot(a)
                .partial_cmp(&spot(b))
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });
        Self::from_order(n, &order)
    }

    /// Builds ranks from a grant order: `order[r]` is the cell that gets rank `r`.
    pub(crate) fn from_order(size: usize, order: &[usize]) -> Self {
        let mut ranks = vec![0u32; size * size];
        for (rank, &cell) in order.iter().enumerate() {
            ranks[cell] = rank as u32;
        }
        Self { size, ranks }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells, `size²`.
    pub fn cells(&self) -> usize {
        self.ranks.len()
    }

    pub fn ranks(&self) -> &[u32] {
        &self.ranks
    }

    /// Integer rank at `(x, y)`, tiled with positive modulo.
    #[inline]
    pub fn rank(&self, x: i32, y: i32) -> u32 {
        let n = self.size as i64;
        let mx = positive_mod_i64(x as i64, n) as usize;
        let my = positive_mod_i64(y as i64, n) as usize;
        self.ranks[my * self.size + mx]
    }

    /// Normalized rank in `[0, 1)`.
    #[inline]
    pub fn value(&self, x: i32, y: i32) -> f64 {
        self.rank(x, y) as f64 / self.cells() as f64
    }

    /// Cell-centered threshold `(rank + ½) / N²`, symmetric about one half.
    #[inline]
    pub fn centered(&self, x: i32, y: i32) -> f64 {
        (self.rank(x, y) as f64 + 0.5) / self.cells() as f64
    }

    /// Whether the ranks are exactly `0..size²` once each.
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.cells()];
        for &r in &self.ranks {
            match seen.get_mut(r as usize) {
                Some(s) if !*s => *s = true,
                _ => return false,
            }
        }
        true
    }
}

/// Quadrant offsets indexed `[y][x]`. Row 0 of every level reads 0, 3, so a
/// single row already spans the full threshold range.
const BAYER_CORNERS: [[u32; 2]; 2] = [[0, 3], [2, 1]];

/// Replaces a non-positive requested size by [`DEFAULT_MATRIX_SIZE`].
pub(crate) fn matrix_size_or_default(size: i32) -> usize {
    if size > 0 {
        size as usize
    } else {
        warn!(
            "Dither size {} replaced by default {}.",
            size, DEFAULT_MATRIX_SIZE
        );
        DEFAULT_MATRIX_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bayer_two_and_four() {
        assert_eq!(ThresholdMatrix::bayer(2).ranks(), &[0, 3, 2, 1]);
        assert_eq!(
            ThresholdMatrix::bayer(4).ranks(),
            &[0, 12, 3, 15, 8, 4, 11, 7, 2, 14, 1, 13, 10, 6, 9, 5]
        );
    }

    #[test]
    fn bayer_is_a_permutation_for_powers_of_two() {
        for k in 0..7 {
            let m = ThresholdMatrix::bayer(1 << k);
            assert_eq!(m.size(), 1 << k);
            assert!(m.is_permutation(), "size {}", 1 << k);
        }
    }

    #[test]
    fn bayer_rounds_up_odd_sizes() {
        assert_eq!(ThresholdMatrix::bayer(0).size(), 1);
        assert_eq!(ThresholdMatrix::bayer(3).size(), 4);
        assert_eq!(ThresholdMatrix::bayer(5).size(), 8);
    }

    #[test]
    fn lookups_tile_with_positive_modulo() {
        let m = ThresholdMatrix::bayer(4);
        assert_eq!(m.rank(-1, -1), m.rank(3, 3));
        assert_eq!(m.rank(4, 0), m.rank(0, 0));
        assert_eq!(m.value(1, 0), 12.0 / 16.0);
        assert_eq!(m.centered(0, 0), 0.5 / 16.0);
    }

    #[test]
    fn halftone_grows_from_the_center() {
        let m = ThresholdMatrix::halftone(8);
        assert!(m.is_permutation());
        let center = m.rank(3, 3).min(m.rank(4, 4));
        assert!(center < 4);
        let corner = m.rank(0, 0).max(m.rank(7, 7));
        assert!(corner >= 60);
    }

    #[test]
    fn new_validates_ranks() {
        assert!(ThresholdMatrix::new(2, vec![0, 1, 2, 3]).is_ok());
        assert!(ThresholdMatrix::new(2, vec![0, 1, 2]).is_err());
        assert!(ThresholdMatrix::new(2, vec![0, 1, 2, 4]).is_err());
        assert!(ThresholdMatrix::new(0, vec![]).is_err());
        let dup = ThresholdMatrix::new(2, vec![0, 0, 1, 2]).unwrap();
        assert!(!dup.is_permutation());
    }

    #[test]
    fn non_positive_sizes_fall_back() {
        assert_eq!(matrix_size_or_default(4), 4);
        assert_eq!(matrix_size_or_default(-2), DEFAULT_MATRIX_SIZE);
        assert_eq!(matrix_size_or_default(0), DEFAULT_MATRIX_SIZE);
    }
}
