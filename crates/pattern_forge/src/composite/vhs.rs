//! Analog tape look: chroma bleed, scanlines, grain and a tracking band.
use crate::color::{clamp_u8, Color};
use crate::geom::{positive_mod, Rect};
use crate::hash::hash_float;
use crate::pattern::{Configurable, Pattern, PatternOption, PatternRef};

pub const DEFAULT_CHROMA_OFFSET: i32 = 2;
pub const DEFAULT_SCANLINE_DARKNESS: f64 = 0.25;
pub const DEFAULT_NOISE: f64 = 0.06;
pub const DEFAULT_BAND_HEIGHT: i32 = 6;
pub const DEFAULT_BAND_SHIFT: i32 = 8;

/// Source seen through a worn tape.
///
/// - Red is read `chroma_offset` pixels to the right, blue as far to the left.
/// - Odd rows are darkened by `scanline_darkness`.
/// - Each channel gets hashed grain of amplitude `noise · 255`.
/// - Rows `[band_y, band_y + band_height)` (repeating every bounds height) are
///   shifted right by `band_shift`.
#[derive(Clone, Debug)]
pub struct VhsOverlay {
    source: PatternRef,
    chroma_offset: i32,
    scanline_darkness: f64,
    noise: f64,
    seed: u64,
    band_y: i32,
    band_height: i32,
    band_shift: i32,
}

impl VhsOverlay {
    pub fn new(source: PatternRef) -> Self {
        let band_y = source.bounds().min_y + source.bounds().height() / 3;
        Self {
            source,
            chroma_offset: DEFAULT_CHROMA_OFFSET,
            scanline_darkness: DEFAULT_SCANLINE_DARKNESS,
            noise: DEFAULT_NOISE,
            seed: 0,
            band_y,
            band_height: DEFAULT_BAND_HEIGHT,
            band_shift: DEFAULT_BAND_SHIFT,
        }
    }

    pub fn with_chroma_offset(mut self, offset: i32) -> Self {
        self.chroma_offset = offset;
        self
    }

    /// Darkening of odd rows, clamped to `[0, 1]`.
    pub fn with_scanlines(mut self, darkness: f64) -> Self {
        self.scanline_darkness = if darkness.is_nan() {
            DEFAULT_SCANLINE_DARKNESS
        } else {
            darkness.clamp(0.0, 1.0)
        };
        self
    }

    /// Grain amplitude as a fraction of full scale.
    pub fn with_noise(mut self, noise: f64, seed: u64) -> Self {
        self.noise = if noise.is_finite() { noise.max(0.0) } else { 0.0 };
        self.seed = seed;
        self
    }

    /// Tracking band position, height and horizontal shift.
    pub fn with_band(mut self, y: i32, height: i32, shift: i32) -> Self {
        self.band_y = y;
        self.band_height = height.max(0);
        self.band_shift = shift;
        self
    }

    fn in_band(&self, y: i32) -> bool {
        if self.band_height == 0 {
            return false;
        }
        let period = self.source.bounds().height();
        let dy = if period > 0 {
            positive_mod(y.wrapping_sub(self.band_y), period)
        } else {
            y.wrapping_sub(self.band_y)
        };
        dy >= 0 && dy < self.band_height
    }
}

impl Configurable for VhsOverlay {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Seed(s) => self.seed = *s,
            PatternOption::LineSize(v) => self.chroma_offset = *v,
            PatternOption::Phase(p) => self.band_y = *p as i32,
            _ => return false,
        }
        true
    }
}

impl Pattern for VhsOverlay {
    fn bounds(&self) -> Rect {
        self.source.bounds()
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let x = if self.in_band(y) {
            x.wrapping_sub(self.band_shift)
        } else {
            x
        };
        let center = self.source.sample(x, y);
        let red = self.source.sample(x.wrapping_add(self.chroma_offset), y).r;
        let blue = self.source.sample(x.wrapping_sub(self.chroma_offset), y).b;

        let shade = if y.rem_euclid(2) == 1 {
            1.0 - self.scanline_darkness
        } else {
            1.0
        };
        let grain = if self.noise > 0.0 {
            (hash_float(x, y, self.seed) - 0.5) * 2.0 * self.noise * 255.0
        } else {
            0.0
        };
        let channel = |v: u8| clamp_u8(v as f64 * shade + grain);
        Color::new(channel(red), channel(center.g), channel(blue), center.a)
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::testing::Coords;

    fn coords() -> PatternRef {
        Coords {
            bounds: Rect::from_size(64, 64),
        }
        .shared()
    }

    fn clean(src: PatternRef) -> VhsOverlay {
        VhsOverlay::new(src)
            .with_chroma_offset(0)
            .with_scanlines(0.0)
            .with_noise(0.0, 0)
            .with_band(0, 0, 0)
    }

    #[test]
    fn neutral_settings_are_identity() {
        let src = coords();
        let v = clean(src.clone());
        for (x, y) in [(0, 0), (5, 9), (63, 31)] {
            assert_eq!(v.sample(x, y), src.sample(x, y));
        }
    }

    #[test]
    fn chroma_channels_are_offset() {
        let src = coords();
        let v = clean(src.clone()).with_chroma_offset(2);
        let c = v.sample(10, 4);
        assert_eq!(c.r, src.sample(12, 4).r);
        assert_eq!(c.g, src.sample(10, 4).g);
        assert_eq!(c.b, src.sample(8, 4).b);
    }

    #[test]
    fn odd_rows_are_darker() {
        let src = crate::primitives::Uniform::new(Color::WHITE).shared();
        let v = clean(src).with_scanlines(0.5);
        assert_eq!(v.sample(0, 0), Color::WHITE);
        assert_eq!(v.sample(0, 1), Color::new(128, 128, 128, 255));
    }

    #[test]
    fn tracking_band_shifts_rows() {
        let src = coords();
        let v = clean(src.clone()).with_band(10, 2, 5);
        assert_eq!(v.sample(20, 10), src.sample(15, 10));
        assert_eq!(v.sample(20, 11), src.sample(15, 11));
        assert_eq!(v.sample(20, 12), src.sample(20, 12));
        // The band repeats with the source height.
        assert_eq!(v.sample(20, 74), src.sample(15, 74));
    }

    #[test]
    fn grain_is_seeded() {
        let src = crate::primitives::Uniform::new(Color::GRAY).shared();
        let a = clean(src.clone()).with_noise(0.1, 1);
        let b = clean(src).with_noise(0.1, 1);
        let mut varied = false;
        for x in 0..32 {
            assert_eq!(a.sample(x, 0), b.sample(x, 0));
            varied |= a.sample(x, 0) != Color::GRAY;
        }
        assert!(varied);
    }
}
