//! Color types and mixing utilities.
//!
//! [`Color`] is the user-facing 8-bit color in straight alpha. Mixing, blending and
//! interpolation happen in [`Premul16`], a 16-bit premultiplied representation, so
//! that transparent colors do not bleed their RGB channels into the result.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Rec.601 luma weights.
pub const LUMA_R: f64 = 0.299;
pub const LUMA_G: f64 = 0.587;
pub const LUMA_B: f64 = 0.114;

/// An 8-bit RGBA color with straight (non-premultiplied) alpha.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Opaque gray.
    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// Opaque gray from a value in `[0, 1]` (clamped).
    pub fn gray_f(v: f64) -> Self {
        Self::gray(unit_to_u8(v))
    }

    /// Converts HSV to an opaque sRGB color. `h` is in degrees, `s` and `v` in `[0, 1]`.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let h = crate::geom::fmod_positive(h, 360.0) / 60.0;
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        let c = v * s;
        let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = v - c;
        Self::rgb(unit_to_u8(r + m), unit_to_u8(g + m), unit_to_u8(b + m))
    }

    /// Returns the same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Rec.601 luminance of the straight channels in `[0, 1]`.
    #[inline]
    pub fn luminance(&self) -> f64 {
        (LUMA_R * self.r as f64 + LUMA_G * self.g as f64 + LUMA_B * self.b as f64) / 255.0
    }

    /// Rec.601 luminance scaled to `[0, 255]`.
    #[inline]
    pub fn luma255(&self) -> f64 {
        self.luminance() * 255.0
    }

    /// 24-bit RGB key, used by the dither plan caches.
    #[inline]
    pub fn rgb_key(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Converts to 16-bit premultiplied space.
    pub fn to_premul16(self) -> Premul16 {
        let a = self.a as u32 * 257;
        let premul = |c: u8| ((c as u32 * 257 * a + 32767) / 65535) as u16;
        Premul16 {
            r: premul(self.r),
            g: premul(self.g),
            b: premul(self.b),
            a: a as u16,
        }
    }

    /// Returns the 8-bit premultiplied form of this color.
    pub fn premultiplied(self) -> Color {
        let premul = |c: u8| ((c as u32 * self.a as u32 + 127) / 255) as u8;
        Color::new(premul(self.r), premul(self.g), premul(self.b), self.a)
    }

    /// Interprets `self` as 8-bit premultiplied and returns the straight form.
    pub fn unpremultiplied(self) -> Color {
        if self.a == 0 {
            return Color::TRANSPARENT;
        }
        let a = self.a as u32;
        let unpremul = |c: u8| ((c as u32 * 255 + a / 2) / a).min(255) as u8;
        Color::new(unpremul(self.r), unpremul(self.g), unpremul(self.b), self.a)
    }

    /// Channels as `f64` in `[0, 255]`.
    #[inline]
    pub fn to_f64(self) -> [f64; 4] {
        [self.r as f64, self.g as f64, self.b as f64, self.a as f64]
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(px: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        Color::new(r, g, b, a)
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(c: Color) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

impl From<[u8; 4]> for Color {
    fn from(v: [u8; 4]) -> Self {
        Color::new(v[0], v[1], v[2], v[3])
    }
}

impl From<[u8; 3]> for Color {
    fn from(v: [u8; 3]) -> Self {
        Color::rgb(v[0], v[1], v[2])
    }
}

/// A 16-bit premultiplied color: every channel is already scaled by alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Premul16 {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Premul16 {
    pub const TRANSPARENT: Premul16 = Premul16 {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Converts back to straight 8-bit.
    pub fn to_color(self) -> Color {
        if self.a == 0 {
            return Color::TRANSPARENT;
        }
        let a = self.a as u32;
        let straight = |c: u16| {
            let c16 = ((c as u32).min(a) * 65535 + a / 2) / a;
            ((c16 + 128) / 257) as u8
        };
        Color::new(
            straight(self.r),
            straight(self.g),
            straight(self.b),
            ((a + 128) / 257) as u8,
        )
    }

    /// Source-over: `self` composited on top of `dst`.
    pub fn over(self, dst: Premul16) -> Premul16 {
        let inv = 65535 - self.a as u32;
        let mix = |s: u16, d: u16| (s as u32 + (d as u32 * inv + 32767) / 65535).min(65535) as u16;
        Premul16 {
            r: mix(self.r, dst.r),
            g: mix(self.g, dst.g),
            b: mix(self.b, dst.b),
            a: mix(self.a, dst.a),
        }
    }

    /// Scales every channel (alpha included) by `t` in `[0, 1]`.
    pub fn scale(self, t: f64) -> Premul16 {
        let t = t.clamp(0.0, 1.0);
        let s = |c: u16| (c as f64 * t).round() as u16;
        Premul16 {
            r: s(self.r),
            g: s(self.g),
            b: s(self.b),
            a: s(self.a),
        }
    }

    #[inline]
    pub fn to_f64(self) -> [f64; 4] {
        [self.r as f64, self.g as f64, self.b as f64, self.a as f64]
    }

    /// Builds a premultiplied color from `f64` channels in `[0, 65535]`, keeping
    /// color channels no larger than alpha.
    pub fn from_f64(v: [f64; 4]) -> Premul16 {
        let a = v[3].clamp(0.0, 65535.0).round();
        let c = |x: f64| x.clamp(0.0, a).round() as u16;
        Premul16 {
            r: c(v[0]),
            g: c(v[1]),
            b: c(v[2]),
            a: a as u16,
        }
    }
}

/// Linear interpolation between two colors by `t` in `[0, 1]`, performed in
/// 16-bit premultiplied space.
pub fn lerp(a: Color, b: Color, t: f64) -> Color {
    if !t.is_finite() || t <= 0.0 {
        return a;
    }
    if t >= 1.0 {
        return b;
    }
    let pa = a.to_premul16().to_f64();
    let pb = b.to_premul16().to_f64();
    let mut out = [0.0; 4];
    for i in 0..4 {
        out[i] = pa[i] + (pb[i] - pa[i]) * t;
    }
    Premul16::from_f64(out).to_color()
}

/// Source-over compositing of straight colors.
pub fn over(top: Color, bottom: Color) -> Color {
    if top.a == 255 {
        return top;
    }
    if top.a == 0 {
        return bottom;
    }
    top.to_premul16().over(bottom.to_premul16()).to_color()
}

/// Maps a value in `[0, 1]` to `[0, 255]` with rounding; NaN maps to 0.
#[inline]
pub fn unit_to_u8(v: f64) -> u8 {
    clamp_u8(v * 255.0)
}

/// Rounds and clamps a value to `[0, 255]`; NaN maps to 0.
#[inline]
pub fn clamp_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Squared RGB distance between two colors (alpha ignored).
#[inline]
pub fn rgb_distance_sq(a: Color, b: Color) -> i64 {
    let dr = a.r as i64 - b.r as i64;
    let dg = a.g as i64 - b.g as i64;
    let db = a.b as i64 - b.b as i64;
    dr * dr + dg * dg + db * db
}

/// An ordered, non-empty list of colors.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Creates a palette; an empty list is replaced by black and white.
    pub fn new(colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            warn!("Empty palette replaced by black and white.");
            return Self::black_white();
        }
        Self { colors }
    }

    pub fn black_white() -> Self {
        Self {
            colors: vec![Color::BLACK, Color::WHITE],
        }
    }

    /// Evenly spaced opaque grays from black to white (`levels` clamped to `2..=256`).
    pub fn grayscale(levels: usize) -> Self {
        let levels = levels.clamp(2, 256);
        let colors = (0..levels)
            .map(|i| Color::gray_f(i as f64 / (levels - 1) as f64))
            .collect();
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color at `index` modulo the palette length.
    #[inline]
    pub fn get_wrapped(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    /// Index of the nearest color by squared RGB distance; the earliest wins ties.
    pub fn nearest_index(&self, c: Color) -> usize {
        let mut best = 0;
        let mut best_d = i64::MAX;
        for (i, p) in self.colors.iter().enumerate() {
            let d = rgb_distance_sq(c, *p);
            if d < best_d {
                best_d = d;
                best = i;
            }
        }
        best
    }

    /// Nearest color by squared RGB distance.
    pub fn nearest(&self, c: Color) -> Color {
        self.colors[self.nearest_index(c)]
    }

    /// Indices of the palette sorted by ascending luminance (stable).
    pub fn indices_by_luma(&self) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..self.colors.len()).collect();
        idx.sort_by(|&a, &b| {
            self.colors[a]
                .luminance()
                .total_cmp(&self.colors[b].luminance())
        });
        idx
    }

    /// Returns a copy sorted by ascending luminance.
    pub fn sorted_by_luma(&self) -> Palette {
        let colors = self
            .indices_by_luma()
            .into_iter()
            .map(|i| self.colors[i])
            .collect();
        Palette { colors }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::black_white()
    }
}

impl From<Vec<Color>> for Palette {
    fn from(colors: Vec<Color>) -> Self {
        Palette::new(colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premul_roundtrip_is_lossless_for_opaque() {
        for v in [0u8, 1, 77, 128, 254, 255] {
            let c = Color::rgb(v, 255 - v, v / 2);
            assert_eq!(c.to_premul16().to_color(), c);
        }
    }

    #[test]
    fn premul_roundtrip_keeps_half_alpha_close() {
        let c = Color::new(200, 100, 50, 128);
        let back = c.to_premul16().to_color();
        assert_eq!(back.a, 128);
        assert!((back.r as i32 - 200).abs() <= 1);
        assert!((back.g as i32 - 100).abs() <= 1);
        assert!((back.b as i32 - 50).abs() <= 1);
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        assert_eq!(lerp(Color::BLACK, Color::WHITE, 0.0), Color::BLACK);
        assert_eq!(lerp(Color::BLACK, Color::WHITE, 1.0), Color::WHITE);
        let mid = lerp(Color::BLACK, Color::WHITE, 0.5);
        assert!((mid.r as i32 - 128).abs() <= 1);
        assert_eq!(mid.a, 255);
    }

    #[test]
    fn lerp_toward_transparent_does_not_darken() {
        let mid = lerp(Color::RED, Color::TRANSPARENT, 0.5);
        assert_eq!(mid.r, 255);
        assert!((mid.a as i32 - 128).abs() <= 1);
    }

    #[test]
    fn luminance_uses_rec601() {
        assert!((Color::WHITE.luminance() - 1.0).abs() < 1e-9);
        assert!((Color::RED.luminance() - 0.299).abs() < 1e-9);
        assert!((Color::GREEN.luminance() - 0.587).abs() < 1e-9);
        assert!((Color::BLUE.luminance() - 0.114).abs() < 1e-9);
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0), Color::RED);
        assert_eq!(Color::from_hsv(120.0, 1.0, 1.0), Color::GREEN);
        assert_eq!(Color::from_hsv(240.0, 1.0, 1.0), Color::BLUE);
        assert_eq!(Color::from_hsv(-120.0, 1.0, 1.0), Color::BLUE);
        assert_eq!(Color::from_hsv(42.0, 0.0, 1.0), Color::WHITE);
    }

    #[test]
    fn straight_premultiplied_conversions() {
        let c = Color::new(255, 128, 0, 128);
        let p = c.premultiplied();
        assert_eq!(p, Color::new(128, 64, 0, 128));
        let back = p.unpremultiplied();
        assert_eq!(back.a, 128);
        assert_eq!(back.r, 255);
        assert_eq!(Color::new(9, 9, 9, 0).unpremultiplied(), Color::TRANSPARENT);
    }

    #[test]
    fn over_composites_half_alpha() {
        let top = Color::new(255, 255, 255, 128);
        let out = over(top, Color::BLACK);
        assert_eq!(out.a, 255);
        assert!((out.r as i32 - 128).abs() <= 1);
        assert_eq!(over(Color::TRANSPARENT, Color::RED), Color::RED);
    }

    #[test]
    fn empty_palette_falls_back_to_black_white() {
        let p = Palette::new(Vec::new());
        assert_eq!(p.colors(), &[Color::BLACK, Color::WHITE]);
    }

    #[test]
    fn nearest_prefers_earliest_on_ties() {
        let p = Palette::new(vec![Color::BLACK, Color::WHITE]);
        assert_eq!(p.nearest(Color::gray(10)), Color::BLACK);
        assert_eq!(p.nearest(Color::gray(200)), Color::WHITE);
        // 127.5 is unreachable; 127 and 128 land on either side.
        assert_eq!(p.nearest(Color::gray(127)), Color::BLACK);
        assert_eq!(p.nearest(Color::gray(128)), Color::WHITE);
    }

    #[test]
    fn sorted_by_luma_orders_ascending() {
        let p = Palette::new(vec![Color::WHITE, Color::BLUE, Color::RED]);
        let sorted = p.sorted_by_luma();
        assert_eq!(sorted.colors(), &[Color::BLUE, Color::RED, Color::WHITE]);
    }
}
