//! Height-map derivatives: edge detection, normal map, curvature and ambient
//! occlusion.
//!
//! The source is read as a height field `h = luminance ∈ [0, 1]`. Edge and
//! normal use the 3×3 Sobel kernels; curvature uses the 4-neighbor Laplacian.
use tracing::warn;

use crate::color::{clamp_u8, unit_to_u8, Color};
use crate::geom::Rect;
use crate::pattern::{ColorModel, Configurable, Pattern, PatternOption, PatternRef};

pub const DEFAULT_AO_RADIUS: i32 = 4;
pub const DEFAULT_AO_AMPLIFICATION: f64 = 4.0;
pub const DEFAULT_CURVATURE_GAIN: f64 = 4.0;

#[inline]
fn height(src: &dyn Pattern, x: i32, y: i32) -> f64 {
    src.sample(x, y).luminance()
}

/// Sobel gradient `(Gx, Gy)` of the height field at `(x, y)`.
pub fn sobel(src: &dyn Pattern, x: i32, y: i32) -> (f64, f64) {
    let h = |dx: i32, dy: i32| height(src, x.wrapping_add(dx), y.wrapping_add(dy));
    let (nw, n, ne) = (h(-1, -1), h(0, -1), h(1, -1));
    let (w, e) = (h(-1, 0), h(1, 0));
    let (sw, s, se) = (h(-1, 1), h(0, 1), h(1, 1));
    let gx = (ne + 2.0 * e + se) - (nw + 2.0 * w + sw);
    let gy = (sw + 2.0 * s + se) - (nw + 2.0 * n + ne);
    (gx, gy)
}

/// Gradient magnitude divided by 4 (a full 0 to 1 step), clamped, as gray.
#[derive(Clone, Debug)]
pub struct EdgeDetect {
    source: PatternRef,
}

impl EdgeDetect {
    pub fn new(source: PatternRef) -> Self {
        Self { source }
    }
}

impl Pattern for EdgeDetect {
    fn bounds(&self) -> Rect {
        self.source.bounds()
    }

    fn color_model(&self) -> ColorModel {
        ColorModel::Gray
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let (gx, gy) = sobel(self.source.as_ref(), x, y);
        Color::gray_f(gx.hypot(gy) / 4.0)
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}

/// Tangent-space normal `normalize(−Gx·s, −Gy·s, 1)` packed into RGB.
#[derive(Clone, Debug)]
pub struct NormalMap {
    source: PatternRef,
    strength: f64,
}

impl NormalMap {
    pub fn new(source: PatternRef) -> Self {
        Self {
            source,
            strength: 1.0,
        }
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = if strength.is_finite() { strength } else { 1.0 };
        self
    }
}

impl Pattern for NormalMap {
    fn bounds(&self) -> Rect {
        self.source.bounds()
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let (gx, gy) = sobel(self.source.as_ref(), x, y);
        let (nx, ny, nz) = (-gx * self.strength, -gy * self.strength, 1.0);
        let len = (nx * nx + ny * ny + nz * nz).sqrt();
        let pack = |v: f64| clamp_u8((v / len + 1.0) * 0.5 * 255.0);
        Color::rgb(pack(nx), pack(ny), pack(nz))
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}

/// Discrete Laplacian `4h − hN − hS − hE − hW` as gray around 128: convex
/// areas are brighter, concave darker.
#[derive(Clone, Debug)]
pub struct Curvature {
    source: PatternRef,
    gain: f64,
}

impl Curvature {
    pub fn new(source: PatternRef) -> Self {
        Self {
            source,
            gain: DEFAULT_CURVATURE_GAIN,
        }
    }

    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = if gain.is_finite() {
            gain
        } else {
            DEFAULT_CURVATURE_GAIN
        };
        self
    }
}

impl Pattern for Curvature {
    fn bounds(&self) -> Rect {
        self.source.bounds()
    }

    fn color_model(&self) -> ColorModel {
        ColorModel::Gray
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let src = self.source.as_ref();
        let h = |dx: i32, dy: i32| height(src, x.wrapping_add(dx), y.wrapping_add(dy));
        let lap = 4.0 * h(0, 0) - h(0, -1) - h(0, 1) - h(1, 0) - h(-1, 0);
        Color::gray(clamp_u8(128.0 + 127.0 * (self.gain * lap).clamp(-1.0, 1.0)))
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}

/// Screen-space ambient occlusion from a height field.
///
/// Over the disk of `radius` around the sample, each neighbor higher than the
/// center occludes by `(h_n − h_c) / (1 + dist)`. The mean occlusion times the
/// amplification is subtracted from white.
#[derive(Clone, Debug)]
pub struct AmbientOcclusion {
    source: PatternRef,
    radius: i32,
    amplification: f64,
    offsets: Vec<(i32, i32, f64)>,
}

impl AmbientOcclusion {
    pub fn new(source: PatternRef) -> Self {
        Self {
            source,
            radius: DEFAULT_AO_RADIUS,
            amplification: DEFAULT_AO_AMPLIFICATION,
            offsets: disk_offsets(DEFAULT_AO_RADIUS),
        }
    }

    pub fn with_radius(mut self, radius: i32) -> Self {
        self.set_radius(radius);
        self
    }

    pub fn with_amplification(mut self, amplification: f64) -> Self {
        self.amplification = if amplification.is_finite() {
            amplification
        } else {
            DEFAULT_AO_AMPLIFICATION
        };
        self
    }

    fn set_radius(&mut self, radius: i32) {
        let radius = if radius > 0 {
            radius
        } else {
            warn!(
                "Occlusion radius {} replaced by default {}.",
                radius, DEFAULT_AO_RADIUS
            );
            DEFAULT_AO_RADIUS
        };
        self.radius = radius;
        self.offsets = disk_offsets(radius);
    }
}

/// Offsets inside the disk (center excluded) with their distance.
fn disk_offsets(radius: i32) -> Vec<(i32, i32, f64)> {
    let r2 = radius * radius;
    let mut out = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = dx * dx + dy * dy;
            if d2 > 0 && d2 <= r2 {
                out.push((dx, dy, (d2 as f64).sqrt()));
            }
        }
    }
    out
}

impl Configurable for AmbientOcclusion {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Radius(r) => {
                self.set_radius(*r);
                true
            }
            _ => false,
        }
    }
}

impl Pattern for AmbientOcclusion {
    fn bounds(&self) -> Rect {
        self.source.bounds()
    }

    fn color_model(&self) -> ColorModel {
        ColorModel::Gray
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let src = self.source.as_ref();
        let center = height(src, x, y);
        let sum: f64 = self
            .offsets
            .iter()
            .map(|&(dx, dy, dist)| {
                let h = height(src, x.wrapping_add(dx), y.wrapping_add(dy));
                (h - center).max(0.0) / (1.0 + dist)
            })
            .sum();
        let occlusion = sum / self.offsets.len().max(1) as f64 * self.amplification;
        Color::gray(unit_to_u8(1.0 - occlusion.clamp(0.0, 1.0)))
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::testing::PixelMap;
    use crate::primitives::{Uniform, VerticalLine};

    fn flat(c: Color) -> PatternRef {
        Uniform::new(c).shared()
    }

    #[test]
    fn constant_source_has_no_edges() {
        for c in [Color::BLACK, Color::rgb(10, 200, 30), Color::WHITE] {
            let e = EdgeDetect::new(flat(c));
            assert_eq!(e.sample(5, -3), Color::BLACK);
        }
    }

    #[test]
    fn constant_source_has_flat_normals() {
        for c in [Color::BLACK, Color::gray(77), Color::WHITE] {
            let n = NormalMap::new(flat(c)).with_strength(3.0);
            assert_eq!(n.sample(0, 0), Color::new(128, 128, 255, 255));
        }
    }

    #[test]
    fn full_step_saturates_edges() {
        // Black for x < 0, white from x = 0.
        let step = VerticalLine::new()
            .with_sizes(1000, 1000)
            .with_colors(Color::WHITE, Color::BLACK)
            .shared();
        let e = EdgeDetect::new(step.clone());
        assert_eq!(e.sample(0, 0), Color::WHITE);
        assert_eq!(e.sample(-1, 0), Color::WHITE);
        assert_eq!(e.sample(5, 0), Color::BLACK);

        let n = NormalMap::new(step);
        let c = n.sample(0, 0);
        assert!(c.r < 128, "normal leans away from the rise: {c:?}");
        assert_eq!(c.g, 128);
    }

    #[test]
    fn curvature_of_a_peak_is_bright() {
        let peak = PixelMap {
            bounds: Rect::from_size(5, 5),
            pixels: vec![((2, 2), Color::WHITE)],
            fallback: Color::BLACK,
        }
        .shared();
        let c = Curvature::new(peak);
        assert_eq!(c.sample(2, 2), Color::gray(255));
        assert_eq!(c.sample(2, 1), Color::gray(1));
        assert_eq!(c.sample(0, 0), Color::gray(128));
    }

    #[test]
    fn occlusion_darkens_pits_only() {
        let pit = PixelMap {
            bounds: Rect::from_size(9, 9),
            pixels: vec![((4, 4), Color::BLACK)],
            fallback: Color::WHITE,
        }
        .shared();
        let ao = AmbientOcclusion::new(pit);
        assert!(ao.sample(4, 4).r < 64);
        assert_eq!(ao.sample(0, 0), Color::WHITE);
        assert_eq!(AmbientOcclusion::new(flat(Color::GRAY)).sample(1, 1), Color::WHITE);
    }

    #[test]
    fn disk_excludes_center() {
        let d = disk_offsets(1);
        assert_eq!(d.len(), 4);
        assert!(d.iter().all(|&(_, _, dist)| dist == 1.0));
        assert_eq!(disk_offsets(4).len(), 48);
    }
}
