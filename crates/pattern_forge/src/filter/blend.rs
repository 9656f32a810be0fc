//! Two-layer compositing in 16-bit premultiplied space.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::{Color, Premul16};
use crate::geom::Rect;
use crate::pattern::{Pattern, PatternRef};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum BlendMode {
    /// The top layer replaces the bottom one.
    Normal,
    /// Porter-Duff source-over.
    #[default]
    SourceOver,
    Multiply,
    Screen,
    Overlay,
}

impl BlendMode {
    /// Composites `top` onto `bottom`.
    pub fn blend(self, top: Color, bottom: Color) -> Color {
        match self {
            BlendMode::Normal => top,
            BlendMode::SourceOver => top.to_premul16().over(bottom.to_premul16()).to_color(),
            BlendMode::Multiply => separable(top, bottom, |s, d| s * d),
            BlendMode::Screen => separable(top, bottom, |s, d| s + d - s * d),
            BlendMode::Overlay => separable(top, bottom, |s, d| {
                if d <= 0.5 {
                    2.0 * s * d
                } else {
                    1.0 - 2.0 * (1.0 - s) * (1.0 - d)
                }
            }),
        }
    }
}

/// Separable blend with alpha compositing: `B(s, d)` mixes the straight
/// channels where both layers overlap; elsewhere each layer shows through.
fn separable(top: Color, bottom: Color, f: impl Fn(f64, f64) -> f64) -> Color {
    const MAX: f64 = 65535.0;
    let s = top.to_premul16().to_f64().map(|v| v / MAX);
    let d = bottom.to_premul16().to_f64().map(|v| v / MAX);
    let (sa, da) = (s[3], d[3]);
    let straight = |c: f64, a: f64| if a > 0.0 { (c / a).min(1.0) } else { 0.0 };
    let mut out = [0.0; 4];
    for i in 0..3 {
        let mixed = f(straight(s[i], sa), straight(d[i], da));
        out[i] = (sa * da * mixed + s[i] * (1.0 - da) + d[i] * (1.0 - sa)) * MAX;
    }
    out[3] = (sa + da - sa * da) * MAX;
    Premul16::from_f64(out).to_color()
}

/// `top` composited over `bottom` by a [`BlendMode`]; bounds are the bottom's.
#[derive(Clone, Debug)]
pub struct Blend {
    bottom: PatternRef,
    top: PatternRef,
    mode: BlendMode,
    opacity: f64,
}

impl Blend {
    pub fn new(bottom: PatternRef, top: PatternRef, mode: BlendMode) -> Self {
        Self {
            bottom,
            top,
            mode,
            opacity: 1.0,
        }
    }

    /// Scales the top layer's alpha; clamped to `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = if opacity.is_nan() {
            1.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        self
    }
}

impl Pattern for Blend {
    fn bounds(&self) -> Rect {
        self.bottom.bounds()
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let mut top = self.top.sample(x, y);
        if self.opacity < 1.0 {
            top = top.to_premul16().scale(self.opacity).to_color();
        }
        self.mode.blend(top, self.bottom.sample(x, y))
    }

    fn is_dirty(&self) -> Option<bool> {
        match (self.bottom.is_dirty(), self.top.is_dirty()) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(false) || b.unwrap_or(false)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Uniform;

    #[test]
    fn source_over_respects_alpha() {
        let half_red = Color::new(255, 0, 0, 128);
        let c = BlendMode::SourceOver.blend(half_red, Color::BLUE);
        assert_eq!(c.a, 255);
        assert!((127..=129).contains(&c.r));
        assert!((126..=128).contains(&c.b));
        assert_eq!(BlendMode::SourceOver.blend(Color::TRANSPARENT, Color::GREEN), Color::GREEN);
    }

    #[test]
    fn multiply_and_screen_on_opaque_layers() {
        let a = Color::rgb(255, 128, 0);
        let b = Color::rgb(128, 128, 255);
        let m = BlendMode::Multiply.blend(a, b);
        assert_eq!(m, Color::rgb(128, 64, 0));
        let s = BlendMode::Screen.blend(Color::BLACK, b);
        assert_eq!(s, b);
        assert_eq!(BlendMode::Multiply.blend(Color::WHITE, b), b);
    }

    #[test]
    fn overlay_keeps_extremes_of_the_base() {
        let mid = Color::gray(128);
        assert_eq!(BlendMode::Overlay.blend(mid, Color::BLACK), Color::BLACK);
        assert_eq!(BlendMode::Overlay.blend(mid, Color::WHITE), Color::WHITE);
    }

    #[test]
    fn normal_returns_top() {
        let top = Color::new(1, 2, 3, 4);
        assert_eq!(BlendMode::Normal.blend(top, Color::WHITE), top);
    }

    #[test]
    fn blend_pattern_applies_opacity() {
        let b = Blend::new(
            Uniform::new(Color::BLACK).shared(),
            Uniform::new(Color::WHITE).shared(),
            BlendMode::SourceOver,
        )
        .with_opacity(0.5);
        let c = b.sample(3, 3);
        assert!((127..=128).contains(&c.r), "{c:?}");
        assert_eq!(c.a, 255);
    }
}
