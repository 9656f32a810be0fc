//! The pattern abstraction.
//!
//! A [`Pattern`] answers, for every integer coordinate, the color at that point.
//! Composite patterns hold children as [`PatternRef`] (shared, read-only) so a
//! pattern graph is a DAG that can be sampled concurrently from many threads.
//!
//! - Define custom patterns by implementing [`Pattern`].
//! - Configure patterns with [`PatternOption`] vectors via [`Configurable`].
//! - Use [`Fill`] for role colors that may also be pattern-valued.
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geom::{Rect, DEFAULT_BOUNDS};

pub mod option;

pub use option::{Configurable, PatternOption};

/// Advisory channel layout of a pattern's output.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorModel {
    #[default]
    Rgba,
    Gray,
    Paletted,
}

/// Trait for addressable color functions over the integer plane.
///
/// `sample` must be deterministic and total: it is defined for every `(x, y)`,
/// and points outside [`Pattern::bounds`] follow the pattern's documented
/// out-of-bounds policy instead of failing.
pub trait Pattern: Send + Sync {
    /// Declared extent of the pattern.
    fn bounds(&self) -> Rect;

    /// Natural channel layout; advisory only.
    fn color_model(&self) -> ColorModel {
        ColorModel::Rgba
    }

    /// Color at `(x, y)`.
    fn sample(&self, x: i32, y: i32) -> Color;

    /// Intrinsic (min-content) size, for patterns that carry one.
    ///
    /// Grid layouts prefer this over the bounds size when present.
    fn intrinsic_size(&self) -> Option<(i32, i32)> {
        None
    }

    /// Dirty state for patterns whose content can change; `None` when the
    /// pattern is immutable.
    fn is_dirty(&self) -> Option<bool> {
        None
    }

    /// Moves the pattern behind an [`Arc`] so it can be shared by composites.
    fn shared(self) -> PatternRef
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

/// Shared handle to a pattern.
pub type PatternRef = Arc<dyn Pattern>;

impl fmt::Debug for dyn Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("bounds", &self.bounds())
            .field("color_model", &self.color_model())
            .finish()
    }
}

impl<P: Pattern + ?Sized> Pattern for Arc<P> {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }

    fn color_model(&self) -> ColorModel {
        (**self).color_model()
    }

    #[inline]
    fn sample(&self, x: i32, y: i32) -> Color {
        (**self).sample(x, y)
    }

    fn intrinsic_size(&self) -> Option<(i32, i32)> {
        (**self).intrinsic_size()
    }

    fn is_dirty(&self) -> Option<bool> {
        (**self).is_dirty()
    }
}

/// A role fill: either a flat color or another pattern sampled at the same point.
#[derive(Clone, Debug)]
pub enum Fill {
    Color(Color),
    Pattern(PatternRef),
}

impl Fill {
    #[inline]
    pub fn sample(&self, x: i32, y: i32) -> Color {
        match self {
            Fill::Color(c) => *c,
            Fill::Pattern(p) => p.sample(x, y),
        }
    }

    /// The flat color, if this fill is one.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Fill::Color(c) => Some(*c),
            Fill::Pattern(_) => None,
        }
    }
}

impl Default for Fill {
    fn default() -> Self {
        Fill::Color(Color::TRANSPARENT)
    }
}

impl From<Color> for Fill {
    fn from(c: Color) -> Self {
        Fill::Color(c)
    }
}

impl From<PatternRef> for Fill {
    fn from(p: PatternRef) -> Self {
        Fill::Pattern(p)
    }
}


/// Bounds and color model shared by every concrete pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatternBase {
    pub bounds: Rect,
    pub model: ColorModel,
}

impl PatternBase {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            model: ColorModel::Rgba,
        }
    }

    pub fn with_model(mut self, model: ColorModel) -> Self {
        self.model = model;
        self
    }

    /// Applies the options every pattern honors.
    pub fn apply(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::Bounds(r) => {
                self.bounds = *r;
                true
            }
            _ => false,
        }
    }
}

impl Default for PatternBase {
    fn default() -> Self {
        Self::new(DEFAULT_BOUNDS)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Small helpers shared by pattern tests.
    use super::*;

    /// A pattern backed by an explicit pixel list; everything else is `fallback`.
    pub struct PixelMap {
        pub bounds: Rect,
        pub pixels: Vec<((i32, i32), Color)>,
        pub fallback: Color,
    }

    impl Pattern for PixelMap {
        fn bounds(&self) -> Rect {
            self.bounds
        }

        fn sample(&self, x: i32, y: i32) -> Color {
            self.pixels
                .iter()
                .find(|(p, _)| *p == (x, y))
                .map(|(_, c)| *c)
                .unwrap_or(self.fallback)
        }
    }

    /// Horizontal gray ramp: `gray(x)` clamped to `[0, 255]`.
    pub struct Ramp {
        pub bounds: Rect,
    }

    impl Pattern for Ramp {
        fn bounds(&self) -> Rect {
            self.bounds
        }

        fn sample(&self, x: i32, _y: i32) -> Color {
            Color::gray(x.clamp(0, 255) as u8)
        }
    }

    /// Distinct color per coordinate inside bounds, for permutation checks.
    pub struct Coords {
        pub bounds: Rect,
    }

    impl Pattern for Coords {
        fn bounds(&self) -> Rect {
            self.bounds
        }

        fn sample(&self, x: i32, y: i32) -> Color {
            Color::rgb((x & 0xFF) as u8, (y & 0xFF) as u8, ((x ^ y) & 0xFF) as u8)
        }
    }
}
