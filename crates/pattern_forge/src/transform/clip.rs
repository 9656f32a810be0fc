//! Window-style transforms: crop, clamp, tile, translate and padding.
//!
//! The out-of-bounds policy is part of each type: [`Crop`] and [`Padding`] are
//! transparent outside, [`Clamp`] repeats edges, [`Tile`] repeats the source.
use crate::color::Color;
use crate::geom::{positive_mod_i64, Rect};
use crate::pattern::{ColorModel, Configurable, Fill, Pattern, PatternOption, PatternRef};

/// Source inside `rect`, transparent outside.
#[derive(Clone, Debug)]
pub struct Crop {
    source: PatternRef,
    rect: Rect,
}

impl Crop {
    pub fn new(source: PatternRef, rect: Rect) -> Self {
        Self { source, rect }
    }
}

impl Pattern for Crop {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        if self.rect.contains(x, y) {
            self.source.sample(x, y)
        } else {
            Color::TRANSPARENT
        }
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}

/// Declares `rect` as bounds and clamps every coordinate to the source bounds
/// before sampling.
#[derive(Clone, Debug)]
pub struct Clamp {
    source: PatternRef,
    rect: Rect,
}

impl Clamp {
    pub fn new(source: PatternRef, rect: Rect) -> Self {
        Self { source, rect }
    }
}

impl Pattern for Clamp {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let (cx, cy) = self.source.bounds().clamp_point(x, y);
        self.source.sample(cx, cy)
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}

/// Repeats the source bounds over the plane; declares `rect` as bounds.
///
/// An empty source is transparent everywhere.
#[derive(Clone, Debug)]
pub struct Tile {
    source: PatternRef,
    rect: Rect,
}

impl Tile {
    pub fn new(source: PatternRef, rect: Rect) -> Self {
        Self { source, rect }
    }
}

impl Pattern for Tile {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let sb = self.source.bounds();
        if sb.is_empty() {
            return Color::TRANSPARENT;
        }
        let tx = sb.min_x as i64 + positive_mod_i64(x as i64 - sb.min_x as i64, sb.width() as i64);
        let ty = sb.min_y as i64 + positive_mod_i64(y as i64 - sb.min_y as i64, sb.height() as i64);
        self.source.sample(tx as i32, ty as i32)
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}

/// Shifts the source by `(dx, dy)`; bounds move with it.
#[derive(Clone, Debug)]
pub struct Translate {
    source: PatternRef,
    dx: i32,
    dy: i32,
}

impl Translate {
    pub fn new(source: PatternRef, dx: i32, dy: i32) -> Self {
        Self { source, dx, dy }
    }
}

impl Pattern for Translate {
    fn bounds(&self) -> Rect {
        self.source.bounds().translate(self.dx, self.dy)
    }

    fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        self.source
            .sample(x.wrapping_sub(self.dx), y.wrapping_sub(self.dy))
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}

/// Per-side margins in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Margins {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margins {
    pub const fn uniform(m: i32) -> Self {
        Self {
            left: m,
            top: m,
            right: m,
            bottom: m,
        }
    }

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Adds margins around the source.
///
/// Outer bounds start at `(0, 0)`; the source's bounds min lands at
/// `(left, top)`. Margins show the background fill (transparent by default).
#[derive(Clone, Debug)]
pub struct Padding {
    source: PatternRef,
    margins: Margins,
    background: Fill,
}

impl Padding {
    pub fn new(source: PatternRef, margins: Margins) -> Self {
        let margins = Margins::new(
            margins.left.max(0),
            margins.top.max(0),
            margins.right.max(0),
            margins.bottom.max(0),
        );
        Self {
            source,
            margins,
            background: Fill::default(),
        }
    }

    pub fn uniform(source: PatternRef, margin: i32) -> Self {
        Self::new(source, Margins::uniform(margin))
    }

    pub fn with_background(mut self, background: impl Into<Fill>) -> Self {
        self.background = background.into();
        self
    }

    fn inner(&self) -> Rect {
        let sb = self.source.bounds();
        Rect::from_size(sb.width(), sb.height()).translate(self.margins.left, self.margins.top)
    }
}

impl Configurable for Padding {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::SpaceColor(c) | PatternOption::FillColor(c) => {
                self.background = Fill::Color(*c)
            }
            PatternOption::SpaceSource(p) | PatternOption::FillSource(p) => {
                self.background = Fill::Pattern(p.clone())
            }
            _ => return false,
        }
        true
    }
}

impl Pattern for Padding {
    fn bounds(&self) -> Rect {
        let sb = self.source.bounds();
        let m = self.margins;
        Rect::from_size(
            m.left.saturating_add(sb.width().max(0)).saturating_add(m.right),
            m.top.saturating_add(sb.height().max(0)).saturating_add(m.bottom),
        )
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let inner = self.inner();
        if inner.contains(x, y) {
            let sb = self.source.bounds();
            self.source.sample(
                x.wrapping_sub(inner.min_x).wrapping_add(sb.min_x),
                y.wrapping_sub(inner.min_y).wrapping_add(sb.min_y),
            )
        } else {
            self.background.sample(x, y)
        }
    }

    fn intrinsic_size(&self) -> Option<(i32, i32)> {
        let b = self.bounds();
        Some((b.width(), b.height()))
    }

    fn is_dirty(&self) -> Option<bool> {
        self.source.is_dirty()
    }
}
