//! Displacement by scalar fields and UV remapping.
use crate::color::Color;
use crate::geom::Rect;
use crate::pattern::{ColorModel, Pattern, PatternRef};

/// Displaces the source by up to three gray-valued fields.
///
/// Each field is sampled at `(x·scale, y·scale)` and turned into an offset
/// `(gray/255 − 0.5)·2·magnitude`. The `uniform` field moves both axes, the
/// axis fields add to their own axis. The displaced coordinate is truncated
/// toward zero before sampling the source.
#[derive(Clone, Debug)]
pub struct Warp {
    source: PatternRef,
    uniform: Option<PatternRef>,
    x_field: Option<PatternRef>,
    y_field: Option<PatternRef>,
    scale: f64,
    magnitude: f64,
}

impl Warp {
    pub fn new(source: PatternRef) -> Self {
        Self {
            source,
            uniform: None,
            x_field: None,
            y_field: None,
            scale: 1.0,
            magnitude: 8.0,
        }
    }

    pub fn with_uniform(mut self, field: PatternRef) -> Self {
        self.uniform = Some(field);
        self
    }

    pub fn with_x_field(mut self, field: PatternRef) -> Self {
        self.x_field = Some(field);
        self
    }

    pub fn with_y_field(mut self, field: PatternRef) -> Self {
        self.y_field = Some(field);
        self
    }

    /// Coordinate scale applied before sampling the fields.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = if scale.is_finite() { scale } else { 1.0 };
        self
    }

    /// Maximum displacement in pixels.
    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = if magnitude.is_finite() { magnitude } else { 0.0 };
        self
    }

    fn offset(&self, field: &Option<PatternRef>, fx: i32, fy: i32) -> f64 {
        match field {
            Some(f) => (f.sample(fx, fy).luma255() / 255.0 - 0.5) * 2.0 * self.magnitude,
            None => 0.0,
        }
    }
}

#[inline]
fn to_coord(v: f64) -> i32 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(i32::MIN as f64, i32::MAX as f64) as i32
}

impl Pattern for Warp {
    fn bounds(&self) -> Rect {
        self.source.bounds()
    }

    fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let fx = to_coord((x as f64 * self.scale).floor());
        let fy = to_coord((y as f64 * self.scale).floor());
        let u = self.offset(&self.uniform, fx, fy);
        let dx = u + self.offset(&self.x_field, fx, fy);
        let dy = u + self.offset(&self.y_field, fx, fy);
        // `as` truncates toward zero.
        self.source
            .sample(to_coord(x as f64 + dx), to_coord(y as f64 + dy))
    }

    fn is_dirty(&self) -> Option<bool> {
        let fields = [&self.uniform, &self.x_field, &self.y_field];
        std::iter::once(self.source.is_dirty())
            .chain(fields.into_iter().flatten().map(|f| f.is_dirty()))
            .flatten()
            .reduce(|a, b| a || b)
    }
}

/// Looks up the source through a UV field.
///
/// The field's red and green channels hold `(u, v)` in `[0, 1]`; the source is
/// sampled at `min + (u·w, v·h)` clamped to its bounds. Transparent UV pixels
/// produce transparent output. Bounds are the field's.
#[derive(Clone, Debug)]
pub struct Remap {
    source: PatternRef,
    uv: PatternRef,
}

impl Remap {
    pub fn new(source: PatternRef, uv: PatternRef) -> Self {
        Self { source, uv }
    }
}

impl Pattern for Remap {
    fn bounds(&self) -> Rect {
        self.uv.bounds()
    }

    fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        let uv = self.uv.sample(x, y);
        if uv.is_transparent() {
            return Color::TRANSPARENT;
        }
        let sb = self.source.bounds();
        let u = uv.r as f64 / 255.0;
        let v = uv.g as f64 / 255.0;
        let sx = sb.min_x as f64 + (u * sb.width() as f64).floor();
        let sy = sb.min_y as f64 + (v * sb.height() as f64).floor();
        let (cx, cy) = sb.clamp_point(to_coord(sx), to_coord(sy));
        self.source.sample(cx, cy)
    }

    fn is_dirty(&self) -> Option<bool> {
        match (self.source.is_dirty(), self.uv.is_dirty()) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(false) || b.unwrap_or(false)),
        }
    }
}
