#![forbid(unsafe_code)]
//! pattern_forge: composable procedural 2D patterns sampled per pixel.
//!
//! Modules:
//! - pattern: the sampling protocol, options and shared handles
//! - color, geom, hash: colors and palettes, rectangles, stable hashing
//! - primitives: solid shapes, stripes, gradients, dots, fractals, Voronoi
//! - noise: hash, gradient and cellular noise plus threshold matrices
//! - dither: ordered, Yliluoma and Knoll dithering with plan caches
//! - transform: orientation, tiling, cropping, zoom, scale, warp and remap
//! - filter: tone mapping, blending, boolean logic and height-derived maps
//! - composite: bricks, roads, grids, globes and effect overlays
//! - buffer: rasterized cache with dirty and expiry tracking
//! - raster, registry, scenes: image boundary and named demo scenes
//!
//! Sampling never fails: every pattern answers for every integer point.
pub mod buffer;
pub mod color;
pub mod composite;
pub mod dither;
pub mod error;
pub mod filter;
pub mod geom;
pub mod hash;
pub mod noise;
pub mod pattern;
pub mod primitives;
pub mod raster;
pub mod registry;
pub mod scenes;
pub mod transform;

/// Convenient re-exports for common types. Import with `use pattern_forge::prelude::*;`.
pub mod prelude {
    pub use crate::buffer::Buffer;
    pub use crate::color::{lerp, over, Color, Palette};
    pub use crate::composite::{
        Brick, Globe, GlyphRing, Grid, Road, RoadShape, SpeedLines, VhsOverlay,
    };
    pub use crate::dither::{
        KnollDither, OrderedDither, ThresholdSource, Yliluoma1, Yliluoma2,
    };
    pub use crate::error::{Error, Result};
    pub use crate::filter::{
        AmbientOcclusion, Blend, BlendMode, BoolOp, BooleanPattern, ColorMap, Curvature,
        EdgeDetect, NormalMap, Predicate, Quantize,
    };
    pub use crate::geom::{Rect, DEFAULT_BOUNDS};
    pub use crate::noise::{
        blue_noise, HashNoise, NoiseBasis, PerlinNoise, ThresholdMatrix, WorleyMetric,
        WorleyNoise, WorleyOutput,
    };
    pub use crate::pattern::{
        ColorModel, Configurable, Fill, Pattern, PatternOption, PatternRef,
    };
    pub use crate::primitives::{
        Checker, Circle, ColorStops, ConcentricRings, ConicGradient, CrossHatch, FibonacciSpiral,
        HorizontalLine, LinearGradient, ModuloStripe, Polka, RadialGradient, RectShape, Scales,
        ScreenTone, SierpinskiCarpet, SierpinskiTriangle, Uniform, VerticalLine, Voronoi,
        XorPattern,
    };
    pub use crate::raster::{rasterize, ImagePattern};
    pub use crate::registry::{registry, References, SceneRegistry};
    pub use crate::transform::{
        Clamp, Crop, Margins, Mirror, MirrorAxis, Padding, Remap, Rotate, Rotation, Scale,
        ScaleFilter, SimpleZoom, Tile, Translate, Transpose, Warp,
    };
}
