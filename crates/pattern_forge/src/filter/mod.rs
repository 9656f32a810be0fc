//! Patterns that derive their colors from other patterns pixel by pixel.
//!
//! - [`tone`]: luminance color maps and quantization.
//! - [`boolean`]: crisp and fuzzy logic over several inputs.
//! - [`blend`]: two-layer compositing.
//! - [`sobel`]: height-map derivatives (edges, normals, curvature, occlusion).
pub mod blend;
pub mod boolean;
pub mod sobel;
pub mod tone;

pub use blend::{Blend, BlendMode};
pub use boolean::{BoolOp, BooleanPattern, Predicate};
pub use sobel::{sobel, AmbientOcclusion, Curvature, EdgeDetect, NormalMap};
pub use tone::{ColorMap, Quantize};
