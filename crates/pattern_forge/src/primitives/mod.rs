//! Primitive patterns defined directly by per-pixel mathematics.
//!
//! Unless noted otherwise every primitive is defined on the whole plane; its
//! bounds only document the intended extent.
pub mod basic;
pub mod bitwise;
pub mod dots;
pub mod gradient;
pub mod lines;
pub mod spiral;
pub mod voronoi;

pub use basic::{Checker, Circle, RectShape, Uniform};
pub use bitwise::{ConcentricRings, ModuloStripe, SierpinskiCarpet, SierpinskiTriangle, XorPattern};
pub use dots::{Polka, Scales, ScreenTone};
pub use gradient::{ColorStops, ConicGradient, LinearGradient, RadialGradient};
pub use lines::{CrossHatch, HorizontalLine, VerticalLine};
pub use spiral::FibonacciSpiral;
pub use voronoi::Voronoi;
