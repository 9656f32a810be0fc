//! Coordinate transforms over a shared source pattern.
//!
//! Every transform rewrites `(x, y)` before sampling its source and states how
//! bounds propagate. [`Scale`] is the only transform that materializes pixels.
pub mod clip;
pub mod orient;
pub mod warp;
pub mod zoom;

pub use clip::{Clamp, Crop, Margins, Padding, Tile, Translate};
pub use orient::{Mirror, MirrorAxis, Rotate, Rotation, Transpose};
pub use warp::{Remap, Warp};
pub use zoom::{Scale, ScaleFilter, SimpleZoom};
