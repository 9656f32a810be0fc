//! Larger scenes built from geometry and child patterns.
//!
//! - [`brick`]: running-bond wall with per-brick textures.
//! - [`road`]: signed-distance roads with lane markings.
//! - [`grid`]: table layout with intrinsic sizing and flex tracks.
//! - [`globe`]: orthographic sphere with texture or graticule.
//! - [`speed_lines`], [`glyph_ring`], [`vhs`]: effect overlays.
pub mod brick;
pub mod globe;
pub mod glyph_ring;
pub mod grid;
pub mod road;
pub mod speed_lines;
pub mod vhs;

pub use brick::{Brick, BrickCell};
pub use globe::Globe;
pub use glyph_ring::GlyphRing;
pub use grid::Grid;
pub use road::{Road, RoadShape};
pub use speed_lines::SpeedLines;
pub use vhs::VhsOverlay;
