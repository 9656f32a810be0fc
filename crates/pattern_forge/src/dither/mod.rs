//! Dithering: reduce any pattern to a fixed palette.
//!
//! Every ditherer samples its source in full color, looks up a deterministic
//! threshold for the coordinate and emits a palette color with the source's
//! alpha. Plans for the positional ditherers are cached per input color.
pub mod knoll;
pub mod ordered;
pub mod plan_cache;
pub mod source;
pub mod yliluoma;

pub use knoll::KnollDither;
pub use ordered::OrderedDither;
pub use plan_cache::PlanCache;
pub use source::{Threshold, ThresholdSource};
pub use yliluoma::{Yliluoma1, Yliluoma2};
