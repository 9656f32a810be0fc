#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, render_registry, save_pattern, RenderConfig};
