use std::thread;
use std::time::Duration;

use pattern_forge::prelude::*;
use pattern_forge_examples::{init_tracing, save_pattern};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let rect = Rect::from_size(256, 256);
    let terrain = PerlinNoise::new(21)
        .with_bounds(rect)
        .with_frequency(0.015)
        .with_octaves(6)
        .shared();
    let shaded = AmbientOcclusion::new(terrain).with_radius(6).shared();

    let buffer = Buffer::new(shaded).with_expiry(Some(Duration::from_millis(200)));
    info!("Before refresh: dirty = {}", buffer.dirty());

    buffer.refresh();
    info!("After refresh: dirty = {}", buffer.dirty());
    save_pattern(&buffer, rect, "buffer-occlusion.png")?;

    thread::sleep(Duration::from_millis(250));
    info!("After expiry: dirty = {}", buffer.dirty());

    buffer.refresh();
    buffer.set_dirty();
    info!("After set_dirty: dirty = {}", buffer.dirty());
    Ok(())
}
