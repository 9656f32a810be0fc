use pattern_forge::prelude::*;
use pattern_forge_examples::{init_tracing, save_pattern};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let map = PerlinNoise::new(8)
        .with_bounds(Rect::from_size(360, 180))
        .with_frequency(0.02)
        .with_octaves(5)
        .with_ramp(ColorStops::new([
            (0.0, Color::rgb(12, 40, 110)),
            (0.52, Color::rgb(30, 90, 180)),
            (0.53, Color::rgb(210, 190, 130)),
            (0.65, Color::rgb(50, 130, 50)),
            (0.85, Color::rgb(120, 110, 100)),
            (1.0, Color::WHITE),
        ]))
        .shared();

    let frame = Rect::from_size(160, 160);
    let mut strip = Grid::new().with_grid_size(4, 1);
    for (col, angle) in [0.0, 90.0, 180.0, 270.0].into_iter().enumerate() {
        let globe = Globe::new()
            .with_bounds(frame)
            .with_angle(angle)
            .with_texture(map.clone());
        strip = strip.with_cell(0, col, globe.shared());
    }
    let strip = strip.with_background(Color::BLACK);

    let rect = strip.bounds();
    save_pattern(&strip, rect, "globe-spin.png")?;
    Ok(())
}
