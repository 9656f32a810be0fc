use pattern_forge::prelude::*;
use pattern_forge_examples::{init_tracing, save_pattern};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let rect = Rect::from_size(320, 240);
    let mut rng = StdRng::seed_from_u64(42);
    let palette = Palette::new(vec![
        Color::rgb(38, 70, 83),
        Color::rgb(42, 157, 143),
        Color::rgb(233, 196, 106),
        Color::rgb(244, 162, 97),
        Color::rgb(231, 111, 81),
    ]);
    let cells = Voronoi::scattered(60, rect, palette, &mut rng).shared();

    // Cell borders from the luminance edges, multiplied over the mosaic.
    let borders = ColorMap::new(
        EdgeDetect::new(cells.clone()).shared(),
        ColorStops::two(Color::WHITE, Color::BLACK),
    )
    .shared();
    let mosaic = Blend::new(cells, borders, BlendMode::Multiply);

    save_pattern(&mosaic, rect, "voronoi-mosaic.png")?;
    Ok(())
}
