use pattern_forge::prelude::*;
use pattern_forge_examples::{init_tracing, save_pattern};

const CELL: i32 = 128;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cell = Rect::from_size(CELL, CELL);
    let source = LinearGradient::new(ColorStops::new([
        (0.0, Color::rgb(16, 16, 48)),
        (0.5, Color::rgb(200, 90, 40)),
        (1.0, Color::rgb(250, 240, 200)),
    ]))
    .with_bounds(cell)
    .with_angle(30.0)
    .shared();

    let palette = Palette::new(vec![
        Color::rgb(20, 12, 28),
        Color::rgb(190, 38, 51),
        Color::rgb(235, 137, 49),
        Color::rgb(247, 226, 107),
        Color::WHITE,
    ]);

    // Top row: ordered dithering by threshold source.
    let sources = [
        ThresholdSource::Bayer(8),
        ThresholdSource::Halftone(8),
        ThresholdSource::BlueNoise { size: 64, seed: 1 },
        ThresholdSource::MultiScale { fine: 2, coarse: 8 },
    ];
    let mut grid = Grid::new().with_grid_size(4, 2);
    for (col, kind) in sources.into_iter().enumerate() {
        let dither = OrderedDither::new(source.clone(), palette.clone(), kind);
        grid = grid.with_cell(0, col, dither.shared());
    }

    // Bottom row: the original and the pattern-mixing ditherers.
    grid = grid
        .with_cell(1, 0, source.clone())
        .with_cell(
            1,
            1,
            Yliluoma1::new(source.clone(), palette.clone(), ThresholdSource::Bayer(8)).shared(),
        )
        .with_cell(
            1,
            2,
            Yliluoma2::new(source.clone(), palette.clone(), ThresholdSource::Bayer(4)).shared(),
        )
        .with_cell(1, 3, KnollDither::new(source, palette, 8).shared());

    let rect = grid.bounds();
    save_pattern(&grid, rect, "dither-gallery.png")?;
    Ok(())
}
