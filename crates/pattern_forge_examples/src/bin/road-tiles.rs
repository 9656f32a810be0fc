use pattern_forge::prelude::*;
use pattern_forge_examples::{init_tracing, save_pattern};

const TILE: i32 = 160;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let tile = Rect::from_size(TILE, TILE);
    let shapes = [
        (RoadShape::Straight, 0.0),
        (RoadShape::Straight, 90.0),
        (RoadShape::Curved { radius: 80.0 }, 0.0),
        (RoadShape::T, 0.0),
        (RoadShape::T, 180.0),
        (RoadShape::Intersection, 0.0),
    ];

    let mut grid = Grid::new().with_grid_size(3, 2);
    for (i, (shape, direction)) in shapes.into_iter().enumerate() {
        let road = Road::new(shape)
            .with_bounds(tile)
            .with_direction(direction)
            .with_width(56)
            .with_lanes(2);
        grid = grid.with_cell(i / 3, i % 3, road.shared());
    }

    let rect = grid.bounds();
    save_pattern(&grid, rect, "road-tiles.png")?;
    Ok(())
}
