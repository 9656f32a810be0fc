//! Built-in demo scenes registered into the global [`registry`](crate::registry::registry).
//!
//! Each generator builds a pattern whose bounds match the requested
//! rectangle. Scenes are small compositions of the library's own patterns and
//! are meant for documentation images and smoke tests.
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::buffer::Buffer;
use crate::color::{Color, Palette};
use crate::composite::{Brick, Globe, GlyphRing, Grid, Road, RoadShape, SpeedLines, VhsOverlay};
use crate::dither::{KnollDither, OrderedDither, ThresholdSource, Yliluoma1, Yliluoma2};
use crate::error::Result;
use crate::filter::{AmbientOcclusion, EdgeDetect, NormalMap, Quantize};
use crate::geom::Rect;
use crate::noise::{HashNoise, PerlinNoise, WorleyNoise};
use crate::pattern::{Configurable, Pattern, PatternOption, PatternRef};
use crate::primitives::{
    Checker, Circle, ColorStops, CrossHatch, FibonacciSpiral, LinearGradient, Polka, RectShape,
    SierpinskiTriangle, Voronoi, XorPattern,
};
use crate::registry::{References, SceneRegistry};
use crate::transform::{Mirror, MirrorAxis, Rotate, Rotation, Tile, Translate, Warp};

const BRICK_RED: Color = Color::rgb(165, 62, 42);
const BRICK_DARK: Color = Color::rgb(120, 40, 30);
const SKY: Color = Color::rgb(40, 90, 170);

/// Shorter side of `rect`, at least one.
fn side(rect: Rect) -> i32 {
    rect.width().min(rect.height()).max(1)
}

fn gray_ramp(rect: Rect) -> PatternRef {
    LinearGradient::new(ColorStops::two(Color::BLACK, Color::WHITE))
        .with_bounds(rect)
        .shared()
}

fn terrain(rect: Rect, seed: u64) -> PatternRef {
    PerlinNoise::new(seed)
        .with_bounds(rect)
        .with_frequency(4.0 / side(rect) as f64)
        .with_octaves(4)
        .shared()
}

fn four_colors() -> Palette {
    Palette::new(vec![
        Color::rgb(20, 12, 28),
        Color::rgb(190, 38, 51),
        Color::rgb(235, 137, 49),
        Color::rgb(247, 226, 107),
    ])
}

fn checker(rect: Rect) -> PatternRef {
    Checker::new(Color::BLACK, Color::WHITE)
        .with_space((side(rect) / 8).max(1))
        .with_bounds(rect)
        .shared()
}

fn circle(rect: Rect) -> PatternRef {
    Circle::new(Color::RED)
        .with_space(Color::WHITE)
        .with_bounds(rect)
        .shared()
}

fn xor(rect: Rect) -> PatternRef {
    XorPattern::new()
        .with_bounds(rect)
        .with_palette(Palette::grayscale(16))
        .shared()
}

fn sierpinski(rect: Rect) -> PatternRef {
    SierpinskiTriangle::new(Color::BLACK, Color::WHITE)
        .with_bounds(rect)
        .shared()
}

fn spiral(rect: Rect) -> PatternRef {
    FibonacciSpiral::new()
        .with_bounds(rect)
        .with_line_size(2)
        .with_colors(Color::BLACK, Color::WHITE)
        .shared()
}

fn polka(rect: Rect) -> PatternRef {
    let spacing = (side(rect) / 6).max(4);
    Polka::new()
        .with_bounds(rect)
        .with_spacing(spacing)
        .with_radius(spacing / 3)
        .with_angle(30.0)
        .shared()
}

fn cross_hatch(rect: Rect) -> PatternRef {
    CrossHatch::new()
        .with_angles(&[30.0, 120.0])
        .with_options(&[
            PatternOption::Bounds(rect),
            PatternOption::LineSize(1),
            PatternOption::SpaceSize(5),
        ])
        .shared()
}

fn voronoi(rect: Rect) -> PatternRef {
    let mut rng = StdRng::seed_from_u64(7);
    Voronoi::scattered(24, rect, four_colors(), &mut rng).shared()
}

fn perlin(rect: Rect) -> PatternRef {
    PerlinNoise::new(3)
        .with_bounds(rect)
        .with_frequency(4.0 / side(rect) as f64)
        .with_octaves(5)
        .with_ramp(ColorStops::new([
            (0.0, Color::rgb(10, 30, 90)),
            (0.45, Color::rgb(40, 110, 200)),
            (0.5, Color::rgb(220, 200, 140)),
            (0.6, Color::rgb(60, 140, 60)),
            (1.0, Color::WHITE),
        ]))
        .shared()
}

fn worley(rect: Rect) -> PatternRef {
    WorleyNoise::new(5)
        .with_bounds(rect)
        .with_frequency(6.0 / side(rect) as f64)
        .shared()
}

fn hash_noise(rect: Rect) -> PatternRef {
    HashNoise::new(1).with_bounds(rect).shared()
}

fn ordered(source: ThresholdSource) -> impl Fn(Rect) -> PatternRef + Send + Sync + 'static {
    move |rect| OrderedDither::new(gray_ramp(rect), Palette::black_white(), source.clone()).shared()
}

fn yliluoma1(rect: Rect) -> PatternRef {
    Yliluoma1::new(perlin(rect), four_colors(), ThresholdSource::Bayer(8)).shared()
}

fn yliluoma2(rect: Rect) -> PatternRef {
    Yliluoma2::new(perlin(rect), four_colors(), ThresholdSource::Bayer(4)).shared()
}

fn knoll(rect: Rect) -> PatternRef {
    KnollDither::new(perlin(rect), four_colors(), 8).shared()
}

fn edges(rect: Rect) -> PatternRef {
    EdgeDetect::new(circle(rect)).shared()
}

fn normals(rect: Rect) -> PatternRef {
    NormalMap::new(terrain(rect, 9)).with_strength(4.0).shared()
}

fn occlusion(rect: Rect) -> PatternRef {
    AmbientOcclusion::new(terrain(rect, 9)).shared()
}

fn posterized(rect: Rect) -> PatternRef {
    Quantize::new(terrain(rect, 2), 4).shared()
}

fn kaleidoscope(rect: Rect) -> PatternRef {
    let quarter = Rect::new(
        rect.min_x,
        rect.min_y,
        rect.min_x + (rect.width() / 2).max(1),
        rect.min_y + (rect.height() / 2).max(1),
    );
    let mirrored = Mirror::new(perlin(quarter), MirrorAxis::Both).shared();
    Tile::new(mirrored, rect).shared()
}

fn rotated(rect: Rect) -> PatternRef {
    let turned = Rotate::new(spiral(rect), Rotation::Deg90).shared();
    Tile::new(turned, rect).shared()
}

fn warped(rect: Rect) -> PatternRef {
    let field = terrain(rect, 4);
    let warp = Warp::new(checker(rect))
        .with_uniform(field)
        .with_magnitude(side(rect) as f64 / 16.0)
        .shared();
    Tile::new(warp, rect).shared()
}

fn brick(rect: Rect) -> PatternRef {
    let face = |seed| {
        PerlinNoise::new(seed)
            .with_frequency(0.2)
            .with_octaves(2)
            .with_ramp(ColorStops::two(BRICK_DARK, BRICK_RED))
            .shared()
    };
    Brick::new()
        .with_bounds(rect)
        .with_seed(1)
        .with_faces(vec![face(1), face(2), face(3)])
        .shared()
}

fn road(shape: RoadShape) -> impl Fn(Rect) -> PatternRef + Send + Sync + 'static {
    move |rect| {
        Road::new(shape)
            .with_bounds(rect)
            .with_width((side(rect) / 4).max(8))
            .shared()
    }
}

fn globe(rect: Rect) -> PatternRef {
    Globe::new()
        .with_bounds(rect)
        .with_colors(Color::WHITE, SKY, Color::BLACK)
        .shared()
}

fn textured_globe(rect: Rect) -> PatternRef {
    Globe::new()
        .with_bounds(rect)
        .with_angle(40.0)
        .with_texture(perlin(Rect::from_size(360, 180)))
        .shared()
}

fn speed_lines(rect: Rect) -> PatternRef {
    let s = side(rect);
    SpeedLines::new()
        .with_bounds(rect)
        .with_radii(s / 5, s / 2)
        .with_seed(3)
        .shared()
}

fn glyph_ring(rect: Rect) -> PatternRef {
    let glyph = |color: Color| {
        RectShape::new(color)
            .with_bounds(Rect::from_size(8, 12))
            .with_border(1, Color::BLACK)
            .shared()
    };
    let glyphs = [Color::RED, Color::GREEN, Color::BLUE]
        .iter()
        .cycle()
        .take(12)
        .map(|&c| glyph(c))
        .collect();
    GlyphRing::new(glyphs)
        .with_bounds(rect)
        .with_radius(side(rect) as f64 * 0.35)
        .with_background(Color::WHITE)
        .shared()
}

fn vhs(rect: Rect) -> PatternRef {
    VhsOverlay::new(perlin(rect)).with_noise(0.08, 7).shared()
}

fn grid(rect: Rect) -> PatternRef {
    let small = Rect::from_size(24, 24);
    let grid = Grid::new()
        .with_grid_size(3, 2)
        .with_cell(0, 0, checker(small))
        .with_cell(0, 1, circle(small))
        .with_cell(0, 2, sierpinski(small))
        .with_cell(1, 0, xor(small))
        .with_cell(1, 1, polka(small))
        .with_cell(1, 2, spiral(small))
        .with_fixed_size(rect.width().max(0), rect.height().max(0))
        .with_background(Color::WHITE)
        .shared();
    Translate::new(grid, rect.min_x, rect.min_y).shared()
}

fn buffered(rect: Rect) -> PatternRef {
    let buffer = Buffer::new(perlin(rect));
    buffer.refresh();
    buffer.shared()
}

fn dither_references() -> References {
    References::new()
        .with("bayer", ordered(ThresholdSource::Bayer(8)))
        .with("halftone", ordered(ThresholdSource::Halftone(8)))
        .with("blue-noise", ordered(ThresholdSource::BlueNoise { size: 32, seed: 1 }))
        .with("random", ordered(ThresholdSource::Random { seed: 1 }))
        .with("multi-scale", ordered(ThresholdSource::MultiScale { fine: 2, coarse: 8 }))
        .with("yliluoma-1", yliluoma1)
        .with("yliluoma-2", yliluoma2)
        .with("knoll", knoll)
}

fn noise_references() -> References {
    References::new()
        .with("hash", hash_noise)
        .with("perlin", perlin)
        .with("worley", worley)
}

fn road_references() -> References {
    References::new()
        .with("straight", road(RoadShape::Straight))
        .with("curved", road(RoadShape::Curved { radius: 80.0 }))
        .with("t", road(RoadShape::T))
        .with("intersection", road(RoadShape::Intersection))
}

fn height_references() -> References {
    References::new()
        .with("edges", edges)
        .with("normals", normals)
        .with("occlusion", occlusion)
}

/// Registers every built-in scene and reference table.
pub fn register_builtin(registry: &mut SceneRegistry) -> Result<()> {
    registry.register("checker", checker)?;
    registry.register("circle", circle)?;
    registry.register("xor", xor)?;
    registry.register("sierpinski", sierpinski)?;
    registry.register("spiral", spiral)?;
    registry.register("polka", polka)?;
    registry.register("cross-hatch", cross_hatch)?;
    registry.register("voronoi", voronoi)?;
    registry.register("perlin", perlin)?;
    registry.register("worley", worley)?;
    registry.register("hash-noise", hash_noise)?;
    registry.register("dither", ordered(ThresholdSource::Bayer(8)))?;
    registry.register("yliluoma", yliluoma1)?;
    registry.register("knoll", knoll)?;
    registry.register("normals", normals)?;
    registry.register("posterized", posterized)?;
    registry.register("kaleidoscope", kaleidoscope)?;
    registry.register("rotated", rotated)?;
    registry.register("warped", warped)?;
    registry.register("brick", brick)?;
    registry.register("road", road(RoadShape::Intersection))?;
    registry.register("globe", globe)?;
    registry.register("textured-globe", textured_globe)?;
    registry.register("speed-lines", speed_lines)?;
    registry.register("glyph-ring", glyph_ring)?;
    registry.register("vhs", vhs)?;
    registry.register("grid", grid)?;
    registry.register("buffered", buffered)?;

    registry.register_references("dither", dither_references)?;
    registry.register_references("noise", noise_references)?;
    registry.register_references("road", road_references)?;
    registry.register_references("height", height_references)?;
    Ok(())
}
