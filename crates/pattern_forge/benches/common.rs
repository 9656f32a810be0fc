use std::time::Duration;

use criterion::{Criterion, Throughput};
use pattern_forge::geom::Rect;
use pattern_forge::pattern::Pattern;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub const SIDES: [i32; 3] = [64, 128, 256];

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn pixel_throughput(rect: Rect) -> Throughput {
    let pixels = rect.width().max(1) as u64 * rect.height().max(1) as u64;
    Throughput::Elements(pixels)
}

/// Samples every pixel of `rect` and folds the colors into a checksum.
pub fn sweep(pattern: &dyn Pattern, rect: Rect) -> u64 {
    let mut acc = 0u64;
    for y in rect.min_y..rect.max_y {
        for x in rect.min_x..rect.max_x {
            let c = pattern.sample(x, y);
            acc = acc.wrapping_mul(31).wrapping_add(c.rgb_key() as u64 ^ c.a as u64);
        }
    }
    acc
}
