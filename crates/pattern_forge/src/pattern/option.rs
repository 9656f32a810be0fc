//! Pattern options: a sum type of named settings applied at construction.
//!
//! Each pattern matches only the [`PatternOption`] variants it honors; anything else
//! is a silent no-op. This lets one option vector be passed to several patterns
//! that accept different subsets of it.
use std::fmt;

use tracing::{trace, warn};

use crate::color::Color;
use crate::geom::Rect;
use crate::pattern::PatternRef;

/// A single configurator.
#[non_exhaustive]
#[derive(Clone)]
pub enum PatternOption {
    /// Overrides the declared rectangle.
    Bounds(Rect),
    /// Width of the filled band in stripe-family patterns.
    LineSize(i32),
    /// Width of the empty band in stripe-family patterns.
    SpaceSize(i32),
    LineColor(Color),
    SpaceColor(Color),
    FillColor(Color),
    StartColor(Color),
    EndColor(Color),
    /// Rotation in degrees.
    Angle(f64),
    /// Several rotations in degrees.
    Angles(Vec<f64>),
    Radius(i32),
    MinRadius(i32),
    MaxRadius(i32),
    /// Offset along the periodic axis.
    Phase(f64),
    Seed(u64),
    /// Points (or features) per unit.
    Density(f64),
    /// Noise frequency in cycles per pixel.
    Frequency(f64),
    Palette(Vec<Color>),
    /// Pattern-valued line fill.
    LineSource(PatternRef),
    /// Pattern-valued space fill.
    SpaceSource(PatternRef),
    /// Pattern-valued fill.
    FillSource(PatternRef),
}

impl PatternOption {
    /// Stable key naming the setting, used for logging.
    pub fn key(&self) -> &'static str {
        match self {
            PatternOption::Bounds(_) => "bounds",
            PatternOption::LineSize(_) => "line-size",
            PatternOption::SpaceSize(_) => "space-size",
            PatternOption::LineColor(_) => "line-color",
            PatternOption::SpaceColor(_) => "space-color",
            PatternOption::FillColor(_) => "fill-color",
            PatternOption::StartColor(_) => "start-color",
            PatternOption::EndColor(_) => "end-color",
            PatternOption::Angle(_) => "angle",
            PatternOption::Angles(_) => "angles",
            PatternOption::Radius(_) => "radius",
            PatternOption::MinRadius(_) => "min-radius",
            PatternOption::MaxRadius(_) => "max-radius",
            PatternOption::Phase(_) => "phase",
            PatternOption::Seed(_) => "seed",
            PatternOption::Density(_) => "density",
            PatternOption::Frequency(_) => "frequency",
            PatternOption::Palette(_) => "palette",
            PatternOption::LineSource(_) => "line-image-source",
            PatternOption::SpaceSource(_) => "space-image-source",
            PatternOption::FillSource(_) => "fill-image-source",
        }
    }
}

impl fmt::Debug for PatternOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternOption::Bounds(r) => write!(f, "Bounds({r:?})"),
            PatternOption::LineSize(v) => write!(f, "LineSize({v})"),
            PatternOption::SpaceSize(v) => write!(f, "SpaceSize({v})"),
            PatternOption::LineColor(c) => write!(f, "LineColor({c:?})"),
            PatternOption::SpaceColor(c) => write!(f, "SpaceColor({c:?})"),
            PatternOption::FillColor(c) => write!(f, "FillColor({c:?})"),
            PatternOption::StartColor(c) => write!(f, "StartColor({c:?})"),
            PatternOption::EndColor(c) => write!(f, "EndColor({c:?})"),
            PatternOption::Angle(a) => write!(f, "Angle({a})"),
            PatternOption::Angles(a) => write!(f, "Angles({a:?})"),
            PatternOption::Radius(v) => write!(f, "Radius({v})"),
            PatternOption::MinRadius(v) => write!(f, "MinRadius({v})"),
            PatternOption::MaxRadius(v) => write!(f, "MaxRadius({v})"),
            PatternOption::Phase(v) => write!(f, "Phase({v})"),
            PatternOption::Seed(v) => write!(f, "Seed({v})"),
            PatternOption::Density(v) => write!(f, "Density({v})"),
            PatternOption::Frequency(v) => write!(f, "Frequency({v})"),
            PatternOption::Palette(p) => write!(f, "Palette({} colors)", p.len()),
            PatternOption::LineSource(p) => write!(f, "LineSource({:?})", p.bounds()),
            PatternOption::SpaceSource(p) => write!(f, "SpaceSource({:?})", p.bounds()),
            PatternOption::FillSource(p) => write!(f, "FillSource({:?})", p.bounds()),
        }
    }
}

/// Patterns that accept [`PatternOption`]s.
pub trait Configurable: Sized {
    /// Applies one option; returns `false` when the option does not apply to this pattern.
    fn apply_option(&mut self, option: &PatternOption) -> bool;

    /// Applies options left to right; later options override earlier ones.
    fn with_options(mut self, options: &[PatternOption]) -> Self {
        for option in options {
            if !self.apply_option(option) {
                trace!(key = option.key(), "Option not accepted; ignored.");
            }
        }
        self
    }
}

/// Returns `value` when it is positive, otherwise `default` (with a warning when negative).
pub(crate) fn positive_or(key: &str, value: i32, default: i32) -> i32 {
    if value > 0 {
        value
    } else {
        if value < 0 {
            warn!("Negative {} {} replaced by default {}.", key, value, default);
        }
        default
    }
}

/// Returns `value` when it is zero or positive, otherwise `default` (with a warning).
pub(crate) fn non_negative_or(key: &str, value: i32, default: i32) -> i32 {
    if value >= 0 {
        value
    } else {
        warn!("Negative {} {} replaced by default {}.", key, value, default);
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        line: i32,
        seed: u64,
    }

    impl Configurable for Probe {
        fn apply_option(&mut self, option: &PatternOption) -> bool {
            match option {
                PatternOption::LineSize(v) => self.line = *v,
                PatternOption::Seed(s) => self.seed = *s,
                _ => return false,
            }
            true
        }
    }

    #[test]
    fn later_options_override_earlier_ones() {
        let p = Probe::default().with_options(&[
            PatternOption::LineSize(3),
            PatternOption::Angle(45.0),
            PatternOption::LineSize(5),
            PatternOption::Seed(12345),
        ]);
        assert_eq!(p.line, 5);
        assert_eq!(p.seed, 12345);
    }

    #[test]
    fn unknown_options_are_ignored() {
        let p = Probe::default().with_options(&[
            PatternOption::Palette(vec![Color::RED]),
            PatternOption::Bounds(Rect::from_size(2, 2)),
        ]);
        assert_eq!(p.line, 0);
        assert_eq!(p.seed, 0);
    }

    #[test]
    fn size_helpers_fall_back() {
        assert_eq!(positive_or("line", 4, 9), 4);
        assert_eq!(positive_or("line", 0, 9), 9);
        assert_eq!(positive_or("line", -1, 9), 9);
        assert_eq!(non_negative_or("space", 0, 9), 0);
        assert_eq!(non_negative_or("space", -3, 9), 9);
    }

    #[test]
    fn keys_are_stable() {
        assert_eq!(PatternOption::Seed(1).key(), "seed");
        assert_eq!(PatternOption::Angles(vec![]).key(), "angles");
    }
}
