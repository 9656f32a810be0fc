//! Boolean and fuzzy-logic combination of patterns.
//!
//! Each input is reduced to a truth value in `[0, 1]` by a [`Predicate`]; the
//! values are combined by a [`BoolOp`] and the result interpolates between the
//! false and true colors.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::{lerp, Color};
use crate::geom::Rect;
use crate::pattern::{Configurable, Pattern, PatternOption, PatternRef};

/// Reduces a color to a truth value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Predicate {
    /// 1 when alpha is above the threshold.
    AlphaAbove(u8),
    /// 1 when red is above the threshold.
    RedAbove(u8),
    /// 1 when the channel average is above the threshold.
    GrayAbove(u8),
    /// Alpha as a fraction.
    FuzzyAlpha,
    /// Red as a fraction.
    FuzzyRed,
    /// Channel average as a fraction.
    FuzzyGray,
}

impl Default for Predicate {
    fn default() -> Self {
        Predicate::AlphaAbove(0)
    }
}

impl Predicate {
    pub fn eval(self, c: Color) -> f64 {
        let gray = (c.r as f64 + c.g as f64 + c.b as f64) / 3.0;
        let bit = |b: bool| if b { 1.0 } else { 0.0 };
        match self {
            Predicate::AlphaAbove(t) => bit(c.a > t),
            Predicate::RedAbove(t) => bit(c.r > t),
            Predicate::GrayAbove(t) => bit(gray > t as f64),
            Predicate::FuzzyAlpha => c.a as f64 / 255.0,
            Predicate::FuzzyRed => c.r as f64 / 255.0,
            Predicate::FuzzyGray => gray / 255.0,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum BoolOp {
    /// Minimum.
    And,
    /// Maximum.
    Or,
    /// Left fold of `|a − b|`.
    Xor,
    /// `1 − P(first input)`.
    Not,
}

impl BoolOp {
    /// Combines truth values in input order; no inputs give 0.
    pub fn combine(self, values: impl IntoIterator<Item = f64>) -> f64 {
        let mut it = values.into_iter();
        let Some(first) = it.next() else {
            return 0.0;
        };
        match self {
            BoolOp::And => it.fold(first, f64::min),
            BoolOp::Or => it.fold(first, f64::max),
            BoolOp::Xor => it.fold(first, |acc, v| (acc - v).abs()),
            BoolOp::Not => 1.0 - first,
        }
    }
}

/// Fuzzy boolean combination of input patterns.
///
/// Bounds are the first input's (the default bounds without inputs).
#[derive(Clone, Debug)]
pub struct BooleanPattern {
    inputs: Vec<PatternRef>,
    op: BoolOp,
    predicate: Predicate,
    false_color: Color,
    true_color: Color,
}

impl BooleanPattern {
    pub fn new(op: BoolOp, inputs: Vec<PatternRef>) -> Self {
        Self {
            inputs,
            op,
            predicate: Predicate::default(),
            false_color: Color::BLACK,
            true_color: Color::WHITE,
        }
    }

    pub fn and(inputs: Vec<PatternRef>) -> Self {
        Self::new(BoolOp::And, inputs)
    }

    pub fn or(inputs: Vec<PatternRef>) -> Self {
        Self::new(BoolOp::Or, inputs)
    }

    pub fn xor(inputs: Vec<PatternRef>) -> Self {
        Self::new(BoolOp::Xor, inputs)
    }

    pub fn not(input: PatternRef) -> Self {
        Self::new(BoolOp::Not, vec![input])
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = predicate;
        self
    }

    pub fn with_colors(mut self, false_color: Color, true_color: Color) -> Self {
        self.false_color = false_color;
        self.true_color = true_color;
        self
    }

    /// Combined truth value at `(x, y)`.
    pub fn truth(&self, x: i32, y: i32) -> f64 {
        let p = self.predicate;
        self.op
            .combine(self.inputs.iter().map(|i| p.eval(i.sample(x, y))))
    }
}

impl Configurable for BooleanPattern {
    fn apply_option(&mut self, option: &PatternOption) -> bool {
        match option {
            PatternOption::SpaceColor(c) => self.false_color = *c,
            PatternOption::FillColor(c) | PatternOption::LineColor(c) => self.true_color = *c,
            _ => return false,
        }
        true
    }
}

impl Pattern for BooleanPattern {
    fn bounds(&self) -> Rect {
        self.inputs
            .first()
            .map(|p| p.bounds())
            .unwrap_or(crate::geom::DEFAULT_BOUNDS)
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        lerp(self.false_color, self.true_color, self.truth(x, y))
    }
}
