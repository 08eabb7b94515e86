//! Axis scale math.
//!
//! Notch spacing lives on a 1-2-5 ladder: rung `3k` is `10^k`, rung `3k + 1` is `2·10^k` and rung `3k + 2`
//! is `5·10^k`. A fractional rung blends the two neighbouring rungs, which lets the axes crossfade while
//! zooming.

use crate::utils::number::{ceil_with_base, floor_with_base, modulo, round_with_base};
use d3rs::scale::{LinearScale, Scale as D3Scale};
use std::f64::consts::LOG10_2;

const LOG10_5: f64 = 0.698_970_004_336_018_8;

/// Returns the ladder rung that fits `value`.
///
/// `round_up` picks the next rung at or above the value, otherwise the one at or below it.
/// `0` maps to `-∞`.
pub fn sub_decimal_scale(value: f64, round_up: bool) -> f64 {
    let log10 = value.log10();
    if log10 == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    if let Some(rung) = exact_rung(value, log10) {
        return rung;
    }
    let base = log10.floor();
    let remainder = modulo(log10, 1.0);

    if remainder == 0.0 || (!round_up && remainder < LOG10_2) {
        return base * 3.0;
    }
    if remainder <= LOG10_2 || (!round_up && remainder < LOG10_5) {
        return base * 3.0 + 1.0;
    }
    if remainder <= LOG10_5 || !round_up {
        return base * 3.0 + 2.0;
    }
    base * 3.0 + 3.0
}

// log10 drifts by an ulp on exact ladder values, so those are matched against the rung values instead.
fn exact_rung(value: f64, log10: f64) -> Option<f64> {
    if !log10.is_finite() {
        return None;
    }
    let base = log10.round();
    for candidate_base in [base - 1.0, base] {
        for (offset, multiplier) in [1.0, 2.0, 5.0].into_iter().enumerate() {
            let candidate = multiplier * 10f64.powf(candidate_base);
            if (value - candidate).abs() <= candidate * 1e-12 {
                return Some(candidate_base * 3.0 + offset as f64);
            }
        }
    }
    None
}

/// Converts a ladder rung back to its plain value: `0 → 1`, `1 → 2`, `2 → 5`, `3 → 10` and so on.
///
/// Fractional rungs are floored.
pub fn sub_decimal_scale_to_number(scale: f64) -> f64 {
    let base = 10f64.powf((scale / 3.0).floor());
    let remainder = modulo(scale, 3.0);
    if remainder < 1.0 {
        base
    } else if remainder < 2.0 {
        base * 2.0
    } else {
        base * 5.0
    }
}

/// The smallest rung whose step, repeated `max_notch_count` times, covers `range_size`.
pub fn scale_to_fit_range(range_size: f64, max_notch_count: f64) -> f64 {
    sub_decimal_scale((range_size / max_notch_count).abs().max(1e-12), true)
}

/// A value range aligned to the notches of `notch_scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecimalScaleState {
    pub min: f64,
    pub max: f64,
    pub notch_scale: f64,
}

/// Picks a range so the notches stay in place unless `notch_count` changes.
///
/// The minimum is aligned down to the rung step and the maximum is exactly `notch_count` steps above it.
/// The rung is bumped once when that doesn't reach `max_value`.
pub fn value_range_for_fixed_notches(min_value: f64, max_value: f64, notch_count: f64) -> DecimalScaleState {
    let range_for = |notch_scale: f64| {
        let notch_value = sub_decimal_scale_to_number(notch_scale);
        let aligned_min = floor_with_base(min_value, notch_value);
        (aligned_min, aligned_min + notch_value * notch_count)
    };

    let mut notch_scale = scale_to_fit_range(max_value - min_value, notch_count);
    let (mut min, mut max) = range_for(notch_scale);
    if max < max_value {
        notch_scale += 1.0;
        (min, max) = range_for(notch_scale);
    }

    DecimalScaleState {
        min,
        max,
        notch_scale,
    }
}

/// Like [`value_range_for_fixed_notches`] but the top follows `max_value` exactly while the bottom notch
/// stays fixed.
pub fn value_range_for_fixed_bottom(min_value: f64, max_value: f64, max_notch_count: f64) -> DecimalScaleState {
    let fixed = value_range_for_fixed_notches(min_value, max_value, max_notch_count);
    DecimalScaleState {
        min: fixed.min,
        max: max_value,
        notch_scale: fixed.notch_scale,
    }
}

/// One gridline produced by [`list_notches_for_range`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Notch {
    pub value: f64,
    pub opacity: f64,
}

/// Lazily walks the notches of a possibly fractional rung. Clone it to restart.
#[derive(Clone, Debug)]
pub struct Notches {
    max: f64,
    notch1: f64,
    notch2: f64,
    notch1_size: f64,
    notch2_size: f64,
    transition: f64,
}

impl Iterator for Notches {
    type Item = Notch;

    fn next(&mut self) -> Option<Notch> {
        if !(self.notch1 <= self.max || self.notch2 <= self.max) {
            return None;
        }
        let notch = if self.notch1 == self.notch2 {
            let value = self.notch1;
            self.notch1 = align_value(self.notch1 + self.notch1_size);
            self.notch2 = align_value(self.notch2 + self.notch2_size);
            Notch { value, opacity: 1.0 }
        } else if self.notch1 < self.notch2 {
            let value = self.notch1;
            self.notch1 = align_value(self.notch1 + self.notch1_size);
            Notch {
                value,
                opacity: 1.0 - self.transition,
            }
        } else {
            let value = self.notch2;
            self.notch2 = align_value(self.notch2 + self.notch2_size);
            Notch {
                value,
                opacity: self.transition,
            }
        };
        Some(notch)
    }
}

/// Lists the notches within `[min_value, max_value]` for `notch_scale`.
///
/// Notches of the floor rung fade out and notches of the ceiling rung fade in as the fractional part grows.
/// Coincident notches merge into one fully opaque notch. Degenerate inputs yield nothing.
pub fn list_notches_for_range(min_value: f64, max_value: f64, notch_scale: f64) -> Notches {
    let notch1_size = sub_decimal_scale_to_number(notch_scale.floor());
    let notch2_size = sub_decimal_scale_to_number(notch_scale.ceil());
    let valid = min_value.is_finite()
        && max_value.is_finite()
        && notch1_size.is_finite()
        && notch2_size.is_finite()
        && notch1_size > 0.0
        && notch2_size > 0.0;

    if !valid {
        return Notches {
            max: f64::NEG_INFINITY,
            notch1: 0.0,
            notch2: 0.0,
            notch1_size: 1.0,
            notch2_size: 1.0,
            transition: 0.0,
        };
    }

    Notches {
        max: max_value,
        notch1: ceil_with_base(min_value, notch1_size),
        notch2: ceil_with_base(min_value, notch2_size),
        notch1_size,
        notch2_size,
        transition: modulo(notch_scale, 1.0),
    }
}

fn align_value(value: f64) -> f64 {
    round_with_base(value, 1e-10)
}

/// A linear mapping between a data domain and a pixel range.
///
/// Domain and range are kept next to the d3 scale so callers can read them back without going through
/// the builder.
#[derive(Clone)]
pub struct ChartScale {
    scale: LinearScale,
    domain: (f64, f64),
    range: (f64, f64),
}

impl ChartScale {
    pub fn new_linear(domain: (f64, f64), range: (f64, f64)) -> Self {
        let mut d_min = domain.0;
        let mut d_max = domain.1;
        if (d_max - d_min).abs() < f64::EPSILON {
            d_min -= 0.5;
            d_max += 0.5;
        }
        let scale = LinearScale::new().domain(d_min, d_max).range(range.0, range.1);
        Self {
            scale,
            domain: (d_min, d_max),
            range,
        }
    }

    pub fn map(&self, value: f64) -> f64 {
        let res = self.scale.scale(value);
        if res.is_nan() || res.is_infinite() {
            0.0
        } else {
            res
        }
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        self.scale.invert(pixel).unwrap_or(0.0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Pixels per domain unit.
    pub fn ratio(&self) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;
        (r_max - r_min) / (d_max - d_min)
    }
}
