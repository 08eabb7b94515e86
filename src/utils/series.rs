//! Helpers over a single line's sample buffer (index = X position).

/// The bounds of a set of values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    pub fn merge(self, other: MinMax) -> MinMax {
        MinMax {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Minimum and maximum of the whole buffer. NaN samples are gaps. `None` when nothing else is left.
pub fn min_max(values: &[f64]) -> Option<MinMax> {
    fold_min_max(values.iter().copied())
}

fn fold_min_max(values: impl Iterator<Item = f64>) -> Option<MinMax> {
    values.filter(|value| !value.is_nan()).fold(None, |result, value| {
        Some(match result {
            None => MinMax {
                min: value,
                max: value,
            },
            Some(r) => MinMax {
                min: r.min.min(value),
                max: r.max.max(value),
            },
        })
    })
}

/// Linear interpolation between the two samples surrounding the fractional index `x`.
pub fn interpolate_linear(values: &[f64], x: f64) -> Option<f64> {
    if values.is_empty() || x.is_nan() || x < 0.0 || x > (values.len() - 1) as f64 {
        return None;
    }
    let x1 = x.floor() as usize;
    let x2 = x.ceil() as usize;
    Some(values[x1] + (values[x2] - values[x1]) * (x - x1 as f64))
}

/// Minimum and maximum over the fractional index range `[from, to]`.
///
/// The range edges are interpolated so a partially visible segment counts only up to the visible
/// position. NaN samples are gaps, an edge next to one is skipped. `None` when the range misses the
/// buffer or holds no number.
pub fn min_max_on_range(values: &[f64], from: f64, to: f64) -> Option<MinMax> {
    if values.is_empty() {
        return None;
    }
    let from = from.max(0.0);
    let to = to.min((values.len() - 1) as f64);
    if from.is_nan() || to.is_nan() || from > to {
        return None;
    }

    let first = from.ceil() as usize;
    let last = to.floor() as usize;
    let left = interpolate_linear(values, from);
    let right = interpolate_linear(values, to);
    let inner = values.iter().take(last + 1).skip(first).copied();
    fold_min_max(left.into_iter().chain(inner).chain(right))
}

/// Shifts `[inner_start, inner_end]` into `[outer_start, outer_end]` keeping its length when it fits.
pub fn fit_range_keeping_length(
    outer_start: f64,
    outer_end: f64,
    mut inner_start: f64,
    mut inner_end: f64,
) -> (f64, f64) {
    if inner_start < outer_start {
        inner_end += outer_start - inner_start;
        inner_start = outer_start;
    }
    if inner_end > outer_end {
        inner_start = outer_start.max(inner_start - (inner_end - outer_end));
        inner_end = outer_end;
    }
    (inner_start, inner_end)
}
