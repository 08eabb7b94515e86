//! Numeric helpers shared by the scale math and the drawers.

/// Clamps `value` into `[min, max]`. When `min > max` the lower bound wins.
pub fn in_range(min: f64, value: f64, max: f64) -> f64 {
    if value < min {
        return min;
    }
    if value > max {
        return max;
    }
    value
}

/// Remainder that is always non-negative for a positive divider.
pub fn modulo(dividend: f64, divider: f64) -> f64 {
    ((dividend % divider) + divider) % divider
}

fn align_with_base(value: f64, base: f64, aligner: fn(f64) -> f64) -> f64 {
    if base < 1.0 && base > -1.0 {
        // Dividing by a tiny base loses precision, multiplying by its inverse doesn't.
        let opposite = 1.0 / base;
        aligner(value * opposite) / opposite
    } else {
        aligner(value / base) * base
    }
}

pub fn round_with_base(value: f64, base: f64) -> f64 {
    align_with_base(value, base, f64::round)
}

pub fn floor_with_base(value: f64, base: f64) -> f64 {
    align_with_base(value, base, f64::floor)
}

pub fn ceil_with_base(value: f64, base: f64) -> f64 {
    align_with_base(value, base, f64::ceil)
}

const SHORT_SUFFIXES: [&str; 3] = ["K", "M", "B"];

fn format_plain(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.0 too
        return "0".to_string();
    }
    format!("{}", value)
}

fn suffix_power(value: f64) -> usize {
    if value == 0.0 {
        return 0;
    }
    for power in 1..=SHORT_SUFFIXES.len() {
        let base = 1000f64.powi(power as i32);
        if value % base != 0.0 {
            return power - 1;
        }
    }
    SHORT_SUFFIXES.len()
}

/// Formats a number using `K`, `M` or `B` suffixes when it is an exact multiple of a thousand power.
///
/// `3000` becomes `3K`, `2500` stays `2500`, `4000000` becomes `4M`.
pub fn format_short(value: f64) -> String {
    match suffix_power(value) {
        0 => format_plain(value),
        power => format!(
            "{}{}",
            format_plain(value / 1000f64.powi(power as i32)),
            SHORT_SUFFIXES[power - 1]
        ),
    }
}

/// Inserts `divider` between every group of three integer digits.
pub fn format_with_thousand_groups(value: f64, divider: &str) -> String {
    let text = format_plain(value);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fractional) = match unsigned.split_once('.') {
        Some((integer, fractional)) => (integer, Some(fractional)),
        None => (unsigned, None),
    };

    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * divider.len());
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(divider);
        }
        grouped.push(*digit);
    }

    match fractional {
        Some(fractional) if !fractional.is_empty() => format!("{sign}{grouped}.{fractional}"),
        _ => format!("{sign}{grouped}"),
    }
}

/// Rounds away binary float noise such as `0.30000000000000004`.
///
/// `precision` is the maximum number of fraction digits to keep. `None` keeps 10 digits, enough to remove
/// the artifacts of the notch arithmetic.
pub fn remove_float_artifact(value: f64, precision: Option<u32>) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let digits = precision.unwrap_or(10).min(15) as i32;
    let factor = 10f64.powi(digits);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}
