//! Percentages with stable rounding

/// Round to `digits` decimal places, half away from zero.
///
/// `f64::EPSILON` is added first so values like 1.005 (stored as
/// 1.00499999...) round up the way they read.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    ((value + f64::EPSILON) * scale).round() / scale
}

/// Unrounded `part / whole * 100`; `None` when `whole` is zero
pub fn raw_percent(part: u64, whole: u64) -> Option<f64> {
    if whole == 0 {
        return None;
    }
    Some(part as f64 / whole as f64 * 100.0)
}

/// `part / whole * 100`, rounded to two decimals.
///
/// Returns `None` when `whole` is zero.
pub fn percent_of(part: u64, whole: u64) -> Option<f64> {
    raw_percent(part, whole).map(|p| round_to(p, 2))
}

/// `total / days`, rounded to two decimals; `None` for an empty window
pub fn per_day(total: u64, days: u32) -> Option<f64> {
    if days == 0 {
        return None;
    }
    Some(round_to(total as f64 / days as f64, 2))
}
