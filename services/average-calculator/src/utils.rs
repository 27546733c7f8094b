//! Numeric helpers for the Average Calculator

/// Arithmetic mean, `0.0` for an empty slice
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: i128 = values.iter().map(|&v| i128::from(v)).sum();
    sum as f64 / values.len() as f64
}

/// Round to two decimal places, half away from zero
#[must_use]
pub fn round_two_places(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
