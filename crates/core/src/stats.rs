//! Statistics kernel.
//!
//! Sales series in this domain are short, sparse, and frequently all-zero, so
//! every function here is total: degenerate input maps to 0 or to a sentinel,
//! never to `NaN` or a panic.

/// Reported coefficient of variation when mean demand is zero.
///
/// Volatility is undefined without demand; the engine treats "no demand" as
/// maximally volatile so downstream grading fails toward more attention.
pub const CV_SENTINEL: f64 = 999.0;

/// Reporting stand-in for accuracy metrics that would otherwise be infinite.
pub const METRIC_SENTINEL: f64 = 999.0;

/// Arithmetic mean. Empty input yields 0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divisor n). Empty input yields 0.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Coefficient of variation (stddev / mean).
///
/// A non-positive mean yields [`CV_SENTINEL`].
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m <= 0.0 {
        return CV_SENTINEL;
    }
    std_dev(values) / m
}

/// Least-squares slope of `values` over their index positions.
///
/// Degenerate input (fewer than two points) yields 0.
pub fn linear_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values);

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Round to two decimal places (reporting precision for derived metrics).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
