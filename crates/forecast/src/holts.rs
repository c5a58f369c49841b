//! Holt's double exponential smoothing: level plus linear trend.
//!
//! Suited to series with a persistent trend and at least half a year of
//! observations.

use std::collections::BTreeMap;

use stocksense_core::stats;

use crate::accuracy::mape;
use crate::types::{ForecastMethod, ForecastResult};

/// Fallback smoothing constants when optimization has too little data.
pub const DEFAULT_ALPHA: f64 = 0.3;
pub const DEFAULT_BETA: f64 = 0.1;

/// Minimum history length for trend detection and parameter optimization.
pub const MIN_TREND_PERIODS: usize = 6;

/// Slope-to-mean ratio below which a series is treated as stationary.
const TREND_THRESHOLD: f64 = 0.05;

fn fit(history: &[f64], alpha: f64, beta: f64) -> (f64, f64) {
    let mut level = history[0];
    let mut trend = history[1] - history[0];

    for value in &history[1..] {
        let prev_level = level;
        let prev_trend = trend;
        level = alpha * value + (1.0 - alpha) * (prev_level + prev_trend);
        trend = beta * (level - prev_level) + (1.0 - beta) * prev_trend;
    }

    (level, trend)
}

/// Forecast with smoothed level `L` and trend `T`: horizon `h` predicts
/// `L + h·T`, clamped to zero (a strong negative trend never forecasts
/// negative demand).
///
/// `alpha` is clamped to `[0.1, 0.9]`, `beta` to `[0.05, 0.5]`. Histories
/// shorter than two observations cannot fit a trend and repeat the last
/// value (or zero) with zero trend.
pub fn holts_method(history: &[f64], periods: usize, alpha: f64, beta: f64) -> ForecastResult {
    if history.len() < 2 {
        let last = history.last().copied().unwrap_or(0.0);
        let mut parameters = BTreeMap::new();
        parameters.insert("alpha".to_string(), alpha);
        parameters.insert("beta".to_string(), beta);
        return ForecastResult::new(
            ForecastMethod::Holts,
            parameters,
            vec![stats::round2(last); periods],
        );
    }

    let alpha = alpha.clamp(0.1, 0.9);
    let beta = beta.clamp(0.05, 0.5);
    let (level, trend) = fit(history, alpha, beta);

    let forecast = (1..=periods)
        .map(|h| stats::round2((level + h as f64 * trend).max(0.0)))
        .collect();

    let mut parameters = BTreeMap::new();
    parameters.insert("alpha".to_string(), alpha);
    parameters.insert("beta".to_string(), beta);
    parameters.insert("level".to_string(), level);
    parameters.insert("trend".to_string(), trend);

    ForecastResult::new(ForecastMethod::Holts, parameters, forecast)
}

/// Pick `(α, β)` from a small grid by minimizing MAPE on the held-out tail.
///
/// Histories shorter than `test_size + 3` fall back to the defaults.
pub fn optimize_holts_parameters(history: &[f64], test_size: usize) -> (f64, f64) {
    if history.len() < test_size + 3 {
        return (DEFAULT_ALPHA, DEFAULT_BETA);
    }

    const ALPHA_GRID: [f64; 5] = [0.1, 0.2, 0.3, 0.4, 0.5];
    const BETA_GRID: [f64; 5] = [0.05, 0.1, 0.15, 0.2, 0.3];

    let split = history.len() - test_size;
    let (train, test) = history.split_at(split);

    let mut best = (DEFAULT_ALPHA, DEFAULT_BETA);
    let mut best_mape = f64::INFINITY;

    for alpha in ALPHA_GRID {
        for beta in BETA_GRID {
            if train.len() < 2 {
                continue;
            }
            let (level, trend) = fit(train, alpha, beta);
            let predictions: Vec<f64> = (1..=test_size)
                .map(|h| (level + h as f64 * trend).max(0.0))
                .collect();

            let score = mape(test, &predictions);
            if score.is_finite() && score < best_mape {
                best_mape = score;
                best = (alpha, beta);
            }
        }
    }

    best
}

/// Whether the series carries a meaningful linear trend.
///
/// Requires at least [`MIN_TREND_PERIODS`] observations; below the 5%
/// slope-to-mean ratio the series is treated as stationary regardless of
/// sign.
pub fn detect_trend(history: &[f64]) -> bool {
    if history.len() < MIN_TREND_PERIODS {
        return false;
    }

    let slope = stats::linear_slope(history);
    let mean = stats::mean(history);
    let baseline = if mean == 0.0 { 1.0 } else { mean };

    (slope / baseline).abs() >= TREND_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_series_forecasts_increasing_values() {
        let history = [100.0, 110.0, 120.0, 130.0, 140.0, 150.0];
        let result = holts_method(&history, 3, 0.3, 0.1);
        assert_eq!(result.forecast.len(), 3);
        assert!(result.forecast[0] < result.forecast[1]);
        assert!(result.forecast[1] < result.forecast[2]);
        assert!(result.forecast[0] > 150.0, "level should extend the trend");
    }

    #[test]
    fn strong_negative_trend_is_clamped_at_zero() {
        let history = [100.0, 80.0, 60.0, 40.0, 20.0, 10.0];
        let result = holts_method(&history, 6, 0.3, 0.1);
        assert!(result.forecast.iter().all(|v| *v >= 0.0));
        assert_eq!(*result.forecast.last().unwrap(), 0.0);
    }

    #[test]
    fn short_history_repeats_last_value_with_zero_trend() {
        let result = holts_method(&[42.0], 3, 0.3, 0.1);
        assert_eq!(result.forecast, vec![42.0, 42.0, 42.0]);

        let empty = holts_method(&[], 2, 0.3, 0.1);
        assert_eq!(empty.forecast, vec![0.0, 0.0]);
    }

    #[test]
    fn beta_is_clamped_to_bounds() {
        let result = holts_method(&[10.0, 12.0, 14.0], 1, 0.3, 0.0);
        assert_eq!(result.parameters["beta"], 0.05);
    }

    #[test]
    fn optimization_falls_back_on_short_history() {
        assert_eq!(
            optimize_holts_parameters(&[1.0, 2.0, 3.0], 3),
            (DEFAULT_ALPHA, DEFAULT_BETA)
        );
    }

    #[test]
    fn trend_detection_requires_six_periods() {
        assert!(!detect_trend(&[10.0, 20.0, 30.0, 40.0, 50.0]));
        assert!(detect_trend(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0]));
    }

    #[test]
    fn flat_series_has_no_trend() {
        assert!(!detect_trend(&[100.0; 12]));
    }

    #[test]
    fn mild_drift_below_threshold_is_stationary() {
        // Slope 1 against a mean near 100 is a ~1% ratio.
        let history: Vec<f64> = (0..12).map(|i| 100.0 + i as f64).collect();
        assert!(!detect_trend(&history));
    }

    #[test]
    fn declining_series_also_counts_as_trend() {
        let history: Vec<f64> = (0..8).map(|i| 100.0 - 10.0 * i as f64).collect();
        assert!(detect_trend(&history));
    }
}
