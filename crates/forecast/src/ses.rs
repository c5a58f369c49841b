//! Single exponential smoothing: exponentially decaying weights, constant
//! forecast.
//!
//! Suited to stable-to-moderate volatility (grades X/Y) without a trend.

use std::collections::BTreeMap;

use stocksense_analysis::XyzGrade;
use stocksense_core::stats;

use crate::accuracy::mape;
use crate::types::{ForecastMethod, ForecastResult};

/// Fallback smoothing constant when optimization has too little data.
pub const DEFAULT_ALPHA: f64 = 0.3;

/// Smooth the history with `S_t = α·x_t + (1-α)·S_{t-1}` (seeded at `x_0`)
/// and repeat the final smoothed value for every future period.
///
/// `alpha` is clamped to `[0.1, 0.9]`. An empty history yields zeros.
pub fn single_exponential_smoothing(history: &[f64], periods: usize, alpha: f64) -> ForecastResult {
    if history.is_empty() {
        let mut parameters = BTreeMap::new();
        parameters.insert("alpha".to_string(), alpha);
        return ForecastResult::new(ForecastMethod::Ses, parameters, vec![0.0; periods]);
    }

    let alpha = alpha.clamp(0.1, 0.9);

    let mut smoothed = history[0];
    for value in &history[1..] {
        smoothed = alpha * value + (1.0 - alpha) * smoothed;
    }

    let mut parameters = BTreeMap::new();
    parameters.insert("alpha".to_string(), alpha);
    parameters.insert("last_smoothed".to_string(), smoothed);

    ForecastResult::new(
        ForecastMethod::Ses,
        parameters,
        vec![stats::round2(smoothed); periods],
    )
}

/// Pick the `α` from a 0.1..0.9 grid that minimizes MAPE on the held-out
/// tail of the history.
///
/// Histories shorter than `test_size + 3` cannot support a split and fall
/// back to [`DEFAULT_ALPHA`].
pub fn optimize_alpha(history: &[f64], test_size: usize) -> f64 {
    if history.len() < test_size + 3 {
        return DEFAULT_ALPHA;
    }

    let split = history.len() - test_size;
    let (train, test) = history.split_at(split);

    let mut best_alpha = DEFAULT_ALPHA;
    let mut best_mape = f64::INFINITY;

    for step in 1..=9 {
        let alpha = step as f64 / 10.0;

        let mut smoothed = train[0];
        for value in &train[1..] {
            smoothed = alpha * value + (1.0 - alpha) * smoothed;
        }

        let predictions = vec![smoothed; test_size];
        let score = mape(test, &predictions);
        if score.is_finite() && score < best_mape {
            best_mape = score;
            best_alpha = alpha;
        }
    }

    best_alpha
}

/// Heuristic smoothing constant by demand volatility grade.
///
/// Stable demand reacts slowly (low α); irregular demand weights recent
/// observations heavily.
pub fn default_alpha(grade: Option<XyzGrade>) -> f64 {
    match grade {
        Some(XyzGrade::X) => 0.2,
        Some(XyzGrade::Y) => 0.4,
        Some(XyzGrade::Z) => 0.6,
        None => DEFAULT_ALPHA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_recursion_matches_hand_computation() {
        // S0=100, S1=103, S2=103.6, S3=107.02 at α=0.3.
        let result = single_exponential_smoothing(&[100.0, 110.0, 105.0, 115.0], 3, 0.3);
        assert_eq!(result.forecast, vec![107.02, 107.02, 107.02]);
        assert_eq!(result.parameters["alpha"], 0.3);
    }

    #[test]
    fn alpha_is_clamped_to_valid_range() {
        let low = single_exponential_smoothing(&[10.0, 20.0], 1, 0.0);
        assert_eq!(low.parameters["alpha"], 0.1);
        let high = single_exponential_smoothing(&[10.0, 20.0], 1, 1.5);
        assert_eq!(high.parameters["alpha"], 0.9);
    }

    #[test]
    fn single_observation_is_repeated() {
        let result = single_exponential_smoothing(&[42.0], 4, 0.3);
        assert_eq!(result.forecast, vec![42.0; 4]);
    }

    #[test]
    fn empty_history_forecasts_zero() {
        let result = single_exponential_smoothing(&[], 2, 0.3);
        assert_eq!(result.forecast, vec![0.0, 0.0]);
    }

    #[test]
    fn optimization_falls_back_on_short_history() {
        assert_eq!(optimize_alpha(&[10.0, 12.0, 11.0], 3), DEFAULT_ALPHA);
    }

    #[test]
    fn optimization_returns_a_grid_value() {
        let history: Vec<f64> = (0..12).map(|i| 100.0 + (i % 3) as f64 * 5.0).collect();
        let alpha = optimize_alpha(&history, 3);
        assert!((1..=9).any(|s| (alpha - s as f64 / 10.0).abs() < 1e-12));
    }

    #[test]
    fn grade_defaults_scale_with_volatility() {
        assert_eq!(default_alpha(Some(XyzGrade::X)), 0.2);
        assert_eq!(default_alpha(Some(XyzGrade::Y)), 0.4);
        assert_eq!(default_alpha(Some(XyzGrade::Z)), 0.6);
        assert_eq!(default_alpha(None), 0.3);
    }
}
