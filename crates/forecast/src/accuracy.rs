//! Forecast accuracy metrics: MAPE, MAE, RMSE, and a confidence classifier.

use serde::{Deserialize, Serialize};

use stocksense_core::{METRIC_SENTINEL, stats};

/// Confidence grade derived from MAPE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// `< 15` high, `< 30` medium, otherwise low.
    pub fn from_mape(mape: f64) -> Self {
        if mape < 15.0 {
            Confidence::High
        } else if mape < 30.0 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// Mean absolute percentage error, in percent.
///
/// Indices where the actual is zero are skipped (division guard). Empty or
/// mismatched series, or series with no non-zero actual, yield `INFINITY`.
pub fn mape(actuals: &[f64], forecasts: &[f64]) -> f64 {
    if actuals.is_empty() || actuals.len() != forecasts.len() {
        return f64::INFINITY;
    }

    let mut sum = 0.0;
    let mut valid = 0usize;
    for (a, f) in actuals.iter().zip(forecasts) {
        if *a != 0.0 {
            sum += (a - f).abs() / a.abs();
            valid += 1;
        }
    }

    if valid == 0 {
        return f64::INFINITY;
    }
    sum / valid as f64 * 100.0
}

/// Mean absolute error. Empty or mismatched series yield `INFINITY`.
pub fn mae(actuals: &[f64], forecasts: &[f64]) -> f64 {
    if actuals.is_empty() || actuals.len() != forecasts.len() {
        return f64::INFINITY;
    }
    actuals
        .iter()
        .zip(forecasts)
        .map(|(a, f)| (a - f).abs())
        .sum::<f64>()
        / actuals.len() as f64
}

/// Root mean square error. Empty or mismatched series yield `INFINITY`.
///
/// Squaring penalizes outliers, so RMSE ≥ MAE for any non-uniform error
/// distribution.
pub fn rmse(actuals: &[f64], forecasts: &[f64]) -> f64 {
    if actuals.is_empty() || actuals.len() != forecasts.len() {
        return f64::INFINITY;
    }
    let mean_sq = actuals
        .iter()
        .zip(forecasts)
        .map(|(a, f)| (a - f).powi(2))
        .sum::<f64>()
        / actuals.len() as f64;
    mean_sq.sqrt()
}

/// Aggregate accuracy report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    pub mape: f64,
    pub mae: f64,
    pub rmse: f64,
    pub confidence: Confidence,
}

/// Compute all three metrics at reporting precision.
///
/// Infinite metrics are replaced by the 999 sentinel; the confidence grade is
/// taken from the raw (pre-sentinel) MAPE, so undefined accuracy reads as low.
pub fn evaluate(actuals: &[f64], forecasts: &[f64]) -> AccuracyMetrics {
    let raw_mape = mape(actuals, forecasts);
    let raw_mae = mae(actuals, forecasts);
    let raw_rmse = rmse(actuals, forecasts);

    let report = |v: f64| {
        if v.is_finite() {
            stats::round2(v)
        } else {
            METRIC_SENTINEL
        }
    };

    AccuracyMetrics {
        mape: report(raw_mape),
        mae: report(raw_mae),
        rmse: report(raw_rmse),
        confidence: Confidence::from_mape(raw_mape),
    }
}
