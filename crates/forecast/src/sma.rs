//! Simple moving average: average of the last N observations, repeated.
//!
//! Suited to stable demand (grade X), short histories, and fast-moving
//! markets where older observations carry no signal.

use std::collections::BTreeMap;

use stocksense_core::stats;

use crate::types::{ForecastMethod, ForecastResult};

/// Default moving-average window.
pub const DEFAULT_WINDOW: usize = 3;

/// Forecast the next `periods` values as the average of the last
/// `window_size` observations.
///
/// The window shrinks to the history length when the history is shorter.
/// An empty history yields an all-zero forecast.
pub fn simple_moving_average(
    history: &[f64],
    periods: usize,
    window_size: usize,
) -> ForecastResult {
    if history.is_empty() {
        let mut parameters = BTreeMap::new();
        parameters.insert("window_size".to_string(), window_size as f64);
        return ForecastResult::new(ForecastMethod::Sma, parameters, vec![0.0; periods]);
    }

    let window = window_size.clamp(1, history.len());
    let average = stats::mean(&history[history.len() - window..]);

    let mut parameters = BTreeMap::new();
    parameters.insert("window_size".to_string(), window as f64);
    parameters.insert("average".to_string(), average);

    ForecastResult::new(
        ForecastMethod::Sma,
        parameters,
        vec![stats::round2(average); periods],
    )
}

/// Recommended window for a history of `periods` observations.
///
/// Short histories use everything; longer ones cap at a quarter, half year,
/// then a full year of periods.
pub fn select_window_size(periods: usize) -> usize {
    if periods < 3 {
        periods
    } else if periods < 6 {
        3
    } else if periods < 12 {
        6
    } else {
        12
    }
}
