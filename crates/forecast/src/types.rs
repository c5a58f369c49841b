//! Forecast result types shared by every model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::accuracy::Confidence;

/// Forecasting strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForecastMethod {
    /// Simple moving average.
    Sma,
    /// Single exponential smoothing.
    Ses,
    /// Holt's double exponential smoothing (level + trend).
    Holts,
}

impl core::fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            ForecastMethod::Sma => "SMA",
            ForecastMethod::Ses => "SES",
            ForecastMethod::Holts => "Holts",
        };
        f.write_str(s)
    }
}

/// Output of a forecasting run.
///
/// `forecast` always holds exactly the requested number of periods, each value
/// non-negative and rounded to two decimals. `parameters` records the tunables
/// (and fitted state) that produced the forecast, keyed by stable names so
/// callers can persist and replay them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub method: ForecastMethod,
    pub parameters: BTreeMap<String, f64>,
    pub forecast: Vec<f64>,
    /// Validation MAPE, when the selector measured one.
    pub mape: Option<f64>,
    pub confidence: Option<Confidence>,
}

impl ForecastResult {
    pub(crate) fn new(
        method: ForecastMethod,
        parameters: BTreeMap<String, f64>,
        forecast: Vec<f64>,
    ) -> Self {
        Self {
            method,
            parameters,
            forecast,
            mape: None,
            confidence: None,
        }
    }
}
