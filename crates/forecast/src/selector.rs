//! Automatic forecast method selection.
//!
//! Selection pipeline: gate methods on history length (and trend for
//! Holt's), score the gated candidates by one-step-ahead backtesting over
//! the tail of the series, then bias irregular-demand items toward simpler
//! methods before taking the best score.

use serde::{Deserialize, Serialize};
use tracing::debug;

use stocksense_analysis::XyzGrade;
use stocksense_core::METRIC_SENTINEL;

use crate::accuracy::{AccuracyMetrics, Confidence, evaluate, mape};
use crate::holts::{self, detect_trend, holts_method, optimize_holts_parameters};
use crate::ses::{default_alpha, optimize_alpha, single_exponential_smoothing};
use crate::sma::{select_window_size, simple_moving_average};
use crate::types::{ForecastMethod, ForecastResult};

/// Held-out periods used for cross-validation and backtesting.
const TEST_SIZE: usize = 3;

/// How much worse (relative) a simple method may score and still win for
/// irregular (grade Z) demand.
const Z_GRADE_TOLERANCE: f64 = 1.2;

/// Input to automatic forecasting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastInput {
    /// Per-period demand, oldest first.
    pub history: Vec<f64>,
    /// Number of future periods to forecast.
    pub periods: usize,
    /// Volatility grade, when the caller has one.
    pub xyz_grade: Option<XyzGrade>,
}

/// Facts the selector derives from the input before choosing a method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastMetadata {
    pub data_periods: usize,
    pub xyz_grade: Option<XyzGrade>,
    pub has_trend: bool,
}

impl ForecastMetadata {
    pub fn from_input(input: &ForecastInput) -> Self {
        Self {
            data_periods: input.history.len(),
            xyz_grade: input.xyz_grade,
            has_trend: detect_trend(&input.history),
        }
    }
}

/// A concrete, runnable method candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodChoice {
    /// SMA with an auto-sized window.
    Sma,
    /// SES with grid-optimized α.
    SesAuto,
    /// SES with the grade-default α.
    SesGraded(XyzGrade),
    /// Holt's with grid-optimized (α, β).
    HoltsAuto,
}

impl MethodChoice {
    pub fn method(&self) -> ForecastMethod {
        match self {
            MethodChoice::Sma => ForecastMethod::Sma,
            MethodChoice::SesAuto | MethodChoice::SesGraded(_) => ForecastMethod::Ses,
            MethodChoice::HoltsAuto => ForecastMethod::Holts,
        }
    }

    pub fn min_data_points(&self) -> usize {
        match self {
            MethodChoice::Sma => 1,
            MethodChoice::SesAuto | MethodChoice::SesGraded(_) => 3,
            MethodChoice::HoltsAuto => holts::MIN_TREND_PERIODS,
        }
    }

    /// Run the candidate over `history`.
    pub fn run(&self, history: &[f64], periods: usize) -> ForecastResult {
        match self {
            MethodChoice::Sma => {
                simple_moving_average(history, periods, select_window_size(history.len()))
            }
            MethodChoice::SesAuto => {
                single_exponential_smoothing(history, periods, optimize_alpha(history, TEST_SIZE))
            }
            MethodChoice::SesGraded(grade) => {
                single_exponential_smoothing(history, periods, default_alpha(Some(*grade)))
            }
            MethodChoice::HoltsAuto => {
                let (alpha, beta) = optimize_holts_parameters(history, TEST_SIZE);
                holts_method(history, periods, alpha, beta)
            }
        }
    }
}

fn available_methods(metadata: &ForecastMetadata) -> Vec<MethodChoice> {
    let mut methods = Vec::new();

    if metadata.data_periods >= MethodChoice::Sma.min_data_points() {
        methods.push(MethodChoice::Sma);
    }

    let ses = match metadata.xyz_grade {
        Some(grade) => MethodChoice::SesGraded(grade),
        None => MethodChoice::SesAuto,
    };
    if metadata.data_periods >= ses.min_data_points() {
        methods.push(ses);
    }

    if metadata.data_periods >= MethodChoice::HoltsAuto.min_data_points() && metadata.has_trend {
        methods.push(MethodChoice::HoltsAuto);
    }

    methods
}

fn cross_validate(history: &[f64], methods: &[MethodChoice]) -> Vec<(MethodChoice, f64)> {
    if history.len() < TEST_SIZE + 3 {
        return methods.iter().map(|m| (*m, METRIC_SENTINEL)).collect();
    }

    let split = history.len() - TEST_SIZE;
    let (train, test) = history.split_at(split);

    methods
        .iter()
        .map(|m| {
            let result = m.run(train, TEST_SIZE);
            let score = mape(test, &result.forecast);
            let score = if score.is_finite() {
                score
            } else {
                METRIC_SENTINEL
            };
            (*m, score)
        })
        .collect()
}

/// Forecast with automatic method selection.
pub fn forecast_demand(input: &ForecastInput) -> ForecastResult {
    let metadata = ForecastMetadata::from_input(input);
    let candidates = available_methods(&metadata);

    if candidates.is_empty() {
        // No history at all: report a zero forecast, worst confidence.
        let mut result =
            simple_moving_average(&input.history, input.periods, select_window_size(0));
        result.mape = Some(METRIC_SENTINEL);
        result.confidence = Some(Confidence::Low);
        return result;
    }

    if candidates.len() == 1 {
        let mut result = candidates[0].run(&input.history, input.periods);
        result.confidence = Some(Confidence::Medium);
        return result;
    }

    let mut scored = cross_validate(&input.history, &candidates);
    scored.sort_by(|a, b| a.1.total_cmp(&b.1));
    let best_score = scored[0].1;

    // Irregular demand: prefer a simple method when it is close to the best.
    if metadata.xyz_grade == Some(XyzGrade::Z) {
        let simple = scored
            .iter()
            .find(|(m, _)| matches!(m.method(), ForecastMethod::Sma | ForecastMethod::Ses));
        if let Some((choice, score)) = simple {
            if *score < best_score * Z_GRADE_TOLERANCE {
                let mut result = choice.run(&input.history, input.periods);
                result.mape = Some(*score);
                result.confidence = Some(if *score < 30.0 {
                    Confidence::Medium
                } else {
                    Confidence::Low
                });
                debug!(method = %result.method, mape = score, "selected simple method for grade Z");
                return result;
            }
        }
    }

    let (choice, score) = scored[0];
    let mut result = choice.run(&input.history, input.periods);
    result.mape = Some(score);
    result.confidence = Some(Confidence::from_mape(score));
    debug!(method = %result.method, mape = score, "selected forecast method");
    result
}

/// Manual method parameters; unset fields take the method defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MethodParams {
    pub window_size: Option<usize>,
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
}

/// Forecast with an explicitly chosen method.
pub fn forecast_with_method(
    history: &[f64],
    periods: usize,
    method: ForecastMethod,
    params: MethodParams,
) -> ForecastResult {
    match method {
        ForecastMethod::Sma => simple_moving_average(
            history,
            periods,
            params.window_size.unwrap_or(crate::sma::DEFAULT_WINDOW),
        ),
        ForecastMethod::Ses => single_exponential_smoothing(
            history,
            periods,
            params.alpha.unwrap_or(crate::ses::DEFAULT_ALPHA),
        ),
        ForecastMethod::Holts => holts_method(
            history,
            periods,
            params.alpha.unwrap_or(holts::DEFAULT_ALPHA),
            params.beta.unwrap_or(holts::DEFAULT_BETA),
        ),
    }
}

/// Rule-based method choice without cross-validation (cheaper than
/// [`forecast_demand`], useful for large catalogs).
pub fn select_method_by_rules(metadata: &ForecastMetadata) -> MethodChoice {
    let ForecastMetadata {
        data_periods,
        xyz_grade,
        has_trend,
    } = *metadata;

    if data_periods < 3 {
        return MethodChoice::Sma;
    }

    if data_periods < 6 {
        return match xyz_grade {
            Some(XyzGrade::X) => MethodChoice::SesGraded(XyzGrade::X),
            Some(XyzGrade::Z) => MethodChoice::Sma,
            _ => MethodChoice::SesAuto,
        };
    }

    if has_trend {
        return MethodChoice::HoltsAuto;
    }

    match xyz_grade {
        Some(XyzGrade::X) => MethodChoice::SesGraded(XyzGrade::X),
        Some(XyzGrade::Y) => MethodChoice::SesAuto,
        Some(XyzGrade::Z) => MethodChoice::Sma,
        None => MethodChoice::SesAuto,
    }
}

/// Evaluate forecast quality against the realized tail of `history`.
///
/// The last `periods` observations are held out; the chosen method (or the
/// automatic selector) forecasts them from the rest. Histories too short to
/// split report sentinel metrics.
pub fn backtest(
    history: &[f64],
    periods: usize,
    method: Option<ForecastMethod>,
) -> AccuracyMetrics {
    if history.len() < periods + 3 {
        return AccuracyMetrics {
            mape: METRIC_SENTINEL,
            mae: METRIC_SENTINEL,
            rmse: METRIC_SENTINEL,
            confidence: Confidence::Low,
        };
    }

    let split = history.len() - periods;
    let (train, test) = history.split_at(split);

    let result = match method {
        Some(method) => forecast_with_method(train, periods, method, MethodParams::default()),
        None => forecast_demand(&ForecastInput {
            history: train.to_vec(),
            periods,
            xyz_grade: None,
        }),
    };

    evaluate(test, &result.forecast)
}
