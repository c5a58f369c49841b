//! Demand forecasting: SMA, SES, and Holt's double exponential smoothing,
//! with accuracy metrics and automatic method/parameter selection.
//!
//! Every model is a total function over a dense, oldest-first history. All
//! forecast values are clamped to be non-negative and reported at two
//! decimals; degenerate input degrades to a constant (or zero) forecast
//! instead of failing.

pub mod accuracy;
pub mod holts;
pub mod preprocess;
pub mod selector;
pub mod ses;
pub mod sma;
pub mod types;

pub use accuracy::{AccuracyMetrics, Confidence, evaluate, mae, mape, rmse};
pub use holts::{detect_trend, holts_method, optimize_holts_parameters};
pub use preprocess::{TimeSeriesPoint, aggregate_monthly};
pub use selector::{
    ForecastInput, ForecastMetadata, MethodChoice, MethodParams, backtest, forecast_demand,
    forecast_with_method, select_method_by_rules,
};
pub use ses::{default_alpha, optimize_alpha, single_exponential_smoothing};
pub use sma::{select_window_size, simple_moving_average};
pub use types::{ForecastMethod, ForecastResult};
