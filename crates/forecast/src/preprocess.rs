//! Sales history preprocessing: monthly aggregation of raw dated quantities.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One dated observation (e.g. a day's sales of one product).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Aggregate raw observations into a month-by-month series.
///
/// Points are summed per calendar month and returned oldest first, each
/// dated on the first of its month. Months with no observations are absent;
/// callers wanting a dense series fill the gaps from their own calendar.
pub fn aggregate_monthly(points: &[TimeSeriesPoint]) -> Vec<TimeSeriesPoint> {
    if points.is_empty() {
        return Vec::new();
    }

    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for point in points {
        *by_month
            .entry((point.date.year(), point.date.month()))
            .or_insert(0.0) += point.value;
    }

    by_month
        .into_iter()
        .filter_map(|((year, month), value)| {
            NaiveDate::from_ymd_opt(year, month, 1).map(|date| TimeSeriesPoint { date, value })
        })
        .collect()
}
