//! XYZ analysis: grade items by demand volatility (coefficient of variation).

use serde::{Deserialize, Serialize};

use stocksense_core::{CV_SENTINEL, ProductId, stats};

/// XYZ grade (demand volatility).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum XyzGrade {
    /// Stable demand.
    X,
    /// Fluctuating demand.
    Y,
    /// Irregular demand.
    Z,
}

impl core::fmt::Display for XyzGrade {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            XyzGrade::X => "X",
            XyzGrade::Y => "Y",
            XyzGrade::Z => "Z",
        };
        f.write_str(s)
    }
}

/// CV grade boundaries. Defaults: X below 0.5, Y below 1.0, Z above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XyzThresholds {
    pub x: f64,
    pub y: f64,
}

impl Default for XyzThresholds {
    fn default() -> Self {
        Self { x: 0.5, y: 1.0 }
    }
}

impl XyzThresholds {
    pub fn grade(&self, cv: f64) -> XyzGrade {
        if cv < self.x {
            XyzGrade::X
        } else if cv < self.y {
            XyzGrade::Y
        } else {
            XyzGrade::Z
        }
    }
}

/// One item with its per-period demand history (e.g. monthly sales).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XyzItem {
    pub product_id: ProductId,
    pub name: String,
    pub demand_history: Vec<f64>,
}

/// Per-item XYZ analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XyzResult {
    pub product_id: ProductId,
    pub name: String,
    pub average_demand: f64,
    pub std_dev: f64,
    /// CV rounded to 2 decimals; 999 when mean demand is zero.
    pub coefficient_of_variation: f64,
    pub grade: XyzGrade,
}

/// Perform XYZ analysis over a catalog slice.
///
/// Volatility is undefined when mean demand is zero (no sales or an empty
/// history), so those items are forced to grade Z and report the CV sentinel.
pub fn xyz_analysis(items: &[XyzItem], thresholds: XyzThresholds) -> Vec<XyzResult> {
    items
        .iter()
        .map(|item| {
            let mean = stats::mean(&item.demand_history);
            let std_dev = stats::std_dev(&item.demand_history);
            let cv = if mean > 0.0 { std_dev / mean } else { f64::INFINITY };

            let (grade, reported_cv) = if cv.is_finite() {
                (thresholds.grade(cv), stats::round2(cv))
            } else {
                (XyzGrade::Z, CV_SENTINEL)
            };

            XyzResult {
                product_id: item.product_id,
                name: item.name.clone(),
                average_demand: mean,
                std_dev,
                coefficient_of_variation: reported_cv,
                grade,
            }
        })
        .collect()
}
