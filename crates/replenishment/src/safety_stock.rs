//! Safety stock: buffer inventory against demand and lead-time variability.

use serde::{Deserialize, Serialize};

/// Service-level → z-score lookup (standard normal quantiles).
///
/// Immutable configuration; the default carries the canonical table from
/// 90% through 99.9%. Lookups interpolate linearly between known points and
/// clamp outside the table's range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZScoreTable {
    /// `(service_level, z)` pairs, service level ascending.
    points: Vec<(f64, f64)>,
}

impl Default for ZScoreTable {
    fn default() -> Self {
        Self {
            points: vec![
                (0.90, 1.28),
                (0.91, 1.34),
                (0.92, 1.41),
                (0.93, 1.48),
                (0.94, 1.55),
                (0.95, 1.65),
                (0.96, 1.75),
                (0.97, 1.88),
                (0.98, 2.05),
                (0.99, 2.33),
                (0.995, 2.58),
                (0.999, 3.09),
            ],
        }
    }
}

impl ZScoreTable {
    /// Z-score for a service level in `(0, 1)`.
    ///
    /// Exact table hits (at 3-decimal precision) return the tabulated value;
    /// levels between points interpolate linearly; levels outside the table
    /// clamp to the nearest end.
    pub fn z_score(&self, service_level: f64) -> f64 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return 1.65,
        };

        if service_level < first.0 {
            return first.1;
        }
        if service_level >= last.0 {
            return last.1;
        }

        let rounded = (service_level * 1000.0).round() / 1000.0;
        if let Some((_, z)) = self.points.iter().find(|(level, _)| *level == rounded) {
            return *z;
        }

        for window in self.points.windows(2) {
            let (lo_level, lo_z) = window[0];
            let (hi_level, hi_z) = window[1];
            if service_level >= lo_level && service_level < hi_level {
                let ratio = (service_level - lo_level) / (hi_level - lo_level);
                return lo_z + ratio * (hi_z - lo_z);
            }
        }

        1.65
    }
}

/// Inputs for the statistical safety stock calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyStockInput {
    pub average_daily_demand: f64,
    pub demand_std_dev: f64,
    pub lead_time_days: f64,
    /// Lead-time variability; `None` (or 0) selects the simplified formula.
    pub lead_time_std_dev: Option<f64>,
    /// Target service level in `(0, 1)`; defaults to 0.95 when `None`.
    pub service_level: Option<f64>,
}

/// Which formula produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyStockMethod {
    /// `z·σd·√LT` — demand variability only.
    Simplified,
    /// `z·√(LT·σd² + d̄²·σLT²)` — demand and lead-time variability.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyStockResult {
    /// Whole units, rounded up, never negative.
    pub safety_stock: i64,
    pub service_level: f64,
    pub z_score: f64,
    pub method: SafetyStockMethod,
}

/// Compute safety stock from demand (and optionally lead-time) variability.
pub fn calculate_safety_stock(input: SafetyStockInput, table: &ZScoreTable) -> SafetyStockResult {
    let service_level = input.service_level.unwrap_or(0.95);
    let z = table.z_score(service_level);
    let lead_time_std_dev = input.lead_time_std_dev.unwrap_or(0.0);

    let (raw, method) = if lead_time_std_dev > 0.0 {
        let demand_variance = input.lead_time_days * input.demand_std_dev.powi(2);
        let lead_time_variance = input.average_daily_demand.powi(2) * lead_time_std_dev.powi(2);
        (
            z * (demand_variance + lead_time_variance).sqrt(),
            SafetyStockMethod::Full,
        )
    } else {
        (
            z * input.demand_std_dev * input.lead_time_days.sqrt(),
            SafetyStockMethod::Simplified,
        )
    };

    SafetyStockResult {
        safety_stock: raw.max(0.0).ceil() as i64,
        service_level,
        z_score: z,
        method,
    }
}

/// Heuristic alternative: a fixed fraction of lead-time demand.
///
/// `factor` defaults to 0.5 in callers that have no variance data at all.
pub fn simple_safety_stock(average_daily_demand: f64, lead_time_days: f64, factor: f64) -> i64 {
    (average_daily_demand * lead_time_days * factor)
        .max(0.0)
        .ceil() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn input(std_dev: f64, lead_time: f64, lt_std: Option<f64>, level: Option<f64>) -> SafetyStockInput {
        SafetyStockInput {
            average_daily_demand: 10.0,
            demand_std_dev: std_dev,
            lead_time_days: lead_time,
            lead_time_std_dev: lt_std,
            service_level: level,
        }
    }

    #[test]
    fn tabulated_levels_return_exact_z() {
        let table = ZScoreTable::default();
        assert_eq!(table.z_score(0.90), 1.28);
        assert_eq!(table.z_score(0.95), 1.65);
        assert_eq!(table.z_score(0.99), 2.33);
        assert_eq!(table.z_score(0.999), 3.09);
    }

    #[test]
    fn levels_outside_the_table_clamp() {
        let table = ZScoreTable::default();
        assert_eq!(table.z_score(0.5), 1.28);
        assert_eq!(table.z_score(0.9999), 3.09);
    }

    #[test]
    fn levels_between_points_interpolate() {
        let table = ZScoreTable::default();
        // Halfway between 0.95 (1.65) and 0.96 (1.75).
        let z = table.z_score(0.955);
        assert!((z - 1.70).abs() < 1e-9);
    }

    #[test]
    fn simplified_formula_when_no_lead_time_variance() {
        // 1.65 × 4 × √9 = 19.8 → 20.
        let result = calculate_safety_stock(input(4.0, 9.0, None, Some(0.95)), &ZScoreTable::default());
        assert_eq!(result.method, SafetyStockMethod::Simplified);
        assert_eq!(result.safety_stock, 20);
    }

    #[test]
    fn full_formula_when_lead_time_varies() {
        let result =
            calculate_safety_stock(input(4.0, 9.0, Some(2.0), Some(0.95)), &ZScoreTable::default());
        assert_eq!(result.method, SafetyStockMethod::Full);
        // z·√(9·16 + 100·4) = 1.65·√544 ≈ 38.48 → 39.
        assert_eq!(result.safety_stock, 39);
    }

    #[test]
    fn service_level_defaults_to_95() {
        let result = calculate_safety_stock(input(4.0, 9.0, None, None), &ZScoreTable::default());
        assert_eq!(result.service_level, 0.95);
        assert_eq!(result.z_score, 1.65);
    }

    #[test]
    fn zero_variability_yields_zero_safety_stock() {
        let result = calculate_safety_stock(input(0.0, 9.0, None, None), &ZScoreTable::default());
        assert_eq!(result.safety_stock, 0);
    }

    #[test]
    fn simple_heuristic_rounds_up() {
        // 10 × 7 × 0.5 = 35.
        assert_eq!(simple_safety_stock(10.0, 7.0, 0.5), 35);
        assert_eq!(simple_safety_stock(3.3, 7.0, 0.5), 12);
    }

    proptest! {
        #[test]
        fn z_scores_are_monotone_in_service_level(
            a in 0.90f64..0.999,
            b in 0.90f64..0.999,
        ) {
            let table = ZScoreTable::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(table.z_score(lo) <= table.z_score(hi) + 1e-9);
        }

        #[test]
        fn safety_stock_is_never_negative(
            std_dev in 0.0f64..1e3,
            lead_time in 0.0f64..365.0,
            level in 0.5f64..0.9999,
        ) {
            let result = calculate_safety_stock(
                input(std_dev, lead_time, None, Some(level)),
                &ZScoreTable::default(),
            );
            prop_assert!(result.safety_stock >= 0);
        }
    }
}
