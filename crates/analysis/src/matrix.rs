//! ABC-XYZ matrix: combined grades with management priority and strategy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use stocksense_core::{ProductId, stats};

use crate::abc::{AbcGrade, AbcResult, AbcThresholds};
use crate::xyz::{XyzGrade, XyzResult, XyzThresholds};

/// Management guidance for one cell of the 3×3 matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyEntry {
    /// 1 (highest attention) through 9 (lowest).
    pub priority: u8,
    pub strategy: String,
}

/// The 9-cell priority/strategy lookup, ordered AX(1) through CZ(9).
///
/// Carried as explicit configuration so tenants can override wording or
/// priorities without touching the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyTable {
    entries: Vec<(AbcGrade, XyzGrade, StrategyEntry)>,
}

impl Default for StrategyTable {
    fn default() -> Self {
        let entry = |priority: u8, strategy: &str| StrategyEntry {
            priority,
            strategy: strategy.to_string(),
        };
        Self {
            entries: vec![
                (AbcGrade::A, XyzGrade::X, entry(1, "JIT supply, automatic reorder, high service level")),
                (AbcGrade::A, XyzGrade::Y, entry(2, "Scheduled orders, refined forecasting, secured safety stock")),
                (AbcGrade::A, XyzGrade::Z, entry(3, "Improve forecasting, supplier collaboration, high safety stock")),
                (AbcGrade::B, XyzGrade::X, entry(4, "Scheduled orders, maintain adequate stock")),
                (AbcGrade::B, XyzGrade::Y, entry(5, "Periodic review, standard safety stock")),
                (AbcGrade::B, XyzGrade::Z, entry(6, "Analyze demand pattern, adjust order cadence")),
                (AbcGrade::C, XyzGrade::X, entry(7, "Bulk orders, low order frequency")),
                (AbcGrade::C, XyzGrade::Y, entry(8, "Occasional review, minimal stock")),
                (AbcGrade::C, XyzGrade::Z, entry(9, "Consider make-to-order, minimize or discontinue stock")),
            ],
        }
    }
}

impl StrategyTable {
    /// Guidance for a combined grade. Unknown combinations (possible only
    /// with a customized table) fall back to the lowest priority.
    pub fn lookup(&self, abc: AbcGrade, xyz: XyzGrade) -> StrategyEntry {
        self.entries
            .iter()
            .find(|(a, x, _)| *a == abc && *x == xyz)
            .map(|(_, _, e)| e.clone())
            .unwrap_or(StrategyEntry {
                priority: 9,
                strategy: "No strategy defined".to_string(),
            })
    }
}

/// One row of the combined ABC-XYZ matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixItem {
    pub product_id: ProductId,
    pub name: String,
    pub abc_grade: AbcGrade,
    pub xyz_grade: XyzGrade,
    /// "AX" through "CZ".
    pub combined_grade: String,
    pub priority: u8,
    pub strategy: String,
}

/// Combine ABC and XYZ result sets by product id (inner join).
///
/// Items missing from either result set are dropped rather than defaulted;
/// the caller decides how to treat ungraded products.
pub fn combine_abc_xyz(
    abc_results: &[AbcResult],
    xyz_results: &[XyzResult],
    strategies: &StrategyTable,
) -> Vec<MatrixItem> {
    let xyz_by_id: HashMap<ProductId, &XyzResult> =
        xyz_results.iter().map(|r| (r.product_id, r)).collect();

    let combined: Vec<MatrixItem> = abc_results
        .iter()
        .filter_map(|abc| {
            let xyz = xyz_by_id.get(&abc.product_id)?;
            let entry = strategies.lookup(abc.grade, xyz.grade);
            Some(MatrixItem {
                product_id: abc.product_id,
                name: abc.name.clone(),
                abc_grade: abc.grade,
                xyz_grade: xyz.grade,
                combined_grade: format!("{}{}", abc.grade, xyz.grade),
                priority: entry.priority,
                strategy: entry.strategy,
            })
        })
        .collect();

    debug!(
        abc = abc_results.len(),
        xyz = xyz_results.len(),
        combined = combined.len(),
        "combined ABC-XYZ matrix"
    );

    combined
}

/// Threshold bundle for the single-item grading path.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GradeThresholds {
    pub abc: AbcThresholds,
    pub xyz: XyzThresholds,
}

/// Grades returned by the ad-hoc single-item path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGrades {
    pub abc: AbcGrade,
    pub xyz: XyzGrade,
    pub combined: String,
}

/// Grade a single item without running the batch pipeline.
///
/// `cumulative_value_before` is the summed value of all higher-ranked items;
/// the result is identical to what the batch path would assign for the same
/// position. Used for ad-hoc what-if queries.
pub fn grade_for_item(
    value: f64,
    total_value: f64,
    cumulative_value_before: f64,
    demand_history: &[f64],
    thresholds: GradeThresholds,
) -> ItemGrades {
    let abc = if total_value > 0.0 {
        thresholds
            .abc
            .grade((cumulative_value_before + value) / total_value)
    } else {
        AbcGrade::C
    };

    let mean = stats::mean(demand_history);
    let xyz = if mean > 0.0 {
        thresholds.xyz.grade(stats::std_dev(demand_history) / mean)
    } else {
        XyzGrade::Z
    };

    ItemGrades {
        abc,
        xyz,
        combined: format!("{abc}{xyz}"),
    }
}
