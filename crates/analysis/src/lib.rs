//! Value-contribution (ABC) and demand-volatility (XYZ) classification.
//!
//! All functions here are deterministic transformations of caller-supplied
//! rows; thresholds and strategy tables are explicit configuration values
//! rather than hidden globals so tenants can override them per call.

pub mod abc;
pub mod matrix;
pub mod xyz;

pub use abc::{AbcGrade, AbcItem, AbcResult, AbcThresholds, abc_analysis};
pub use matrix::{
    GradeThresholds, ItemGrades, MatrixItem, StrategyEntry, StrategyTable, combine_abc_xyz,
    grade_for_item,
};
pub use xyz::{XyzGrade, XyzItem, XyzResult, XyzThresholds, xyz_analysis};
