#![feature(int_roundings)]
//! Replenishment decisions: stock status classification, safety stock,
//! reorder points, order quantities, and EOQ.
//!
//! Everything here is a deterministic transformation of already-scoped
//! numeric inputs. Threshold tables (z-scores, status multipliers) travel as
//! explicit configuration values with canonical defaults.

pub mod eoq;
pub mod metrics;
pub mod reorder;
pub mod safety_stock;
pub mod status;

pub use eoq::{
    DiscountBracket, DiscountedEoq, EoqInput, EoqResult, HoldingCostInput,
    OrderQuantityCostComparison, calculate_eoq, calculate_eoq_with_discounts,
    compare_order_quantity_cost, holding_cost,
};
pub use metrics::{
    InventoryMetrics, InventoryMetricsInput, SalesRecord, average_daily_sales, inventory_metrics,
};
pub use reorder::{
    OrderQuantityInput, OrderQuantityMethod, OrderQuantityResult, ReorderPointInput,
    ReorderPointResult, days_until_reorder, order_quantity, reorder_point, should_reorder,
};
pub use safety_stock::{
    SafetyStockInput, SafetyStockMethod, SafetyStockResult, ZScoreTable, calculate_safety_stock,
    simple_safety_stock,
};
pub use status::{
    InventoryStatus, StatusInput, StatusResult, classify, is_overstocked, needs_reorder,
};
