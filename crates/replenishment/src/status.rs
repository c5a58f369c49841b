//! Seven-state inventory status classification.
//!
//! Rule order is load-bearing: downstream alerting keys off these exact
//! boundaries, so the precedence below must not be reordered. Boundary
//! values fall into the first rule whose strict inequality they satisfy
//! (e.g. `current == safety_stock` fails rule 3 and lands in `Caution`).

use serde::{Deserialize, Serialize};

/// Operational stock status, strictest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryStatus {
    OutOfStock,
    Critical,
    Shortage,
    Caution,
    Optimal,
    Excess,
    Overstock,
}

/// Classification input: the three per-product threshold values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusInput {
    pub current_stock: f64,
    pub safety_stock: f64,
    pub reorder_point: f64,
}

/// Classification output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusResult {
    pub status: InventoryStatus,
    /// False only for `Optimal`.
    pub needs_action: bool,
    /// 0 (none) through 3 (highest).
    pub urgency_level: u8,
    pub recommendation: &'static str,
}

/// Classify current stock against safety stock and reorder point.
///
/// First matching rule wins:
/// 1. `== 0`              → out of stock (urgency 3)
/// 2. `< safety × 0.5`    → critical     (urgency 3)
/// 3. `< safety`          → shortage     (urgency 2)
/// 4. `< reorder point`   → caution      (urgency 1)
/// 5. `< safety × 3.0`    → optimal      (urgency 0)
/// 6. `< safety × 5.0`    → excess       (urgency 1)
/// 7. otherwise           → overstock    (urgency 2)
pub fn classify(input: StatusInput) -> StatusResult {
    let StatusInput {
        current_stock,
        safety_stock,
        reorder_point,
    } = input;

    if current_stock == 0.0 {
        return StatusResult {
            status: InventoryStatus::OutOfStock,
            needs_action: true,
            urgency_level: 3,
            recommendation: "Place an emergency order immediately",
        };
    }

    if current_stock < safety_stock * 0.5 {
        return StatusResult {
            status: InventoryStatus::Critical,
            needs_action: true,
            urgency_level: 3,
            recommendation: "Urgent order recommended; negotiate a shorter lead time",
        };
    }

    if current_stock < safety_stock {
        return StatusResult {
            status: InventoryStatus::Shortage,
            needs_action: true,
            urgency_level: 2,
            recommendation: "Proceed with an order",
        };
    }

    if current_stock < reorder_point {
        return StatusResult {
            status: InventoryStatus::Caution,
            needs_action: true,
            urgency_level: 1,
            recommendation: "Review and prepare an order",
        };
    }

    if current_stock < safety_stock * 3.0 {
        return StatusResult {
            status: InventoryStatus::Optimal,
            needs_action: false,
            urgency_level: 0,
            recommendation: "Stock level is adequate",
        };
    }

    if current_stock < safety_stock * 5.0 {
        return StatusResult {
            status: InventoryStatus::Excess,
            needs_action: true,
            urgency_level: 1,
            recommendation: "Consider running down stock (promotion, transfer)",
        };
    }

    StatusResult {
        status: InventoryStatus::Overstock,
        needs_action: true,
        urgency_level: 2,
        recommendation: "Plan stock disposal (discount, return, write-off)",
    }
}

/// Whether the status calls for placing an order.
pub fn needs_reorder(input: StatusInput) -> bool {
    matches!(
        classify(input).status,
        InventoryStatus::OutOfStock
            | InventoryStatus::Critical
            | InventoryStatus::Shortage
            | InventoryStatus::Caution
    )
}

/// Whether the status indicates too much stock.
pub fn is_overstocked(input: StatusInput) -> bool {
    matches!(
        classify(input).status,
        InventoryStatus::Excess | InventoryStatus::Overstock
    )
}
