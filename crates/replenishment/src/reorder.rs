//! Reorder point and recommended order quantity.

use serde::{Deserialize, Serialize};

/// Inputs for the reorder point calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReorderPointInput {
    pub average_daily_demand: f64,
    pub lead_time_days: f64,
    pub safety_stock: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderPointResult {
    /// Trigger level: lead-time demand plus safety stock.
    pub reorder_point: i64,
    /// Expected demand during the lead time, rounded up.
    pub lead_time_demand: i64,
    pub safety_stock: i64,
}

/// `reorder_point = ceil(d̄ × LT) + safety_stock`.
pub fn reorder_point(input: ReorderPointInput) -> ReorderPointResult {
    let lead_time_demand = (input.average_daily_demand * input.lead_time_days)
        .max(0.0)
        .ceil() as i64;
    ReorderPointResult {
        reorder_point: lead_time_demand + input.safety_stock,
        lead_time_demand,
        safety_stock: input.safety_stock,
    }
}

/// Whether current stock has reached the reorder trigger.
pub fn should_reorder(current_stock: f64, reorder_point: f64) -> bool {
    current_stock <= reorder_point
}

/// Days of consumption left before the reorder point is reached.
///
/// `None` when there is no demand to consume the stock (reordering on a
/// timer makes no sense for a dead item).
pub fn days_until_reorder(
    current_stock: f64,
    reorder_point: f64,
    average_daily_demand: f64,
) -> Option<i64> {
    if average_daily_demand <= 0.0 {
        return None;
    }
    if current_stock <= reorder_point {
        return Some(0);
    }
    Some(((current_stock - reorder_point) / average_daily_demand).floor() as i64)
}

/// Policy that produced a recommended order quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderQuantityMethod {
    /// Use the precomputed economic order quantity outright.
    Eoq,
    /// Order up to `target_days` of cover plus safety stock.
    TargetDays,
}

/// Inputs for the recommended order quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderQuantityInput {
    pub current_stock: f64,
    pub safety_stock: f64,
    pub average_daily_demand: f64,
    /// Days of cover for the target-days policy; defaults to 30.
    pub target_days_of_inventory: Option<f64>,
    /// Precomputed EOQ; a positive value switches to the EOQ policy.
    pub eoq: Option<i64>,
    /// Supplier minimum order quantity.
    pub min_order_quantity: Option<i64>,
    /// Pack/carton multiple the order must round up to.
    pub order_multiple: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderQuantityResult {
    pub recommended_quantity: i64,
    /// Stock level once the order lands.
    pub projected_stock: f64,
    /// Days of cover (above safety stock) once the order lands.
    pub projected_days_of_inventory: i64,
    pub method: OrderQuantityMethod,
}

/// Recommend an order quantity.
///
/// Post-processing applies in a fixed order: clamp up to the MOQ, then round
/// up to the order multiple.
pub fn order_quantity(input: OrderQuantityInput) -> OrderQuantityResult {
    let target_days = input.target_days_of_inventory.unwrap_or(30.0);
    let min_order_quantity = input.min_order_quantity.unwrap_or(1).max(0);
    let order_multiple = input.order_multiple.unwrap_or(1).max(1);

    let (base_quantity, method) = match input.eoq {
        Some(eoq) if eoq > 0 => (eoq as f64, OrderQuantityMethod::Eoq),
        _ => {
            let target_stock = input.average_daily_demand * target_days + input.safety_stock;
            (
                (target_stock - input.current_stock).max(0.0),
                OrderQuantityMethod::TargetDays,
            )
        }
    };

    let mut quantity = (base_quantity.ceil() as i64).max(min_order_quantity);
    if order_multiple > 1 {
        quantity = quantity.div_ceil(order_multiple) * order_multiple;
    }

    let projected_stock = input.current_stock + quantity as f64;
    let projected_days_of_inventory = if input.average_daily_demand > 0.0 {
        ((projected_stock - input.safety_stock) / input.average_daily_demand).floor() as i64
    } else {
        0
    };

    OrderQuantityResult {
        recommended_quantity: quantity,
        projected_stock,
        projected_days_of_inventory,
        method,
    }
}
