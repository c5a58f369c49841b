//! Derived stock figures: available and effective stock, days of
//! inventory, and inventory valuation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stocksense_core::stats;

/// Default lookback window for the daily sales average.
pub const DEFAULT_SALES_PERIOD_DAYS: i64 = 30;

/// Point inputs for one product's stock figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventoryMetricsInput {
    pub current_stock: i64,
    /// Committed to open orders but not yet shipped.
    pub reserved_stock: i64,
    /// On confirmed inbound purchase orders.
    pub incoming_stock: i64,
    pub average_daily_sales: f64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventoryMetrics {
    /// `current - reserved`, floored at zero.
    pub available_stock: i64,
    /// `current + incoming - reserved`, floored at zero.
    pub effective_stock: i64,
    /// `current / average daily sales`; `None` when nothing is selling.
    pub days_of_inventory: Option<f64>,
    pub inventory_value: f64,
    pub available_inventory_value: f64,
}

/// Compute the derived stock figures for one product.
pub fn inventory_metrics(input: InventoryMetricsInput) -> InventoryMetrics {
    let InventoryMetricsInput {
        current_stock,
        reserved_stock,
        incoming_stock,
        average_daily_sales,
        unit_price,
    } = input;

    let available_stock = (current_stock - reserved_stock).max(0);
    let effective_stock = (current_stock + incoming_stock - reserved_stock).max(0);

    let days_of_inventory = if average_daily_sales > 0.0 {
        Some(stats::round2(current_stock as f64 / average_daily_sales))
    } else {
        None
    };

    InventoryMetrics {
        available_stock,
        effective_stock,
        days_of_inventory,
        inventory_value: current_stock as f64 * unit_price,
        available_inventory_value: available_stock as f64 * unit_price,
    }
}

/// One dated sale, as fed to the daily-average window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub quantity: i64,
}

/// Average units sold per day over the `period_days` ending at `as_of`,
/// inclusive on both ends.
///
/// The divisor is the window length, not the number of selling days, so
/// sparse sellers read low rather than spiky. Records outside the window
/// are ignored.
pub fn average_daily_sales(
    records: &[SalesRecord],
    as_of: NaiveDate,
    period_days: i64,
) -> f64 {
    if records.is_empty() || period_days <= 0 {
        return 0.0;
    }

    let start = as_of - chrono::Duration::days(period_days);
    let total: i64 = records
        .iter()
        .filter(|r| r.date >= start && r.date <= as_of)
        .map(|r| r.quantity)
        .sum();

    stats::round2(total as f64 / period_days as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn available_and_effective_stock() {
        let metrics = inventory_metrics(InventoryMetricsInput {
            current_stock: 100,
            reserved_stock: 30,
            incoming_stock: 50,
            average_daily_sales: 10.0,
            unit_price: 2.5,
        });
        assert_eq!(metrics.available_stock, 70);
        assert_eq!(metrics.effective_stock, 120);
        assert_eq!(metrics.days_of_inventory, Some(10.0));
        assert_eq!(metrics.inventory_value, 250.0);
        assert_eq!(metrics.available_inventory_value, 175.0);
    }

    #[test]
    fn over_reservation_floors_at_zero() {
        let metrics = inventory_metrics(InventoryMetricsInput {
            current_stock: 10,
            reserved_stock: 25,
            incoming_stock: 0,
            average_daily_sales: 1.0,
            unit_price: 1.0,
        });
        assert_eq!(metrics.available_stock, 0);
        assert_eq!(metrics.effective_stock, 0);
        assert_eq!(metrics.available_inventory_value, 0.0);
    }

    #[test]
    fn no_sales_means_no_days_of_inventory() {
        let metrics = inventory_metrics(InventoryMetricsInput {
            current_stock: 100,
            reserved_stock: 0,
            incoming_stock: 0,
            average_daily_sales: 0.0,
            unit_price: 1.0,
        });
        assert_eq!(metrics.days_of_inventory, None);
    }

    #[test]
    fn daily_average_over_the_window() {
        let records = [
            SalesRecord { date: date(2024, 3, 1), quantity: 30 },
            SalesRecord { date: date(2024, 3, 15), quantity: 60 },
            // Outside the 30-day window, must be ignored.
            SalesRecord { date: date(2024, 1, 1), quantity: 900 },
        ];
        let avg = average_daily_sales(&records, date(2024, 3, 20), 30);
        assert_eq!(avg, 3.0);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let records = [
            SalesRecord { date: date(2024, 3, 1), quantity: 30 },
            SalesRecord { date: date(2024, 3, 31), quantity: 30 },
        ];
        let avg = average_daily_sales(&records, date(2024, 3, 31), 30);
        assert_eq!(avg, 2.0);
    }

    #[test]
    fn empty_records_average_zero() {
        assert_eq!(average_daily_sales(&[], date(2024, 3, 20), 30), 0.0);
    }
}
