//! Daily stock ledger reconstruction from raw movement history.
//!
//! Takes the append-only movement log and rebuilds a per-product,
//! per-day ledger where each day's closing stock carries into the next
//! day's opening. Days with no activity still appear, so the output is
//! gap free over the requested window.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stocksense_core::{ProductId, TenantId};

/// One row of the append-only movement log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRecord {
    /// Owning tenant; carried through to the summary, never filtered on.
    pub tenant_id: TenantId,
    pub product_id: ProductId,
    pub sku: String,
    pub name: String,
    pub date: NaiveDate,
    /// Positive for inbound, negative for outbound.
    pub change_amount: i64,
    pub stock_before: i64,
    pub stock_after: i64,
}

/// One ledger day: opening, traffic both ways, closing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyMovement {
    pub date: NaiveDate,
    pub opening_stock: i64,
    pub inbound: i64,
    pub outbound: i64,
    pub closing_stock: i64,
}

/// Full ledger for one product over the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMovementSummary {
    pub tenant_id: TenantId,
    pub product_id: ProductId,
    pub sku: String,
    pub name: String,
    pub daily_movements: Vec<DailyMovement>,
    /// Opening stock on the first day of the window.
    pub opening_stock: i64,
    /// Closing stock on the last day of the window.
    pub closing_stock: i64,
    pub total_inbound: i64,
    pub total_outbound: i64,
}

struct ProductGroup {
    tenant_id: TenantId,
    sku: String,
    name: String,
    records: Vec<MovementRecord>,
}

/// Rebuild per-product daily ledgers over `[start, end]` inclusive.
///
/// The opening stock for the window is the `stock_before` of the
/// product's earliest record; the walk is then purely additive, so a
/// re-run over the same records reproduces the same ledger. Records
/// dated outside the window still contribute their `stock_before` to
/// seeding but produce no daily rows. Output is sorted by SKU ascending.
pub fn daily_movements(
    records: &[MovementRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<ProductMovementSummary> {
    let mut by_product: HashMap<ProductId, ProductGroup> = HashMap::new();
    for record in records {
        by_product
            .entry(record.product_id)
            .or_insert_with(|| ProductGroup {
                tenant_id: record.tenant_id,
                sku: record.sku.clone(),
                name: record.name.clone(),
                records: Vec::new(),
            })
            .records
            .push(record.clone());
    }

    tracing::debug!(
        products = by_product.len(),
        records = records.len(),
        %start,
        %end,
        "reconstructing daily ledgers"
    );

    let mut summaries: Vec<ProductMovementSummary> = by_product
        .into_iter()
        .map(|(product_id, group)| build_summary(product_id, group, start, end))
        .collect();

    summaries.sort_by(|a, b| a.sku.cmp(&b.sku));
    summaries
}

fn build_summary(
    product_id: ProductId,
    group: ProductGroup,
    start: NaiveDate,
    end: NaiveDate,
) -> ProductMovementSummary {
    struct DayChanges {
        inbound: i64,
        outbound: i64,
    }

    let mut changes_by_date: HashMap<NaiveDate, DayChanges> = HashMap::new();
    for record in &group.records {
        let entry = changes_by_date
            .entry(record.date)
            .or_insert(DayChanges { inbound: 0, outbound: 0 });
        if record.change_amount > 0 {
            entry.inbound += record.change_amount;
        } else {
            entry.outbound += record.change_amount.abs();
        }
    }

    let opening_stock = group
        .records
        .iter()
        .min_by_key(|r| r.date)
        .map(|r| r.stock_before)
        .unwrap_or(0);

    let mut daily_movements = Vec::new();
    let mut current_opening = opening_stock;
    let mut total_inbound = 0;
    let mut total_outbound = 0;

    let mut date = start;
    while date <= end {
        let (inbound, outbound) = changes_by_date
            .get(&date)
            .map(|c| (c.inbound, c.outbound))
            .unwrap_or((0, 0));
        let closing_stock = current_opening + inbound - outbound;

        daily_movements.push(DailyMovement {
            date,
            opening_stock: current_opening,
            inbound,
            outbound,
            closing_stock,
        });

        total_inbound += inbound;
        total_outbound += outbound;
        current_opening = closing_stock;
        date += chrono::Duration::days(1);
    }

    ProductMovementSummary {
        tenant_id: group.tenant_id,
        product_id,
        sku: group.sku,
        name: group.name,
        daily_movements,
        opening_stock,
        closing_stock: current_opening,
        total_inbound,
        total_outbound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn record(
        tenant_id: TenantId,
        product_id: ProductId,
        sku: &str,
        day: u32,
        change: i64,
        before: i64,
    ) -> MovementRecord {
        MovementRecord {
            tenant_id,
            product_id,
            sku: sku.to_string(),
            name: format!("product {sku}"),
            date: date(day),
            change_amount: change,
            stock_before: before,
            stock_after: before + change,
        }
    }

    #[test]
    fn closing_carries_into_next_opening() {
        let tenant = TenantId::new();
        let id = ProductId::new();
        let records = vec![
            record(tenant, id, "A-1", 1, 50, 100),
            record(tenant, id, "A-1", 3, -30, 150),
        ];
        let summaries = daily_movements(&records, date(1), date(4));
        assert_eq!(summaries.len(), 1);

        let days = &summaries[0].daily_movements;
        assert_eq!(days.len(), 4);
        for pair in days.windows(2) {
            assert_eq!(pair[0].closing_stock, pair[1].opening_stock);
        }

        assert_eq!(days[0].opening_stock, 100);
        assert_eq!(days[0].closing_stock, 150);
        // Idle day passes stock through unchanged.
        assert_eq!(days[1].inbound, 0);
        assert_eq!(days[1].closing_stock, 150);
        assert_eq!(days[2].outbound, 30);
        assert_eq!(days[2].closing_stock, 120);
        assert_eq!(summaries[0].closing_stock, 120);
        assert_eq!(summaries[0].total_inbound, 50);
        assert_eq!(summaries[0].total_outbound, 30);
    }

    #[test]
    fn same_day_records_accumulate() {
        let tenant = TenantId::new();
        let id = ProductId::new();
        let records = vec![
            record(tenant, id, "A-1", 2, 20, 10),
            record(tenant, id, "A-1", 2, -5, 30),
            record(tenant, id, "A-1", 2, 7, 25),
        ];
        let summaries = daily_movements(&records, date(2), date(2));
        let day = summaries[0].daily_movements[0];
        assert_eq!(day.inbound, 27);
        assert_eq!(day.outbound, 5);
        assert_eq!(day.opening_stock, 10);
        assert_eq!(day.closing_stock, 32);
    }

    #[test]
    fn products_sorted_by_sku() {
        let tenant = TenantId::new();
        let a = ProductId::new();
        let b = ProductId::new();
        let records = vec![
            record(tenant, b, "B-9", 1, 5, 0),
            record(tenant, a, "A-1", 1, 5, 0),
        ];
        let summaries = daily_movements(&records, date(1), date(1));
        let skus: Vec<&str> = summaries.iter().map(|s| s.sku.as_str()).collect();
        assert_eq!(skus, ["A-1", "B-9"]);
    }

    #[test]
    fn tenant_is_carried_onto_the_summary() {
        let tenant = TenantId::new();
        let id = ProductId::new();
        let records = vec![record(tenant, id, "A-1", 1, 10, 0)];
        let summaries = daily_movements(&records, date(1), date(2));
        assert_eq!(summaries[0].tenant_id, tenant);
    }

    #[test]
    fn empty_history_yields_no_summaries() {
        assert!(daily_movements(&[], date(1), date(5)).is_empty());
    }

    proptest! {
        /// Reconstruction is idempotent and the window identity
        /// `closing = opening + Σinbound - Σoutbound` always holds.
        #[test]
        fn ledger_identity_holds(
            changes in proptest::collection::vec((1u32..28, -50i64..50), 1..20),
            opening in 0i64..500,
        ) {
            let tenant = TenantId::new();
            let id = ProductId::new();
            let mut stock = opening;
            let mut sorted = changes.clone();
            sorted.sort_by_key(|(d, _)| *d);
            let records: Vec<MovementRecord> = sorted
                .into_iter()
                .map(|(day, change)| {
                    let r = record(tenant, id, "P-1", day, change, stock);
                    stock += change;
                    r
                })
                .collect();

            let first = daily_movements(&records, date(1), date(28));
            let second = daily_movements(&records, date(1), date(28));
            prop_assert_eq!(&first, &second);

            let summary = &first[0];
            prop_assert_eq!(
                summary.closing_stock,
                summary.opening_stock + summary.total_inbound - summary.total_outbound
            );
            for pair in summary.daily_movements.windows(2) {
                prop_assert_eq!(pair[0].closing_stock, pair[1].opening_stock);
            }
        }
    }
}
