//! Lot-level stock with FEFO/FIFO allocation.
//!
//! Outbound quantities are drawn from lots in expiry order (earliest
//! first, lots without an expiry date last), breaking ties by received
//! date and then creation timestamp. A deduction either fully succeeds
//! or leaves every lot untouched.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stocksense_core::{EngineError, EngineResult, LotId, ProductId};

/// Lifecycle of a lot. A lot flips to `Depleted` the moment its
/// remaining quantity reaches zero; `Expired` is set by upstream
/// housekeeping and excludes the lot from allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotStatus {
    Active,
    Depleted,
    Expired,
}

/// One received batch of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryLot {
    pub id: LotId,
    pub lot_number: String,
    pub product_id: ProductId,
    pub remaining_quantity: i64,
    pub expiry_date: Option<NaiveDate>,
    pub received_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub status: LotStatus,
}

impl InventoryLot {
    fn allocatable(&self) -> bool {
        self.status == LotStatus::Active && self.remaining_quantity > 0
    }
}

/// One slice of an allocation, in consumption order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotDeduction {
    pub lot_id: LotId,
    pub lot_number: String,
    pub quantity: i64,
    pub expiry_date: Option<NaiveDate>,
}

/// FEFO comparison: expiry ASC with `None` last, then received date ASC,
/// then creation timestamp ASC. Total over any two lots, so allocation
/// order is deterministic.
pub fn fefo_order(a: &InventoryLot, b: &InventoryLot) -> Ordering {
    let expiry = match (a.expiry_date, b.expiry_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    expiry
        .then_with(|| a.received_date.cmp(&b.received_date))
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// Deduct `quantity` units from `lots` in FEFO order.
///
/// The sufficiency check runs before any mutation; on shortfall the
/// call fails with [`EngineError::InsufficientStock`] and no lot
/// changes. Lots drained to zero flip to [`LotStatus::Depleted`].
/// Returns the audit trail in consumption order.
pub fn deduct_fifo(lots: &mut [InventoryLot], quantity: i64) -> EngineResult<Vec<LotDeduction>> {
    if quantity <= 0 {
        return Err(EngineError::validation(
            "deduction quantity must be at least 1",
        ));
    }

    let mut order: Vec<usize> = (0..lots.len())
        .filter(|&i| lots[i].allocatable())
        .collect();
    order.sort_by(|&a, &b| fefo_order(&lots[a], &lots[b]));

    let available: i64 = order.iter().map(|&i| lots[i].remaining_quantity).sum();
    if available < quantity {
        return Err(EngineError::insufficient_stock(quantity, available));
    }

    let mut remaining = quantity;
    let mut deductions = Vec::new();

    for &i in &order {
        if remaining <= 0 {
            break;
        }
        let lot = &mut lots[i];
        let take = remaining.min(lot.remaining_quantity);
        lot.remaining_quantity -= take;
        if lot.remaining_quantity == 0 {
            lot.status = LotStatus::Depleted;
        }
        deductions.push(LotDeduction {
            lot_id: lot.id,
            lot_number: lot.lot_number.clone(),
            quantity: take,
            expiry_date: lot.expiry_date,
        });
        remaining -= take;
    }

    tracing::debug!(
        requested = quantity,
        lots_touched = deductions.len(),
        "fefo deduction complete"
    );

    Ok(deductions)
}

/// Render an allocation as a human-readable note,
/// e.g. `LOT-A: 5 (exp: 2024-06-01), LOT-B: 3`.
pub fn format_deductions(deductions: &[LotDeduction]) -> String {
    deductions
        .iter()
        .map(|d| match d.expiry_date {
            Some(expiry) => format!("{}: {} (exp: {})", d.lot_number, d.quantity, expiry),
            None => format!("{}: {}", d.lot_number, d.quantity),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Per-product lot store.
///
/// Allocation goes through `&mut self`, so exclusive access to a
/// product's lots is enforced by the borrow checker; callers holding a
/// `LotBook` behind a lock get per-product serialization for free.
#[derive(Debug, Default, Clone)]
pub struct LotBook {
    lots: HashMap<ProductId, Vec<InventoryLot>>,
}

impl LotBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a received lot under its product.
    pub fn receive(&mut self, lot: InventoryLot) {
        self.lots.entry(lot.product_id).or_default().push(lot);
    }

    /// Total allocatable quantity for a product.
    pub fn available(&self, product_id: ProductId) -> i64 {
        self.lots
            .get(&product_id)
            .map(|lots| {
                lots.iter()
                    .filter(|l| l.allocatable())
                    .map(|l| l.remaining_quantity)
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Allocate `quantity` units of a product in FEFO order.
    ///
    /// All-or-nothing per the underlying [`deduct_fifo`]; an unknown
    /// product reads as zero available stock.
    pub fn allocate(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> EngineResult<Vec<LotDeduction>> {
        match self.lots.get_mut(&product_id) {
            Some(lots) => deduct_fifo(lots, quantity),
            None => Err(EngineError::insufficient_stock(quantity, 0)),
        }
    }

    /// Lots for a product, unordered.
    pub fn lots(&self, product_id: ProductId) -> &[InventoryLot] {
        self.lots.get(&product_id).map(Vec::as_slice).unwrap_or(&[])
    }
}
