//! Stock ledger: daily movement reconstruction and lot-level FEFO/FIFO
//! allocation.
//!
//! Both halves are pure over their inputs. The movement side rebuilds a
//! gap-free per-product daily ledger from the append-only history; the
//! lot side allocates outbound quantities across lots with atomic
//! failure on shortfall.

pub mod lot;
pub mod movement;

pub use lot::{
    InventoryLot, LotBook, LotDeduction, LotStatus, deduct_fifo, fefo_order, format_deductions,
};
pub use movement::{DailyMovement, MovementRecord, ProductMovementSummary, daily_movements};
