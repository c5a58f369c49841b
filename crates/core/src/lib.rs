//! `stocksense-core` — shared primitives for the decision engine.
//!
//! This crate contains **pure domain** building blocks (no infrastructure
//! concerns): typed identifiers, the engine error model, the statistics
//! kernel, and the numeric sentinel policy shared by every other crate.

pub mod error;
pub mod id;
pub mod stats;

pub use error::{EngineError, EngineResult};
pub use id::{LotId, ProductId, TenantId};
pub use stats::{CV_SENTINEL, METRIC_SENTINEL};
