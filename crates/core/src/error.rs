//! Engine error model.

use thiserror::Error;

/// Result type used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine-level error.
///
/// The engine favors total functions over errors: degenerate numeric input
/// (empty series, zero denominators, mismatched lengths) produces well-defined
/// sentinel outputs, not `Err`. The variants here cover the few cases that are
/// genuine failures rather than expected sparse-data edge cases.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A caller-supplied value failed structural validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A lot deduction could not be satisfied from available stock.
    ///
    /// The allocation is rejected as a whole; no lot is partially consumed.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: i64 },
}

impl EngineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn insufficient_stock(requested: i64, available: i64) -> Self {
        Self::InsufficientStock {
            requested,
            available,
        }
    }

    /// Missing quantity for an `InsufficientStock` error, 0 otherwise.
    pub fn shortfall(&self) -> i64 {
        match self {
            Self::InsufficientStock {
                requested,
                available,
            } => requested - available,
            _ => 0,
        }
    }
}
