//! Error types.
//!
//! The ledger itself never fails: attaching an outcome to an unknown or
//! resolved record is a no-op. These errors cover the operations the view
//! layer can call out of order.

use crate::money::Money;
use crate::types::RecordId;

/// Amount from the view that cannot become [`Money`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount is not a finite number: {0}")]
    NotFinite(f64),

    #[error("Amount {0} is out of range")]
    OutOfRange(f64),
}

/// Draw configuration rejected before it reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("At least one number must be drawn")]
    ZeroCount,

    #[error("Cannot draw {count} distinct numbers from 1..={max_number}")]
    RangeTooSmall { count: u32, max_number: u32 },

    #[error("Wager {0} is below the minimum of {min}", min = crate::config::MIN_WAGER)]
    WagerTooLow(Money),

    #[error("Wager {0} is above the maximum of {max}", max = crate::money::MAX_AMOUNT)]
    WagerTooHigh(Money),

    #[error("Wager {0} is not a multiple of {step}", step = crate::config::WAGER_STEP)]
    WagerStep(Money),
}

/// Outcome form used out of order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("Record {0} already has an outcome")]
    AlreadyResolved(RecordId),

    #[error("Another record is already open")]
    AlreadyOpen,

    #[error("No record is open")]
    NotOpen,

    #[error("Gain cannot be negative: {0}")]
    NegativeGain(Money),

    #[error("Gain {0} is above the maximum of {max}", max = crate::money::MAX_AMOUNT)]
    GainTooHigh(Money),
}

/// Session-level errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("A draw is already in progress")]
    DrawInProgress,

    #[error("No draw is in progress")]
    NoDrawInProgress,

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}
