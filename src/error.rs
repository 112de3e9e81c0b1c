//! Error handling for capgains
//!
//! Defines the typed ledger errors and establishes a unified Result type
//! using anyhow for context chaining in the collaborator layers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors surfaced by the core computation. All of them abort the run;
/// there is nothing transient to retry in a deterministic batch fold.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A transaction failed basic validation before reaching the ledger.
    #[error("malformed input at row {row}: {reason}")]
    MalformedInput { row: usize, reason: String },

    /// A sell asked for more than every open lot holds. The history is
    /// missing purchases; truncating the match silently would under-report
    /// gains, so this is fatal.
    #[error(
        "sell of {requested} on {date} exceeds open lots: only {available} available (short by {shortfall})"
    )]
    Oversold {
        date: NaiveDate,
        requested: Decimal,
        available: Decimal,
        shortfall: Decimal,
    },

    /// An invalid configuration value, rejected before any transaction is
    /// processed.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the collaborator layers (importer, CLI, reports)
pub type Result<T> = anyhow::Result<T>;
