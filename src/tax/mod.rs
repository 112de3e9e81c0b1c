// Tax module - FIFO lot matching and gain aggregation

pub mod fifo;
pub mod summary;

pub use fifo::{FifoLedger, Lot};
pub use summary::{summarize, TaxSummary};
