//! Capgains - FIFO capital gains tax calculator
//!
//! This library matches asset sells against purchase lots first-in
//! first-out, prices each taxable event with short/long-term rates, and
//! aggregates the per-term totals with the capped loss deduction.

pub mod config;
pub mod error;
pub mod importers;
pub mod model;
pub mod reports;
pub mod tax;
pub mod utils;
