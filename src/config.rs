//! Run configuration: tax constants and the CSV column layout.
//!
//! Everything the computation needs as a parameter lives here; nothing is
//! hard-coded in the ledger or the aggregator. Values can be overridden
//! from a TOML file and, for the column layout, from command-line flags.

use anyhow::Context;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

use crate::error::LedgerError;

/// Tax computation constants.
///
/// Defaults are the US individual figures the tool ships with: 24%
/// short-term rate, 15% long-term rate, a 3000.00 capital-loss deduction
/// cap, and the long-term boundary at strictly more than 365 holding days.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TaxConfig {
    pub short_term_rate: Decimal,
    pub long_term_rate: Decimal,
    pub max_loss_deduction: Decimal,
    /// A realization is long-term when holding_days is strictly greater
    /// than this threshold.
    pub long_term_days: i64,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            short_term_rate: Decimal::new(24, 2),
            long_term_rate: Decimal::new(15, 2),
            max_loss_deduction: Decimal::new(3000, 0),
            long_term_days: 365,
        }
    }
}

impl TaxConfig {
    /// Reject invalid values before any transaction is processed.
    pub fn validate(&self) -> Result<(), LedgerError> {
        let rate_range = Decimal::ZERO..=Decimal::ONE;
        if !rate_range.contains(&self.short_term_rate) {
            return Err(LedgerError::Configuration(format!(
                "short-term rate {} must be between 0 and 1",
                self.short_term_rate
            )));
        }
        if !rate_range.contains(&self.long_term_rate) {
            return Err(LedgerError::Configuration(format!(
                "long-term rate {} must be between 0 and 1",
                self.long_term_rate
            )));
        }
        if self.max_loss_deduction < Decimal::ZERO {
            return Err(LedgerError::Configuration(format!(
                "max loss deduction {} cannot be negative",
                self.max_loss_deduction
            )));
        }
        if self.long_term_days < 0 {
            return Err(LedgerError::Configuration(format!(
                "long-term holding threshold {} cannot be negative",
                self.long_term_days
            )));
        }
        Ok(())
    }
}

/// Column headers of the input CSV, as exported by the source app.
///
/// Defaults match the Cash App bitcoin export; other exports are handled
/// by renaming the headers here or via the CLI flags.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CsvColumns {
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub price: String,
    pub fee: String,
    /// Explicit strftime date format. When unset the importer tries the
    /// common US/ISO formats in order.
    pub date_format: Option<String>,
}

impl Default for CsvColumns {
    fn default() -> Self {
        Self {
            date: "DATE".to_string(),
            kind: "TYPE".to_string(),
            amount: "AMT-BTC".to_string(),
            price: "PRICE".to_string(),
            fee: "FEE".to_string(),
            date_format: None,
        }
    }
}

/// Full run configuration as loadable from a TOML file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub tax: TaxConfig,
    pub csv: CsvColumns,
}

impl Config {
    /// Load configuration from a TOML file. Missing keys fall back to the
    /// defaults; the tax section is validated by the caller before use.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}
