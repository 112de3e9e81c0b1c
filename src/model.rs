use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Transaction kind (buy or sell)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Buy,
    Sell,
}

impl FromStr for TransactionKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" | "B" => Ok(TransactionKind::Buy),
            "SELL" | "SALE" | "S" => Ok(TransactionKind::Sell),
            _ => Err(()),
        }
    }
}

/// A single buy or sell of the tracked asset, as supplied by the importer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    /// Quantity of the asset, must be strictly positive
    pub amount: Decimal,
    /// Currency per unit of the asset
    pub unit_price: Decimal,
    /// Flat transaction fee in currency
    pub fee: Decimal,
}

impl Transaction {
    /// Basic field validation; the reason string is reported to the user
    /// together with the source row by the importer.
    pub fn validate(&self) -> Result<(), String> {
        if self.amount <= Decimal::ZERO {
            return Err(format!("amount must be greater than zero, got {}", self.amount));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(format!("unit price cannot be negative, got {}", self.unit_price));
        }
        if self.fee < Decimal::ZERO {
            return Err(format!("fee cannot be negative, got {}", self.fee));
        }
        Ok(())
    }
}

/// Holding-period classification for a realization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Term {
    Short,
    Long,
}

impl Term {
    pub fn as_str(&self) -> &'static str {
        match self {
            Term::Short => "Short",
            Term::Long => "Long",
        }
    }
}

/// One taxable event: a portion of a purchase lot matched against a sell.
///
/// A sell that spans several lots yields one realization per lot portion.
/// All monetary fields carry full computation precision; rounding to two
/// decimal places (eight for `amount`) happens only when rendering or
/// exporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Realization {
    pub sell_date: NaiveDate,
    pub buy_date: NaiveDate,
    /// Quantity consumed from the lot, strictly positive
    pub amount: Decimal,
    pub cost_basis: Decimal,
    pub proceeds: Decimal,
    /// Signed gain after pro-rated fees
    pub gain: Decimal,
    pub holding_days: i64,
    pub term: Term,
    pub tax_rate: Decimal,
    /// Tax on the gain, zero when the realization is a loss
    pub tax_owed: Decimal,
}
