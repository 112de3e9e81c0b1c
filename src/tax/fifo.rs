use std::collections::VecDeque;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::TaxConfig;
use crate::error::LedgerError;
use crate::model::{Realization, Term, Transaction, TransactionKind};

/// An open purchase lot awaiting consumption by later sells.
#[derive(Debug, Clone, PartialEq)]
pub struct Lot {
    pub acquired: NaiveDate,
    pub unit_cost: Decimal,
    /// Quantity still unmatched; strictly positive while the lot is open
    pub remaining: Decimal,
    /// Quantity at creation, fixed. This is the fee pro-ration
    /// denominator: dividing by `remaining` instead would attribute the
    /// purchase fee more than once when a lot is drawn down across
    /// several sells.
    pub original_amount: Decimal,
    /// Purchase fee attributed to the lot at creation, fixed
    pub total_fee: Decimal,
}

/// FIFO lot ledger: matches sells against the oldest open purchase lots
/// and emits one realization per lot portion consumed.
///
/// Transactions must arrive in non-decreasing date order (the importer
/// sorts once, preserving input order for same-day ties) and already pass
/// [`Transaction::validate`]; the ledger re-checks neither. The queue of
/// open lots is the only state carried between transactions, so histories
/// can also be fed one transaction at a time through [`FifoLedger::apply`].
pub struct FifoLedger {
    config: TaxConfig,
    lots: VecDeque<Lot>,
}

impl FifoLedger {
    /// Create a ledger, rejecting invalid configuration before any
    /// transaction is processed.
    pub fn new(config: TaxConfig) -> Result<Self, LedgerError> {
        config.validate()?;
        Ok(Self {
            config,
            lots: VecDeque::new(),
        })
    }

    /// Process a date-sorted transaction sequence into the realization
    /// sequence. Fails on the first sell that exceeds the open quantity.
    pub fn process(
        &mut self,
        transactions: &[Transaction],
    ) -> Result<Vec<Realization>, LedgerError> {
        let mut realizations = Vec::new();
        for tx in transactions {
            realizations.extend(self.apply(tx)?);
        }
        Ok(realizations)
    }

    /// Apply a single transaction. Buys open a lot and yield nothing;
    /// sells consume lots front-to-back and yield their realizations.
    pub fn apply(&mut self, tx: &Transaction) -> Result<Vec<Realization>, LedgerError> {
        match tx.kind {
            TransactionKind::Buy => {
                self.add_purchase(tx);
                Ok(Vec::new())
            }
            TransactionKind::Sell => self.match_sale(tx),
        }
    }

    /// Total quantity still open across all lots.
    pub fn open_amount(&self) -> Decimal {
        self.lots.iter().map(|lot| lot.remaining).sum()
    }

    /// Shared view of the open lots, oldest acquisition first.
    pub fn open_lots(&self) -> impl Iterator<Item = &Lot> + '_ {
        self.lots.iter()
    }

    fn add_purchase(&mut self, tx: &Transaction) {
        self.lots.push_back(Lot {
            acquired: tx.date,
            unit_cost: tx.unit_price,
            remaining: tx.amount,
            original_amount: tx.amount,
            total_fee: tx.fee,
        });
    }

    fn match_sale(&mut self, tx: &Transaction) -> Result<Vec<Realization>, LedgerError> {
        let available = self.open_amount();
        if tx.amount > available {
            return Err(LedgerError::Oversold {
                date: tx.date,
                requested: tx.amount,
                available,
                shortfall: tx.amount - available,
            });
        }

        let mut realizations = Vec::new();
        let mut need = tx.amount;
        while need > Decimal::ZERO {
            let Some(lot) = self.lots.front_mut() else {
                // cannot run dry: availability was checked up front
                break;
            };
            let consumed = need.min(lot.remaining);

            let cost_basis = consumed * lot.unit_cost;
            let proceeds = consumed * tx.unit_price;
            // Each side's fee is pro-rated by the share of that side's
            // total quantity this portion covers.
            let gain = proceeds
                - cost_basis
                - tx.fee * consumed / tx.amount
                - lot.total_fee * consumed / lot.original_amount;

            let holding_days = (tx.date - lot.acquired).num_days();
            let term = if holding_days > self.config.long_term_days {
                Term::Long
            } else {
                Term::Short
            };
            let tax_rate = match term {
                Term::Long => self.config.long_term_rate,
                Term::Short => self.config.short_term_rate,
            };
            let tax_owed = if gain > Decimal::ZERO {
                gain * tax_rate
            } else {
                Decimal::ZERO
            };

            realizations.push(Realization {
                sell_date: tx.date,
                buy_date: lot.acquired,
                amount: consumed,
                cost_basis,
                proceeds,
                gain,
                holding_days,
                term,
                tax_rate,
                tax_owed,
            });

            lot.remaining -= consumed;
            need -= consumed;
            if lot.remaining.is_zero() {
                self.lots.pop_front();
            }
        }

        Ok(realizations)
    }
}
