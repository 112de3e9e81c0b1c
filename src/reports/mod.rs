// Reports module - realization report assembly and CSV export

use chrono::Datelike;

use crate::config::TaxConfig;
use crate::error::LedgerError;
use crate::model::{Realization, Transaction};
use crate::tax::{summarize, FifoLedger, TaxSummary};

/// Realizations plus their aggregate summary, optionally narrowed to a
/// single tax year.
#[derive(Debug, Clone)]
pub struct TaxReport {
    pub year: Option<i32>,
    pub realizations: Vec<Realization>,
    pub summary: TaxSummary,
}

impl TaxReport {
    /// Run the full history through the ledger, then keep realizations
    /// whose sell date falls in `year` when one is given.
    ///
    /// Filtering happens after matching, never before: lots opened in
    /// earlier years must still back the kept sells, so the transaction
    /// slice always covers the whole history.
    pub fn build(
        transactions: &[Transaction],
        config: &TaxConfig,
        year: Option<i32>,
    ) -> Result<TaxReport, LedgerError> {
        let mut ledger = FifoLedger::new(config.clone())?;
        let mut realizations = ledger.process(transactions)?;
        if let Some(year) = year {
            realizations.retain(|r| r.sell_date.year() == year);
        }
        let summary = summarize(&realizations, config);
        Ok(TaxReport {
            year,
            realizations,
            summary,
        })
    }
}

/// Render realizations as CSV in the standard field order.
///
/// Monetary fields round to 2 decimal places and quantities to 8; this
/// is the only place output rounding is applied.
pub fn export_to_csv(realizations: &[Realization]) -> String {
    let mut csv = String::new();

    csv.push_str(
        "sell_date,buy_date,amount,cost_basis,proceeds,gain,holding_days,term,tax_rate,tax_owed\n",
    );

    for r in realizations {
        csv.push_str(&format!(
            "{},{},{},{:.2},{:.2},{:.2},{},{},{},{:.2}\n",
            r.sell_date,
            r.buy_date,
            r.amount.round_dp(8).normalize(),
            r.cost_basis.round_dp(2),
            r.proceeds.round_dp(2),
            r.gain.round_dp(2),
            r.holding_days,
            r.term.as_str(),
            r.tax_rate,
            r.tax_owed.round_dp(2),
        ));
    }

    csv
}
