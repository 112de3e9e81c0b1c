use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxConfig;
use crate::model::{Realization, Term};

/// Aggregate figures over a realization sequence.
///
/// Loss buckets keep their negative sign; `deductible_loss` is reported
/// as a positive figure. Values carry full precision, rounding happens
/// at render/export time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSummary {
    pub short_term_gains: Decimal,
    pub short_term_losses: Decimal,
    pub long_term_gains: Decimal,
    pub long_term_losses: Decimal,
    /// Sum of all four buckets
    pub net_gain: Decimal,
    /// Combined losses usable against other income, capped at the
    /// configured maximum; zero whenever the period nets to a gain
    pub deductible_loss: Decimal,
    /// Sum of per-realization tax. Tax is floored at zero per
    /// realization, so losses never reduce this figure.
    pub total_tax: Decimal,
}

/// Fold realizations into per-term gain/loss buckets and derive the
/// net, capped-deduction, and total-tax figures. Pure: no state is
/// carried between calls.
pub fn summarize(realizations: &[Realization], config: &TaxConfig) -> TaxSummary {
    let mut short_term_gains = Decimal::ZERO;
    let mut short_term_losses = Decimal::ZERO;
    let mut long_term_gains = Decimal::ZERO;
    let mut long_term_losses = Decimal::ZERO;
    let mut total_tax = Decimal::ZERO;

    for r in realizations {
        // A break-even realization counts toward the gain bucket.
        let bucket = match (r.term, r.gain >= Decimal::ZERO) {
            (Term::Short, true) => &mut short_term_gains,
            (Term::Short, false) => &mut short_term_losses,
            (Term::Long, true) => &mut long_term_gains,
            (Term::Long, false) => &mut long_term_losses,
        };
        *bucket += r.gain;
        total_tax += r.tax_owed;
    }

    let net_gain = short_term_gains + short_term_losses + long_term_gains + long_term_losses;
    let combined_losses = short_term_losses + long_term_losses;
    let deductible_loss = if net_gain < Decimal::ZERO {
        combined_losses.abs().min(config.max_loss_deduction)
    } else {
        Decimal::ZERO
    };

    TaxSummary {
        short_term_gains,
        short_term_losses,
        long_term_gains,
        long_term_losses,
        net_gain,
        deductible_loss,
        total_tax,
    }
}
