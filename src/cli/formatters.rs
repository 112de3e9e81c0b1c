//! Output formatting module for CLI display
//!
//! This module handles all terminal output formatting, separating
//! the concerns of data calculation from presentation.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use capgains::config::TaxConfig;
use capgains::model::{Transaction, TransactionKind};
use capgains::reports::TaxReport;
use capgains::tax::TaxSummary;
use capgains::utils::{format_amount, format_percent, format_usd};

/// Monetary value for machine-readable output, rounded to cents.
fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Format a tax report for terminal table output
pub fn format_report_table(report: &TaxReport, config: &TaxConfig) -> String {
    let mut output = String::new();

    match report.year {
        Some(year) => output.push_str(&format!(
            "\n{} Realized Gains - {}\n\n",
            "💰".cyan().bold(),
            year
        )),
        None => output.push_str(&format!("\n{} Realized Gains\n\n", "💰".cyan().bold())),
    }

    if report.realizations.is_empty() {
        output.push_str(&format!("{} No taxable events found\n", "ℹ".blue().bold()));
    } else {
        #[derive(Tabled)]
        struct RealizationRow {
            #[tabled(rename = "Sell Date")]
            sell_date: String,
            #[tabled(rename = "Buy Date")]
            buy_date: String,
            #[tabled(rename = "Amount")]
            amount: String,
            #[tabled(rename = "Cost Basis")]
            cost_basis: String,
            #[tabled(rename = "Proceeds")]
            proceeds: String,
            #[tabled(rename = "Gain/Loss")]
            gain: String,
            #[tabled(rename = "Days")]
            holding_days: String,
            #[tabled(rename = "Term")]
            term: String,
            #[tabled(rename = "Rate")]
            tax_rate: String,
            #[tabled(rename = "Tax Owed")]
            tax_owed: String,
        }

        let rows: Vec<RealizationRow> = report
            .realizations
            .iter()
            .map(|r| {
                let gain_str = if r.gain >= Decimal::ZERO {
                    format_usd(r.gain).green().to_string()
                } else {
                    format_usd(r.gain).red().to_string()
                };

                RealizationRow {
                    sell_date: r.sell_date.to_string(),
                    buy_date: r.buy_date.to_string(),
                    amount: format_amount(r.amount),
                    cost_basis: format_usd(r.cost_basis),
                    proceeds: format_usd(r.proceeds),
                    gain: gain_str,
                    holding_days: r.holding_days.to_string(),
                    term: r.term.as_str().to_string(),
                    tax_rate: format_percent(r.tax_rate),
                    tax_owed: format_usd(r.tax_owed),
                }
            })
            .collect();

        let mut table = Table::new(&rows);
        table.with(Style::modern());
        // Right-align all columns except the two dates
        table.modify(Columns::new(2..), Alignment::right());

        output.push_str(&table.to_string());
        output.push('\n');
    }

    output.push_str(&format_summary_block(&report.summary, config));
    output
}

/// Format the aggregate summary block shared by `report` and `summary`
pub fn format_summary_block(summary: &TaxSummary, config: &TaxConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{} Summary\n", "━".repeat(60).bright_black()));

    output.push_str(&format!(
        "\n{:<40} {}",
        "Total Short-Term Gains:".bold(),
        format_usd(summary.short_term_gains).green()
    ));
    output.push_str(&format!(
        "\n{:<40} {}",
        "Total Short-Term Losses:".bold(),
        format_usd(summary.short_term_losses).red()
    ));
    output.push_str(&format!(
        "\n{:<40} {}",
        "Total Long-Term Gains:".bold(),
        format_usd(summary.long_term_gains).green()
    ));
    output.push_str(&format!(
        "\n{:<40} {}",
        "Total Long-Term Losses:".bold(),
        format_usd(summary.long_term_losses).red()
    ));

    let net_colored = if summary.net_gain >= Decimal::ZERO {
        format_usd(summary.net_gain).green()
    } else {
        format_usd(summary.net_gain).red()
    };
    output.push_str(&format!("\n{:<40} {}", "Net Gain/Loss:".bold(), net_colored));

    let deduction_label = format!(
        "Capital Loss Deduction (max {}):",
        format_usd(config.max_loss_deduction)
    );
    output.push_str(&format!(
        "\n{:<40} {}",
        deduction_label.bold(),
        format_usd(summary.deductible_loss).yellow()
    ));

    output.push_str(&format!(
        "\n{:<40} {}\n",
        "Final Tax Owed (on gains only):".bold(),
        format_usd(summary.total_tax).yellow().bold()
    ));

    output
}

/// Format a tax report for JSON output
pub fn format_report_json(report: &TaxReport) -> String {
    #[derive(Serialize)]
    struct JsonRealization {
        sell_date: String,
        buy_date: String,
        amount: String,
        cost_basis: String,
        proceeds: String,
        gain: String,
        holding_days: i64,
        term: String,
        tax_rate: String,
        tax_owed: String,
    }

    #[derive(Serialize)]
    struct JsonSummary {
        short_term_gains: String,
        short_term_losses: String,
        long_term_gains: String,
        long_term_losses: String,
        net_gain: String,
        deductible_loss: String,
        total_tax: String,
    }

    #[derive(Serialize)]
    struct JsonReport {
        year: Option<i32>,
        realizations: Vec<JsonRealization>,
        summary: JsonSummary,
    }

    let realizations = report
        .realizations
        .iter()
        .map(|r| JsonRealization {
            sell_date: r.sell_date.to_string(),
            buy_date: r.buy_date.to_string(),
            amount: format_amount(r.amount),
            cost_basis: money(r.cost_basis),
            proceeds: money(r.proceeds),
            gain: money(r.gain),
            holding_days: r.holding_days,
            term: r.term.as_str().to_string(),
            tax_rate: r.tax_rate.to_string(),
            tax_owed: money(r.tax_owed),
        })
        .collect();

    let json_report = JsonReport {
        year: report.year,
        realizations,
        summary: JsonSummary {
            short_term_gains: money(report.summary.short_term_gains),
            short_term_losses: money(report.summary.short_term_losses),
            long_term_gains: money(report.summary.long_term_gains),
            long_term_losses: money(report.summary.long_term_losses),
            net_gain: money(report.summary.net_gain),
            deductible_loss: money(report.summary.deductible_loss),
            total_tax: money(report.summary.total_tax),
        },
    };

    serde_json::to_string_pretty(&json_report)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// Format an aggregate summary for JSON output
pub fn format_summary_json(summary: &TaxSummary) -> String {
    #[derive(Serialize)]
    struct JsonSummary {
        short_term_gains: String,
        short_term_losses: String,
        long_term_gains: String,
        long_term_losses: String,
        net_gain: String,
        deductible_loss: String,
        total_tax: String,
    }

    let json_summary = JsonSummary {
        short_term_gains: money(summary.short_term_gains),
        short_term_losses: money(summary.short_term_losses),
        long_term_gains: money(summary.long_term_gains),
        long_term_losses: money(summary.long_term_losses),
        net_gain: money(summary.net_gain),
        deductible_loss: money(summary.deductible_loss),
        total_tax: money(summary.total_tax),
    };

    serde_json::to_string_pretty(&json_summary)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// Format the validation result for `check`
pub fn format_check(
    transactions: &[Transaction],
    realization_count: usize,
    open_amount: Decimal,
) -> String {
    let buys = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Buy)
        .count();
    let sells = transactions.len() - buys;

    let mut output = String::new();
    output.push_str(&format!(
        "\n{} {} transactions valid ({} buys, {} sells)\n",
        "✓".green().bold(),
        transactions.len(),
        buys,
        sells
    ));

    if let (Some(first), Some(last)) = (transactions.first(), transactions.last()) {
        output.push_str(&format!("  Date span: {} to {}\n", first.date, last.date));
    }
    output.push_str(&format!("  Realizations: {}\n", realization_count));
    output.push_str(&format!("  Open amount: {}\n", format_amount(open_amount)));

    output
}

/// Format the validation result for `check` as JSON
pub fn format_check_json(
    transactions: &[Transaction],
    realization_count: usize,
    open_amount: Decimal,
) -> String {
    #[derive(Serialize)]
    struct JsonCheck {
        transactions: usize,
        buys: usize,
        sells: usize,
        realizations: usize,
        open_amount: String,
    }

    let buys = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Buy)
        .count();

    let json_check = JsonCheck {
        transactions: transactions.len(),
        buys,
        sells: transactions.len() - buys,
        realizations: realization_count,
        open_amount: format_amount(open_amount),
    };

    serde_json::to_string_pretty(&json_check)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}
