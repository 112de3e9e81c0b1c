mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{formatters, Cli, Commands, InputArgs};
use tracing::info;

use capgains::config::Config;
use capgains::importers;
use capgains::reports::{export_to_csv, TaxReport};
use capgains::tax::FifoLedger;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Report {
            input,
            year,
            export,
        } => handle_report(&input, year, export.as_deref(), cli.json),

        Commands::Summary { input, year } => handle_summary(&input, year, cli.json),

        Commands::Check { input } => handle_check(&input, cli.json),
    }
}

/// Load the configuration file (when given) and fold the command-line
/// layout overrides on top. Fails fast on invalid tax parameters, before
/// any transaction is read.
fn resolve_config(input: &InputArgs) -> Result<Config> {
    let mut config = match &input.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(header) = &input.date_header {
        config.csv.date = header.clone();
    }
    if let Some(header) = &input.kind_header {
        config.csv.kind = header.clone();
    }
    if let Some(header) = &input.amount_header {
        config.csv.amount = header.clone();
    }
    if let Some(header) = &input.price_header {
        config.csv.price = header.clone();
    }
    if let Some(header) = &input.fee_header {
        config.csv.fee = header.clone();
    }
    if let Some(format) = &input.date_format {
        config.csv.date_format = Some(format.clone());
    }

    config.tax.validate()?;
    Ok(config)
}

/// Handle the report command
fn handle_report(
    input: &InputArgs,
    year: Option<i32>,
    export: Option<&str>,
    json: bool,
) -> Result<()> {
    use colored::Colorize;

    let config = resolve_config(input)?;
    let transactions = importers::import_file(&input.file, &config.csv)?;
    let report = TaxReport::build(&transactions, &config.tax, year)?;

    info!(
        "Report built: {} realizations from {} transactions",
        report.realizations.len(),
        transactions.len()
    );

    if let Some(path) = export {
        let csv_content = export_to_csv(&report.realizations);
        std::fs::write(path, csv_content).with_context(|| format!("failed to write {path}"))?;

        if !json {
            println!("{} Realizations exported to: {}", "✓".green().bold(), path);
        }
    }

    if json {
        println!("{}", formatters::format_report_json(&report));
    } else {
        println!("{}", formatters::format_report_table(&report, &config.tax));
    }

    Ok(())
}

/// Handle the summary command
fn handle_summary(input: &InputArgs, year: Option<i32>, json: bool) -> Result<()> {
    let config = resolve_config(input)?;
    let transactions = importers::import_file(&input.file, &config.csv)?;
    let report = TaxReport::build(&transactions, &config.tax, year)?;

    if json {
        println!("{}", formatters::format_summary_json(&report.summary));
    } else {
        println!(
            "{}",
            formatters::format_summary_block(&report.summary, &config.tax)
        );
    }

    Ok(())
}

/// Handle the check command
fn handle_check(input: &InputArgs, json: bool) -> Result<()> {
    let config = resolve_config(input)?;
    let transactions = importers::import_file(&input.file, &config.csv)?;

    // Replay the whole history so oversells surface here too.
    let mut ledger = FifoLedger::new(config.tax.clone())?;
    let realizations = ledger.process(&transactions)?;

    if json {
        println!(
            "{}",
            formatters::format_check_json(&transactions, realizations.len(), ledger.open_amount())
        );
    } else {
        println!(
            "{}",
            formatters::format_check(&transactions, realizations.len(), ledger.open_amount())
        );
    }

    Ok(())
}
