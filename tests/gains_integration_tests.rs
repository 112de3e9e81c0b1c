//! Integration tests for the gains pipeline through the CLI surface
//!
//! Tests:
//! - End-to-end realization pricing and summary figures
//! - FIFO splitting across lots with mixed terms
//! - Term boundary at the holding threshold
//! - Capital loss deduction capping
//! - Configuration file and column overrides
//! - Year filtering

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tempfile::TempDir;

use cli_helpers::{check_json, report_json, summary_json, write_fixture, BASIC_HISTORY};

fn decimal_from_value(value: &Value) -> Result<Decimal> {
    let text = value.as_str().context("expected decimal string")?;
    Decimal::from_str_exact(text).context("invalid decimal string")
}

#[test]
fn test_end_to_end_scenario() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_fixture(&dir, "txs.csv", BASIC_HISTORY);
    let report = report_json(input.to_str().unwrap(), &[])?;

    let realizations = report["realizations"]
        .as_array()
        .context("realizations missing")?;
    assert_eq!(realizations.len(), 1);

    let r = &realizations[0];
    assert_eq!(r["sell_date"], "2021-06-01");
    assert_eq!(r["buy_date"], "2021-01-01");
    assert_eq!(decimal_from_value(&r["amount"])?, dec!(1));
    assert_eq!(decimal_from_value(&r["cost_basis"])?, dec!(10000.00));
    assert_eq!(decimal_from_value(&r["proceeds"])?, dec!(15000.00));
    assert_eq!(decimal_from_value(&r["gain"])?, dec!(4975.00));
    assert_eq!(r["holding_days"], 151);
    assert_eq!(r["term"], "Short");
    assert_eq!(decimal_from_value(&r["tax_rate"])?, dec!(0.24));
    assert_eq!(decimal_from_value(&r["tax_owed"])?, dec!(1194.00));

    assert_eq!(
        decimal_from_value(&report["summary"]["total_tax"])?,
        dec!(1194.00)
    );

    Ok(())
}

#[test]
fn test_sale_splits_across_lots_with_mixed_terms() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_fixture(
        &dir,
        "txs.csv",
        "DATE,TYPE,AMT-BTC,PRICE,FEE\n\
         01-01-2020,BUY,1.0,100,0\n\
         06-01-2020,BUY,1.0,200,0\n\
         02-04-2021,SALE,1.5,300,0\n",
    );
    let report = report_json(input.to_str().unwrap(), &[])?;

    let realizations = report["realizations"]
        .as_array()
        .context("realizations missing")?;
    assert_eq!(realizations.len(), 2);

    // Oldest lot first, consumed whole.
    assert_eq!(realizations[0]["buy_date"], "2020-01-01");
    assert_eq!(decimal_from_value(&realizations[0]["amount"])?, dec!(1));
    assert_eq!(realizations[0]["term"], "Long");

    // Remainder from the younger lot.
    assert_eq!(realizations[1]["buy_date"], "2020-06-01");
    assert_eq!(decimal_from_value(&realizations[1]["amount"])?, dec!(0.5));
    assert_eq!(realizations[1]["term"], "Short");

    let consumed = decimal_from_value(&realizations[0]["amount"])?
        + decimal_from_value(&realizations[1]["amount"])?;
    assert_eq!(consumed, dec!(1.5));

    Ok(())
}

#[test]
fn test_term_boundary_at_365_days() -> Result<()> {
    let dir = TempDir::new()?;

    let at_365 = write_fixture(
        &dir,
        "at_365.csv",
        "DATE,TYPE,AMT-BTC,PRICE,FEE\n\
         01-01-2020,BUY,1.0,100,0\n\
         12-31-2020,SALE,1.0,200,0\n",
    );
    let report = report_json(at_365.to_str().unwrap(), &[])?;
    assert_eq!(report["realizations"][0]["holding_days"], 365);
    assert_eq!(report["realizations"][0]["term"], "Short");

    let at_366 = write_fixture(
        &dir,
        "at_366.csv",
        "DATE,TYPE,AMT-BTC,PRICE,FEE\n\
         01-01-2020,BUY,1.0,100,0\n\
         01-01-2021,SALE,1.0,200,0\n",
    );
    let report = report_json(at_366.to_str().unwrap(), &[])?;
    assert_eq!(report["realizations"][0]["holding_days"], 366);
    assert_eq!(report["realizations"][0]["term"], "Long");

    Ok(())
}

#[test]
fn test_deduction_cap_binds_large_losses() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_fixture(
        &dir,
        "txs.csv",
        "DATE,TYPE,AMT-BTC,PRICE,FEE\n\
         01-01-2021,BUY,1.0,10000,0\n\
         03-01-2021,SALE,1.0,5000,0\n",
    );
    let summary = summary_json(input.to_str().unwrap(), &[])?;

    assert_eq!(
        decimal_from_value(&summary["short_term_losses"])?,
        dec!(-5000.00)
    );
    assert_eq!(decimal_from_value(&summary["net_gain"])?, dec!(-5000.00));
    assert_eq!(
        decimal_from_value(&summary["deductible_loss"])?,
        dec!(3000.00)
    );
    assert_eq!(decimal_from_value(&summary["total_tax"])?, dec!(0.00));

    Ok(())
}

#[test]
fn test_deduction_below_cap_passes_through() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_fixture(
        &dir,
        "txs.csv",
        "DATE,TYPE,AMT-BTC,PRICE,FEE\n\
         01-01-2021,BUY,1.0,10000,0\n\
         03-01-2021,SALE,1.0,9000,0\n",
    );
    let summary = summary_json(input.to_str().unwrap(), &[])?;

    assert_eq!(
        decimal_from_value(&summary["deductible_loss"])?,
        dec!(1000.00)
    );

    Ok(())
}

#[test]
fn test_net_gain_means_no_deduction() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_fixture(&dir, "txs.csv", BASIC_HISTORY);
    let summary = summary_json(input.to_str().unwrap(), &[])?;

    assert_eq!(decimal_from_value(&summary["deductible_loss"])?, dec!(0.00));

    Ok(())
}

#[test]
fn test_config_file_overrides_tax_parameters() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_fixture(
        &dir,
        "config.toml",
        "[tax]\n\
         short_term_rate = 0.30\n\
         long_term_rate = 0.10\n\
         max_loss_deduction = 1500.0\n",
    );
    let config_arg = config.to_str().unwrap();

    // Gains taxed at the overridden short-term rate.
    let gains = write_fixture(&dir, "gains.csv", BASIC_HISTORY);
    let summary = summary_json(gains.to_str().unwrap(), &["--config", config_arg])?;
    assert_eq!(decimal_from_value(&summary["total_tax"])?, dec!(1492.50));

    // Losses capped at the overridden maximum.
    let losses = write_fixture(
        &dir,
        "losses.csv",
        "DATE,TYPE,AMT-BTC,PRICE,FEE\n\
         01-01-2021,BUY,1.0,10000,0\n\
         03-01-2021,SALE,1.0,6000,0\n",
    );
    let summary = summary_json(losses.to_str().unwrap(), &["--config", config_arg])?;
    assert_eq!(
        decimal_from_value(&summary["deductible_loss"])?,
        dec!(1500.00)
    );

    Ok(())
}

#[test]
fn test_config_file_csv_layout() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_fixture(
        &dir,
        "config.toml",
        "[csv]\n\
         date = \"When\"\n\
         kind = \"Side\"\n\
         amount = \"Qty\"\n\
         price = \"Px\"\n\
         fee = \"Commission\"\n\
         date_format = \"%d.%m.%Y\"\n",
    );
    let input = write_fixture(
        &dir,
        "txs.csv",
        "When,Side,Qty,Px,Commission\n\
         01.01.2021,BUY,1.0,10000,10\n\
         01.06.2021,SALE,1.0,15000,15\n",
    );
    let summary = summary_json(
        input.to_str().unwrap(),
        &["--config", config.to_str().unwrap()],
    )?;

    assert_eq!(decimal_from_value(&summary["total_tax"])?, dec!(1194.00));

    Ok(())
}

#[test]
fn test_year_filter_narrows_report() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_fixture(
        &dir,
        "txs.csv",
        "DATE,TYPE,AMT-BTC,PRICE,FEE\n\
         06-01-2020,BUY,2.0,10000,0\n\
         12-01-2020,SALE,1.0,12000,0\n\
         06-01-2021,SALE,1.0,15000,0\n",
    );
    let path = input.to_str().unwrap();

    let report = report_json(path, &["--year", "2021"])?;
    let realizations = report["realizations"]
        .as_array()
        .context("realizations missing")?;
    assert_eq!(report["year"], 2021);
    assert_eq!(realizations.len(), 1);
    assert_eq!(realizations[0]["sell_date"], "2021-06-01");
    assert_eq!(decimal_from_value(&realizations[0]["gain"])?, dec!(5000.00));
    assert_eq!(
        decimal_from_value(&report["summary"]["net_gain"])?,
        dec!(5000.00)
    );

    let report = report_json(path, &["--year", "2020"])?;
    let realizations = report["realizations"]
        .as_array()
        .context("realizations missing")?;
    assert_eq!(realizations.len(), 1);
    assert_eq!(decimal_from_value(&realizations[0]["gain"])?, dec!(2000.00));

    Ok(())
}

#[test]
fn test_purchase_fee_attribution_across_sells() -> Result<()> {
    // The lot's 8.00 fee is split by share of the original lot size, so
    // the two losses add up to exactly the fee paid.
    let dir = TempDir::new()?;
    let input = write_fixture(
        &dir,
        "txs.csv",
        "DATE,TYPE,AMT-BTC,PRICE,FEE\n\
         01-01-2021,BUY,1.0,100,8\n\
         02-01-2021,SALE,0.25,100,0\n\
         03-01-2021,SALE,0.75,100,0\n",
    );
    let report = report_json(input.to_str().unwrap(), &[])?;

    let realizations = report["realizations"]
        .as_array()
        .context("realizations missing")?;
    assert_eq!(realizations.len(), 2);
    assert_eq!(decimal_from_value(&realizations[0]["gain"])?, dec!(-2.00));
    assert_eq!(decimal_from_value(&realizations[1]["gain"])?, dec!(-6.00));

    Ok(())
}

#[test]
fn test_check_reports_open_position() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_fixture(
        &dir,
        "txs.csv",
        "DATE,TYPE,AMT-BTC,PRICE,FEE\n\
         06-01-2020,BUY,2.0,10000,0\n\
         12-01-2020,SALE,1.0,12000,0\n\
         06-01-2021,SALE,0.5,15000,0\n",
    );
    let check = check_json(input.to_str().unwrap())?;

    assert_eq!(check["transactions"], 3);
    assert_eq!(check["buys"], 1);
    assert_eq!(check["sells"], 2);
    assert_eq!(check["realizations"], 2);
    assert_eq!(decimal_from_value(&check["open_amount"])?, dec!(0.5));

    Ok(())
}
