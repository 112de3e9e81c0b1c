use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::config::CsvColumns;
use crate::error::LedgerError;
use crate::model::{Transaction, TransactionKind};

const DATE_FORMATS: [&str; 3] = ["%m-%d-%Y", "%m/%d/%Y", "%Y-%m-%d"];

/// Parse a transaction CSV and return the rows sorted ascending by date.
///
/// The sort is stable and keyed on the date alone, so rows sharing a day
/// keep their file order. Any row that fails validation aborts the whole
/// import; this feeds a tax calculation, so a partially-loaded history is
/// worse than no history.
pub fn load_transactions<P: AsRef<Path>>(
    file_path: P,
    columns: &CsvColumns,
) -> Result<Vec<Transaction>> {
    let path = file_path.as_ref();
    info!("Loading transactions from {:?}", path);

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let headers = reader
        .headers()
        .context("failed to read CSV headers")?
        .clone();
    debug!("CSV headers: {:?}", headers);

    let mapping = find_columns(&headers, columns)?;
    debug!("Column mapping: {:?}", mapping);

    let mut transactions = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // Row numbers are 1-based and the header occupies row 1.
        let row = idx + 2;
        let record = result.with_context(|| format!("failed to read CSV record at row {row}"))?;
        transactions.push(parse_row(&record, &mapping, columns, row)?);
    }

    transactions.sort_by_key(|tx| tx.date);

    info!("Loaded {} transactions", transactions.len());
    Ok(transactions)
}

#[derive(Debug)]
struct ColumnMapping {
    date: usize,
    kind: usize,
    amount: usize,
    price: usize,
    fee: usize,
}

fn find_columns(headers: &csv::StringRecord, columns: &CsvColumns) -> Result<ColumnMapping> {
    let locate = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                anyhow::Error::from(LedgerError::MalformedInput {
                    row: 1,
                    reason: format!("column {name:?} not found in header"),
                })
            })
    };

    Ok(ColumnMapping {
        date: locate(&columns.date)?,
        kind: locate(&columns.kind)?,
        amount: locate(&columns.amount)?,
        price: locate(&columns.price)?,
        fee: locate(&columns.fee)?,
    })
}

fn parse_row(
    record: &csv::StringRecord,
    mapping: &ColumnMapping,
    columns: &CsvColumns,
    row: usize,
) -> Result<Transaction> {
    let malformed = |reason: String| LedgerError::MalformedInput { row, reason };

    let date_str = field(record, mapping.date, &columns.date, row)?;
    let date = parse_date(date_str, columns.date_format.as_deref())
        .map_err(|e| malformed(e.to_string()))?;

    let kind_str = field(record, mapping.kind, &columns.kind, row)?;
    let kind = TransactionKind::from_str(kind_str)
        .map_err(|_| malformed(format!("unrecognized transaction kind {kind_str:?}")))?;

    let amount = parse_decimal(field(record, mapping.amount, &columns.amount, row)?)
        .map_err(|e| malformed(e.to_string()))?;
    let unit_price = parse_decimal(field(record, mapping.price, &columns.price, row)?)
        .map_err(|e| malformed(e.to_string()))?;
    let fee = parse_decimal(field(record, mapping.fee, &columns.fee, row)?)
        .map_err(|e| malformed(e.to_string()))?;

    let tx = Transaction {
        date,
        kind,
        amount,
        unit_price,
        fee,
    };
    tx.validate().map_err(malformed)?;
    Ok(tx)
}

fn field<'r>(
    record: &'r csv::StringRecord,
    idx: usize,
    name: &str,
    row: usize,
) -> Result<&'r str> {
    record.get(idx).map(str::trim).ok_or_else(|| {
        anyhow::Error::from(LedgerError::MalformedInput {
            row,
            reason: format!("missing {name} field"),
        })
    })
}

fn parse_date(text: &str, format_override: Option<&str>) -> Result<NaiveDate> {
    if let Some(fmt) = format_override {
        return NaiveDate::parse_from_str(text, fmt)
            .map_err(|_| anyhow!("date {text:?} does not match format {fmt:?}"));
    }

    // Cash App exports write month-first dates; ISO is accepted too.
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Ok(date);
        }
    }
    Err(anyhow!("could not parse date {text:?}"))
}

fn parse_decimal(text: &str) -> Result<Decimal> {
    let cleaned = text.replace('$', "").replace(',', "").replace(' ', "");
    Decimal::from_str(&cleaned).map_err(|_| anyhow!("could not parse number {text:?}"))
}
