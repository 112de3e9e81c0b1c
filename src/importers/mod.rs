// Import module - transaction CSV parsing

pub mod transactions_csv;

use anyhow::{anyhow, Result};
use std::path::Path;
use tracing::info;

use crate::config::CsvColumns;
use crate::model::Transaction;

pub use transactions_csv::load_transactions;

/// Import transactions from a file, dispatching on its extension.
pub fn import_file<P: AsRef<Path>>(file_path: P, columns: &CsvColumns) -> Result<Vec<Transaction>> {
    let path = file_path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| anyhow!("File has no extension"))?
        .to_lowercase();

    info!("Importing file: {:?} (type: {})", path, extension);

    match extension.as_str() {
        "csv" | "txt" => transactions_csv::load_transactions(path, columns),
        _ => Err(anyhow!(
            "Unsupported file format: {}. Supported formats: .csv, .txt",
            extension
        )),
    }
}
