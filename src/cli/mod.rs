use clap::{Args, Parser, Subcommand};

pub mod formatters;

#[derive(Parser)]
#[command(name = "capgains")]
#[command(version, about = "FIFO capital gains and tax calculator for asset CSV exports")]
#[command(
    long_about = "Match asset sells against purchase lots first-in first-out, price each taxable event with short/long-term rates, and report the aggregate tax position. Reads Cash App style bitcoin CSV exports out of the box; column headers and the date format are configurable for other sources."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full realization report with per-lot detail and summary
    Report {
        #[command(flatten)]
        input: InputArgs,

        /// Keep only sells realized in this calendar year
        #[arg(long)]
        year: Option<i32>,

        /// Write the realizations as CSV to this path
        #[arg(long)]
        export: Option<String>,
    },

    /// Aggregate tax summary only
    Summary {
        #[command(flatten)]
        input: InputArgs,

        /// Keep only sells realized in this calendar year
        #[arg(long)]
        year: Option<i32>,
    },

    /// Validate a transaction file without producing a report
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Input file plus the knobs describing its layout.
#[derive(Args)]
pub struct InputArgs {
    /// Path to the transaction CSV file
    pub file: String,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Header of the date column (default: DATE)
    #[arg(long = "date-header")]
    pub date_header: Option<String>,

    /// Header of the transaction kind column (default: TYPE)
    #[arg(long = "kind-header")]
    pub kind_header: Option<String>,

    /// Header of the asset amount column (default: AMT-BTC)
    #[arg(long = "amount-header")]
    pub amount_header: Option<String>,

    /// Header of the unit price column (default: PRICE)
    #[arg(long = "price-header")]
    pub price_header: Option<String>,

    /// Header of the fee column (default: FEE)
    #[arg(long = "fee-header")]
    pub fee_header: Option<String>,

    /// Exact date format for the date column (e.g. %d.%m.%Y)
    #[arg(long = "date-format")]
    pub date_format: Option<String>,
}
