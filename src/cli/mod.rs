use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod formatters;

#[derive(Parser)]
#[command(name = "roi")]
#[command(version, about = "Per-category investment ROI reports with XLSX export")]
#[command(
    long_about = "Compute period-over-period ROI for Fixed, Variable and Currency investments from a CSV of records (Date, Investment Type, Amount (EUR), Exchange Rate (EUR to USD)) and export the result as an Excel workbook."
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
    /// Compute ROI per category and export the workbook
    Report {
        /// Path to the investment CSV file
        file: PathBuf,

        /// First date to include (defaults to the earliest date in the file)
        #[arg(long)]
        from: Option<String>,

        /// Last date to include (defaults to the latest date in the file)
        #[arg(long)]
        to: Option<String>,

        /// Where to write the Excel report (defaults to ROI_Investment_Report.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the report only, don't write the workbook
        #[arg(long)]
        no_export: bool,
    },

    /// Show the date range covered by a CSV file (the default filter)
    Range {
        /// Path to the investment CSV file
        file: PathBuf,
    },

    /// Show sheets, columns and row counts of an exported workbook
    Inspect {
        /// Path to the .xlsx file
        file: PathBuf,
    },
}
