// Import module - investment record CSV parser

pub mod investment_csv;

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tracing::info;

use crate::models::Record;

pub use investment_csv::{
    decode_input, parse_date, parse_records_bytes, parse_records_csv, DateLayout,
};

/// Import investment records from a file, dispatching on its extension
pub fn import_file<P: AsRef<Path>>(file_path: P) -> Result<Vec<Record>> {
    let path = file_path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| anyhow!("File has no extension"))?
        .to_lowercase();

    info!("Importing investment file: {:?} (type: {})", path, extension);

    match extension.as_str() {
        "csv" | "txt" => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let records = parse_records_bytes(&bytes)?;
            Ok(records)
        }
        _ => Err(anyhow!(
            "Unsupported file format: {}. Supported formats: .csv, .txt",
            extension
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_import_file_rejects_unknown_extension() {
        let err = import_file("records.pdf").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Unsupported file format: pdf"));
        assert!(msg.contains(".csv, .txt"));
    }

    #[test]
    fn test_import_file_reads_txt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.TXT");
        std::fs::write(
            &path,
            "Date,Investment Type,Amount (EUR),Exchange Rate (EUR to USD)\n2024-01-31,Fixed,100,1.1\n",
        )
        .unwrap();

        let records = import_file(&path).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_import_file_reads_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Date,Investment Type,Amount (EUR),Exchange Rate (EUR to USD)").unwrap();
        writeln!(file, "2024-01-31,Fixed,100,1.1").unwrap();
        drop(file);

        let records = import_file(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount_eur, 100.0);
    }

    #[test]
    fn test_import_file_surfaces_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        std::fs::write(&path, "Date,Amount (EUR)\n2024-01-31,100\n").unwrap();

        let err = import_file(&path).unwrap_err();
        assert!(err.to_string().contains("missing required column 'Investment Type'"));
    }
}
