//! Error handling for ROI Tracker
//!
//! Typed errors for the parsing, export and configuration layers, and a
//! unified Result type using anyhow for the command layer.

use thiserror::Error;

/// Input does not match the expected investment CSV layout.
///
/// Any of these aborts the whole run; the message is shown to the user as is.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("input is empty: expected a header row")]
    EmptyInput,

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("line {line}: invalid date '{value}' in column '{column}'")]
    InvalidDate {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: invalid number '{value}' in column '{column}'")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Failure while writing or re-reading the XLSX report.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("xlsx write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("xlsx read error: {0}")]
    Read(#[from] calamine::XlsxError),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid date format '{0}'")]
    DateFormat(String),

    #[error("invalid value '{value}' for {var}")]
    Env { var: &'static str, value: String },
}

/// Result type alias for command handlers
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_formatting_is_readable() {
        let err = SchemaError::MissingColumn("Amount (EUR)");
        assert_eq!(err.to_string(), "missing required column 'Amount (EUR)'");

        let err = SchemaError::InvalidDate {
            line: 3,
            column: "Date",
            value: "tomorrow".to_string(),
        };
        assert_eq!(err.to_string(), "line 3: invalid date 'tomorrow' in column 'Date'");
    }

    #[test]
    fn test_anyhow_context_keeps_schema_message() {
        use anyhow::Context;
        let result: Result<()> = Err(SchemaError::MissingColumn("Date")).context("failed to parse input");
        match result {
            Err(e) => {
                assert!(e.to_string().contains("failed to parse input"));
                let debug_msg = format!("{:?}", e);
                assert!(debug_msg.contains("missing required column 'Date'"));
            }
            Ok(_) => panic!("expected error"),
        }
    }

    #[test]
    fn test_config_error_env_variant() {
        let err = ConfigError::Env {
            var: "ROI_TRACKER_PERCENT_DECIMALS",
            value: "many".to_string(),
        };
        assert!(err.to_string().starts_with("invalid value 'many'"));
    }
}
