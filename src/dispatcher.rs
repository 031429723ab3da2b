//! Command dispatcher that routes clap Commands to their handlers.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use serde_json::json;
use std::path::Path;
use tracing::info;

use crate::cli::formatters;
use crate::cli::Commands;
use crate::config::Settings;
use crate::export::{inspect_workbook, save_xlsx};
use crate::importers::{import_file, parse_date};
use crate::reports::{run_pipeline, DateBounds};

/// Route a parsed command to its handler
pub fn dispatch_command(command: Commands, json_output: bool, settings: &Settings) -> Result<()> {
    match command {
        Commands::Report {
            file,
            from,
            to,
            output,
            no_export,
        } => {
            let from = from.as_deref().map(parse_cli_date).transpose()?;
            let to = to.as_deref().map(parse_cli_date).transpose()?;
            let output = if no_export {
                None
            } else {
                Some(output.unwrap_or_else(|| settings.output.clone()))
            };
            dispatch_report(&file, from, to, output.as_deref(), json_output, settings)
        }
        Commands::Range { file } => dispatch_range(&file, json_output, settings),
        Commands::Inspect { file } => dispatch_inspect(&file, json_output),
    }
}

/// Parse a `--from` / `--to` value
pub fn parse_cli_date(text: &str) -> Result<NaiveDate> {
    parse_date(text).ok_or_else(|| anyhow!("Invalid date '{}'. Use YYYY-MM-DD", text))
}

fn dispatch_report(
    file: &Path,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    output: Option<&Path>,
    json_output: bool,
    settings: &Settings,
) -> Result<()> {
    info!("Building ROI report from: {:?}", file);
    let records = import_file(file)?;

    let range = DateBounds::from_records(&records).map(|b| b.range_with(from, to));
    let report = run_pipeline(&records, range);

    if json_output {
        println!("{}", formatters::format_report_json(&report));
    } else {
        println!("{}", formatters::format_report_table(&report, settings));
    }

    if let Some(path) = output {
        save_xlsx(&report, path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        if !json_output {
            println!("{} Report saved to {}", "✓".green().bold(), path.display());
        }
    }

    Ok(())
}

fn dispatch_range(file: &Path, json_output: bool, settings: &Settings) -> Result<()> {
    let records = import_file(file)?;
    let bounds = DateBounds::from_records(&records);

    if json_output {
        let value = json!({ "records": records.len(), "bounds": bounds });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", formatters::format_bounds(bounds, records.len(), settings));
    }
    Ok(())
}

fn dispatch_inspect(file: &Path, json_output: bool) -> Result<()> {
    let summary = inspect_workbook(file)
        .with_context(|| format!("Failed to read workbook {}", file.display()))?;

    if json_output {
        println!("{}", formatters::format_workbook_json(&summary));
    } else {
        println!("{}", formatters::format_workbook_table(&summary));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_date() {
        assert_eq!(
            parse_cli_date("2024-06-30").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
        );
        let err = parse_cli_date("June").unwrap_err();
        assert!(err.to_string().contains("Invalid date 'June'"));
    }
}
