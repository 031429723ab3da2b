//! Output formatting module for CLI display
//!
//! This module handles all terminal output formatting, separating
//! the concerns of data calculation from presentation.

use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::config::Settings;
use crate::export::WorkbookSummary;
use crate::models::{Category, CurrencyRoiRow, RoiRow};
use crate::reports::{ChartPoint, CurrencyChartPoint, DateBounds, DateRange, RoiReport};
use crate::utils::{format_amount, format_percent};

/// Format a ROI report for JSON output
pub fn format_report_json(report: &RoiReport) -> String {
    #[derive(Serialize)]
    struct JsonSections<'a> {
        fixed: &'a [RoiRow],
        variable: &'a [RoiRow],
        currency: &'a [CurrencyRoiRow],
    }

    #[derive(Serialize)]
    struct JsonCharts {
        fixed: Vec<ChartPoint>,
        variable: Vec<ChartPoint>,
        currency: Vec<CurrencyChartPoint>,
    }

    #[derive(Serialize)]
    struct JsonReport<'a> {
        bounds: Option<DateBounds>,
        range: Option<DateRange>,
        sections: JsonSections<'a>,
        charts: JsonCharts,
        unmatched: &'a BTreeMap<String, usize>,
    }

    let json_report = JsonReport {
        bounds: report.bounds,
        range: report.range,
        sections: JsonSections {
            fixed: &report.fixed,
            variable: &report.variable,
            currency: &report.currency,
        },
        charts: JsonCharts {
            fixed: report.fixed_chart(),
            variable: report.variable_chart(),
            currency: report.currency_chart(),
        },
        unmatched: &report.unmatched,
    };

    serde_json::to_string_pretty(&json_report)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

fn colored_pct(value: Option<f64>, decimals: usize) -> String {
    let text = format_percent(value, decimals);
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => text.green().to_string(),
        Some(v) if v.is_finite() => text.red().to_string(),
        Some(_) => text.yellow().to_string(),
        None => text,
    }
}

/// Format a ROI report for terminal table output
pub fn format_report_table(report: &RoiReport, settings: &Settings) -> String {
    let mut output = String::new();
    let decimals = settings.percent_decimals;
    let date_fmt = settings.date_format.as_str();

    output.push_str(&format!("\n{} ROI Investment Report\n", "💹".cyan().bold()));
    if let Some(range) = report.range {
        output.push_str(&format!(
            "{:<12} {} to {}\n",
            "Range:".bold(),
            range.start.format(date_fmt),
            range.end.format(date_fmt)
        ));
    }

    #[derive(Tabled)]
    struct SummaryRow {
        #[tabled(rename = "Category")]
        category: String,
        #[tabled(rename = "Rows")]
        rows: usize,
        #[tabled(rename = "Latest ROI %")]
        latest: String,
    }

    let summary: Vec<SummaryRow> = Category::ALL
        .iter()
        .map(|c| SummaryRow {
            category: c.as_str().to_string(),
            rows: report.rows_in(*c),
            latest: colored_pct(report.latest_roi(*c), decimals),
        })
        .collect();

    let mut table = Table::new(&summary);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());
    output.push_str(&format!("\n{}\n", table));

    #[derive(Tabled)]
    struct RoiLine {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Amount (EUR)")]
        amount: String,
        #[tabled(rename = "ROI %")]
        roi: String,
    }

    for (title, rows) in [
        ("📈 Fixed Investment ROI %", &report.fixed),
        ("📉 Variable Investment ROI %", &report.variable),
    ] {
        output.push_str(&format!("\n{}\n", title.bold()));
        if rows.is_empty() {
            output.push_str(&format!("{}\n", "No records in range".bright_black()));
            continue;
        }
        let lines: Vec<RoiLine> = rows
            .iter()
            .map(|r| RoiLine {
                date: r.record.date.format(date_fmt).to_string(),
                amount: format_amount(r.record.amount_eur),
                roi: colored_pct(r.roi_pct, decimals),
            })
            .collect();
        let mut table = Table::new(&lines);
        table.with(Style::modern());
        table.modify(Columns::new(1..), Alignment::right());
        output.push_str(&format!("{}\n", table));
    }

    #[derive(Tabled)]
    struct CurrencyLine {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Amount (EUR)")]
        amount_eur: String,
        #[tabled(rename = "Amount (USD)")]
        amount_usd: String,
        #[tabled(rename = "ROI % (EUR)")]
        roi_eur: String,
        #[tabled(rename = "ROI % (USD)")]
        roi_usd: String,
    }

    output.push_str(&format!(
        "\n{}\n",
        "💱 Currency Investment ROI % (EUR vs USD)".bold()
    ));
    if report.currency.is_empty() {
        output.push_str(&format!("{}\n", "No records in range".bright_black()));
    } else {
        let lines: Vec<CurrencyLine> = report
            .currency
            .iter()
            .map(|r| CurrencyLine {
                date: r.record.date.format(date_fmt).to_string(),
                amount_eur: format_amount(r.record.amount_eur),
                amount_usd: format_amount(r.amount_usd),
                roi_eur: colored_pct(r.roi_pct, decimals),
                roi_usd: colored_pct(r.roi_pct_usd, decimals),
            })
            .collect();
        let mut table = Table::new(&lines);
        table.with(Style::modern());
        table.modify(Columns::new(1..), Alignment::right());
        output.push_str(&format!("{}\n", table));
    }

    if !report.unmatched.is_empty() {
        output.push_str(&format!("\n{}\n", format_unmatched_warning(&report.unmatched)));
    }

    output
}

/// Warning line for rows dropped because of an unknown investment type
pub fn format_unmatched_warning(unmatched: &BTreeMap<String, usize>) -> String {
    let total: usize = unmatched.values().sum();
    let labels: Vec<String> = unmatched
        .iter()
        .map(|(label, count)| format!("'{}' ({})", label, count))
        .collect();
    format!(
        "{} Skipped {} row(s) with unrecognized investment type: {}",
        "⚠".yellow().bold(),
        total,
        labels.join(", ")
    )
}

/// Format the date span of an input file
pub fn format_bounds(bounds: Option<DateBounds>, record_count: usize, settings: &Settings) -> String {
    match bounds {
        Some(b) => format!(
            "{} {} records from {} to {}",
            "📆".cyan(),
            record_count,
            b.min.format(&settings.date_format),
            b.max.format(&settings.date_format)
        ),
        None => format!("{} No records found", "ℹ".blue().bold()),
    }
}

/// Format an exported workbook's sheets for terminal output
pub fn format_workbook_table(summary: &WorkbookSummary) -> String {
    #[derive(Tabled)]
    struct SheetRow {
        #[tabled(rename = "Sheet")]
        name: String,
        #[tabled(rename = "Rows")]
        rows: usize,
        #[tabled(rename = "Columns")]
        columns: String,
    }

    let rows: Vec<SheetRow> = summary
        .sheets
        .iter()
        .map(|s| SheetRow {
            name: s.name.clone(),
            rows: s.row_count,
            columns: s.columns.join(", "),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.to_string()
}

pub fn format_workbook_json(summary: &WorkbookSummary) -> String {
    serde_json::to_string_pretty(summary)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use crate::reports::run_pipeline;
    use chrono::NaiveDate;

    fn record(d: u32, category: &str, amount_eur: f64, fx_rate: f64) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2024, 5, d).unwrap(),
            category: category.to_string(),
            amount_eur,
            fx_rate,
        }
    }

    fn sample_report() -> RoiReport {
        run_pipeline(
            &[
                record(1, "Fixed", 100.0, 1.1),
                record(2, "Fixed", 150.0, 1.1),
                record(1, "Currency", 0.0, 1.1),
                record(2, "Currency", 50.0, 1.1),
                record(3, "crypto", 7.0, 1.0),
            ],
            None,
        )
    }

    #[test]
    fn test_report_table_lists_every_section() {
        colored::control::set_override(false);
        let text = format_report_table(&sample_report(), &Settings::default());
        assert!(text.contains("Range:"));
        assert!(text.contains("2024-05-01 to 2024-05-03"));
        assert!(text.contains("Fixed Investment ROI %"));
        assert!(text.contains("Variable Investment ROI %"));
        assert!(text.contains("Currency Investment ROI % (EUR vs USD)"));
        assert!(text.contains("50.00%"));
        assert!(text.contains("inf"));
        assert!(text.contains("No records in range"));
        assert!(text.contains("'crypto' (1)"));
    }

    #[test]
    fn test_report_json_shape() {
        let json: serde_json::Value =
            serde_json::from_str(&format_report_json(&sample_report())).unwrap();
        assert_eq!(json["sections"]["fixed"].as_array().unwrap().len(), 2);
        assert!(json["sections"]["fixed"][0]["roi_pct"].is_null());
        assert_eq!(json["sections"]["fixed"][1]["roi_pct"], 50.0);
        assert_eq!(json["sections"]["currency"][1]["roi_pct"], "inf");
        assert_eq!(json["charts"]["currency"][1]["roi_pct_usd"], "inf");
        assert_eq!(json["charts"]["variable"].as_array().unwrap().len(), 0);
        assert_eq!(json["unmatched"]["crypto"], 1);
        assert_eq!(json["range"]["start"], "2024-05-01");
    }

    #[test]
    fn test_format_bounds() {
        colored::control::set_override(false);
        let settings = Settings::default();
        let bounds = DateBounds {
            min: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            max: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        };
        let text = format_bounds(Some(bounds), 12, &settings);
        assert!(text.contains("12 records from 2023-01-01 to 2023-12-31"));
        assert!(format_bounds(None, 0, &settings).contains("No records found"));
    }
}
