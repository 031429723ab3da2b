use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::models::{
    serialize_pct, Category, Cell, CurrencyRoiRow, Record, RoiRow, COL_AMOUNT_EUR,
    COL_AMOUNT_USD, COL_DATE, COL_FX_RATE, COL_ROI, COL_ROI_USD, COL_TYPE,
};
use crate::reports::categories::split_all;
use crate::reports::date_range::{filter_by_date, DateBounds, DateRange};
use crate::reports::roi::{calculate_currency_roi, calculate_roi};

/// Fully computed ROI report for one input and one date range
#[derive(Debug, Clone, Serialize)]
pub struct RoiReport {
    /// Date span of the whole input, before filtering
    pub bounds: Option<DateBounds>,
    /// Filter that was applied; None when the input had no rows
    pub range: Option<DateRange>,
    pub fixed: Vec<RoiRow>,
    pub variable: Vec<RoiRow>,
    pub currency: Vec<CurrencyRoiRow>,
    /// Unrecognized investment types inside the range, with row counts
    pub unmatched: BTreeMap<String, usize>,
}

/// (date, ROI %) point of the Fixed or Variable chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_pct")]
    pub roi_pct: Option<f64>,
}

/// (date, ROI % EUR, ROI % USD) point of the Currency chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrencyChartPoint {
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_pct")]
    pub roi_pct_eur: Option<f64>,
    #[serde(serialize_with = "serialize_pct")]
    pub roi_pct_usd: Option<f64>,
}

/// One named table of the exported report
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub category: Category,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Section {
    pub fn name(&self) -> &'static str {
        self.category.as_str()
    }
}

/// Parse-free pipeline: filter, split, compute.
///
/// `range` defaults to the full span of `records`.
pub fn run_pipeline(records: &[Record], range: Option<DateRange>) -> RoiReport {
    let bounds = DateBounds::from_records(records);
    let range = range.or_else(|| bounds.map(|b| b.full_range()));

    let filtered = match range {
        Some(range) => filter_by_date(records, range),
        None => Vec::new(),
    };
    let split = split_all(&filtered);

    let report = RoiReport {
        bounds,
        range,
        fixed: calculate_roi(&split.fixed),
        variable: calculate_roi(&split.variable),
        currency: calculate_currency_roi(&split.currency),
        unmatched: split.unmatched,
    };

    info!(
        "ROI report: {} fixed, {} variable, {} currency rows",
        report.fixed.len(),
        report.variable.len(),
        report.currency.len()
    );
    report
}

impl RoiReport {
    pub fn rows_in(&self, category: Category) -> usize {
        match category {
            Category::Fixed => self.fixed.len(),
            Category::Variable => self.variable.len(),
            Category::Currency => self.currency.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.rows_in(*c) == 0)
    }

    /// Most recent finite EUR ROI of a category
    pub fn latest_roi(&self, category: Category) -> Option<f64> {
        let series: Vec<Option<f64>> = match category {
            Category::Fixed => self.fixed.iter().map(|r| r.roi_pct).collect(),
            Category::Variable => self.variable.iter().map(|r| r.roi_pct).collect(),
            Category::Currency => self.currency.iter().map(|r| r.roi_pct).collect(),
        };
        series.into_iter().rev().flatten().find(|v| v.is_finite())
    }

    pub fn fixed_chart(&self) -> Vec<ChartPoint> {
        chart_points(&self.fixed)
    }

    pub fn variable_chart(&self) -> Vec<ChartPoint> {
        chart_points(&self.variable)
    }

    pub fn currency_chart(&self) -> Vec<CurrencyChartPoint> {
        self.currency
            .iter()
            .map(|r| CurrencyChartPoint {
                date: r.record.date,
                roi_pct_eur: r.roi_pct,
                roi_pct_usd: r.roi_pct_usd,
            })
            .collect()
    }

    /// Export sections in sheet order: Fixed, Variable, Currency
    pub fn sections(&self) -> Vec<Section> {
        vec![
            roi_section(Category::Fixed, &self.fixed),
            roi_section(Category::Variable, &self.variable),
            currency_section(&self.currency),
        ]
    }
}

fn chart_points(rows: &[RoiRow]) -> Vec<ChartPoint> {
    rows.iter()
        .map(|r| ChartPoint {
            date: r.record.date,
            roi_pct: r.roi_pct,
        })
        .collect()
}

fn record_cells(record: &Record) -> Vec<Cell> {
    vec![
        Cell::Date(record.date),
        Cell::Text(record.category.clone()),
        Cell::Number(record.amount_eur),
        Cell::Number(record.fx_rate),
    ]
}

fn roi_section(category: Category, rows: &[RoiRow]) -> Section {
    Section {
        category,
        columns: vec![COL_DATE, COL_TYPE, COL_AMOUNT_EUR, COL_FX_RATE, COL_ROI],
        rows: rows
            .iter()
            .map(|r| {
                let mut cells = record_cells(&r.record);
                cells.push(Cell::from_pct(r.roi_pct));
                cells
            })
            .collect(),
    }
}

fn currency_section(rows: &[CurrencyRoiRow]) -> Section {
    Section {
        category: Category::Currency,
        columns: vec![
            COL_DATE,
            COL_TYPE,
            COL_AMOUNT_EUR,
            COL_FX_RATE,
            COL_ROI,
            COL_AMOUNT_USD,
            COL_ROI_USD,
        ],
        rows: rows
            .iter()
            .map(|r| {
                let mut cells = record_cells(&r.record);
                cells.push(Cell::from_pct(r.roi_pct));
                cells.push(Cell::Number(r.amount_usd));
                cells.push(Cell::from_pct(r.roi_pct_usd));
                cells
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(y: i32, m: u32, d: u32, category: &str, amount_eur: f64, fx_rate: f64) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            category: category.to_string(),
            amount_eur,
            fx_rate,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record(2024, 2, 1, "Fixed", 150.0, 1.1),
            record(2024, 1, 1, "fixed", 100.0, 1.1),
            record(2024, 1, 1, "Variable", 200.0, 1.1),
            record(2024, 2, 1, "VARIABLE", 100.0, 1.1),
            record(2024, 1, 1, "Currency", 100.0, 1.1),
            record(2024, 2, 1, "currency", 100.0, 1.2),
            record(2024, 1, 15, "crypto", 999.0, 1.1),
        ]
    }

    #[test]
    fn test_run_pipeline_defaults_to_full_range() {
        let report = run_pipeline(&sample(), None);
        let bounds = report.bounds.unwrap();
        assert_eq!(report.range, Some(bounds.full_range()));
        assert_eq!(report.fixed.len(), 2);
        assert_eq!(report.variable.len(), 2);
        assert_eq!(report.currency.len(), 2);
        assert_eq!(report.unmatched.get("crypto"), Some(&1));

        assert_eq!(report.fixed[1].roi_pct, Some(50.0));
        assert_eq!(report.variable[1].roi_pct, Some(-50.0));
    }

    #[test]
    fn test_run_pipeline_applies_range() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        );
        let report = run_pipeline(&sample(), Some(range));
        assert_eq!(report.fixed.len(), 1);
        assert_eq!(report.fixed[0].roi_pct, None);
        assert!(report.unmatched.is_empty());
    }

    #[test]
    fn test_run_pipeline_inverted_range_has_empty_sections() {
        let records = sample();
        let bounds = DateBounds::from_records(&records).unwrap();
        let report = run_pipeline(&records, Some(DateRange::new(bounds.max, bounds.min)));
        assert!(report.is_empty());

        let sections = report.sections();
        let names: Vec<&str> = sections.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Fixed", "Variable", "Currency"]);
        assert!(sections.iter().all(|s| s.rows.is_empty()));
    }

    #[test]
    fn test_run_pipeline_no_records() {
        let report = run_pipeline(&[], None);
        assert!(report.bounds.is_none());
        assert!(report.range.is_none());
        assert!(report.is_empty());
        assert_eq!(report.sections().len(), 3);
    }

    #[test]
    fn test_sections_columns() {
        let report = run_pipeline(&sample(), None);
        let sections = report.sections();
        assert_eq!(
            sections[0].columns,
            vec!["Date", "Investment Type", "Amount (EUR)", "Exchange Rate (EUR to USD)", "ROI %"]
        );
        assert_eq!(sections[1].columns, sections[0].columns);
        assert_eq!(
            sections[2].columns,
            vec![
                "Date",
                "Investment Type",
                "Amount (EUR)",
                "Exchange Rate (EUR to USD)",
                "ROI %",
                "Amount (USD)",
                "ROI % (USD)"
            ]
        );
        for section in &sections {
            assert!(section.rows.iter().all(|row| row.len() == section.columns.len()));
        }
        assert_eq!(sections[0].rows[0][4], Cell::Empty);
        assert_eq!(sections[0].rows[1][4], Cell::Number(50.0));
    }

    #[test]
    fn test_unmatched_rows_are_in_no_section() {
        let report = run_pipeline(&sample(), None);
        for section in report.sections() {
            assert!(section
                .rows
                .iter()
                .all(|row| row[1] != Cell::Text("crypto".to_string())));
        }
    }

    #[test]
    fn test_chart_series_shapes() {
        let report = run_pipeline(&sample(), None);
        let fixed = report.fixed_chart();
        assert_eq!(fixed.len(), 2);
        assert_eq!(fixed[0].roi_pct, None);
        assert_eq!(fixed[1].roi_pct, Some(50.0));

        let currency = report.currency_chart();
        assert_eq!(currency.len(), 2);
        assert_eq!(currency[1].roi_pct_eur, Some(0.0));
        let usd = currency[1].roi_pct_usd.unwrap();
        assert!((usd - 100.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_latest_roi_skips_undefined_and_infinite() {
        let records = vec![
            record(2024, 1, 1, "Fixed", 100.0, 1.0),
            record(2024, 2, 1, "Fixed", 120.0, 1.0),
            record(2024, 3, 1, "Fixed", 0.0, 1.0),
            record(2024, 4, 1, "Fixed", 10.0, 1.0),
        ];
        let report = run_pipeline(&records, None);
        assert_eq!(report.latest_roi(Category::Fixed), Some(-100.0));
        assert_eq!(report.latest_roi(Category::Variable), None);
    }
}
