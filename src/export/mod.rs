//! XLSX export of an ROI report.
//!
//! One worksheet per section, named `Fixed`, `Variable` and `Currency`, each
//! with a header row and no index column. Cells that have no value are left
//! blank; infinite ROI values are written as the text `inf` / `-inf`, which
//! is how spreadsheets exported by pandas spell them. Dates Excel cannot
//! store are written as `yyyy-mm-dd` text.

pub mod workbook_summary;

use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};
use std::path::Path;
use tracing::{debug, info};

use crate::error::ExportError;
use crate::models::{non_finite_label, Cell};
use crate::reports::RoiReport;

pub use workbook_summary::{inspect_workbook, read_workbook, SheetSummary, WorkbookSummary};

/// Default download name of the report
pub const DEFAULT_REPORT_NAME: &str = "ROI_Investment_Report.xlsx";

/// Render the report into an in-memory XLSX document
pub fn write_xlsx(report: &RoiReport) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for section in report.sections() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(section.name())?;

        for (col, name) in section.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
        }

        for (idx, row) in section.rows.iter().enumerate() {
            let row_num = idx as u32 + 1;
            for (col, cell) in row.iter().enumerate() {
                write_cell(worksheet, row_num, col as u16, cell, &date_format)?;
            }
        }

        worksheet.autofit();
    }

    let bytes = workbook.save_to_buffer()?;
    info!("Rendered ROI workbook ({} bytes)", bytes.len());
    Ok(bytes)
}

/// Write the report to `path`, creating parent directories as needed
pub fn save_xlsx<P: AsRef<Path>>(report: &RoiReport, path: P) -> Result<(), ExportError> {
    let path = path.as_ref();
    let bytes = write_xlsx(report)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    info!("Saved ROI workbook to {:?}", path);
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    date_format: &Format,
) -> Result<(), ExportError> {
    match cell {
        Cell::Date(date) => match excel_date(*date) {
            Some(excel_date) => {
                worksheet.write_datetime_with_format(row, col, &excel_date, date_format)?;
            }
            None => {
                debug!("Date {} is outside the Excel range, writing it as text", date);
                worksheet.write_string(row, col, date.format("%Y-%m-%d").to_string())?;
            }
        },
        Cell::Text(text) => {
            worksheet.write_string(row, col, text)?;
        }
        Cell::Number(value) if value.is_finite() => {
            worksheet.write_number(row, col, *value)?;
        }
        Cell::Number(value) if value.is_nan() => {}
        Cell::Number(value) => {
            worksheet.write_string(row, col, non_finite_label(*value))?;
        }
        Cell::Empty => {}
    }
    Ok(())
}

/// Excel has no dates before 1900 or after 9999
fn excel_date(date: NaiveDate) -> Option<ExcelDateTime> {
    let year = u16::try_from(date.year()).ok()?;
    ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8).ok()
}
