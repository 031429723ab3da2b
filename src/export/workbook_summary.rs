use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use serde::Serialize;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;

use crate::error::ExportError;

/// Shape of an exported report, as read back from the XLSX file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkbookSummary {
    pub sheets: Vec<SheetSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetSummary {
    pub name: String,
    /// Header row
    pub columns: Vec<String>,
    /// Data rows below the header
    pub row_count: usize,
}

/// Summarize an in-memory XLSX document
pub fn read_workbook(bytes: &[u8]) -> Result<WorkbookSummary, ExportError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    summarize(&mut workbook)
}

/// Summarize an XLSX file on disk
pub fn inspect_workbook<P: AsRef<Path>>(path: P) -> Result<WorkbookSummary, ExportError> {
    let mut workbook: Xlsx<_> = open_workbook(path.as_ref())?;
    summarize(&mut workbook)
}

fn summarize<RS: Read + Seek>(workbook: &mut Xlsx<RS>) -> Result<WorkbookSummary, ExportError> {
    let mut sheets = Vec::new();

    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        let columns: Vec<String> = range
            .rows()
            .next()
            .map(|header| header.iter().filter_map(header_text).collect())
            .unwrap_or_default();
        let row_count = range.height().saturating_sub(1);

        debug!("Sheet '{}': {} columns, {} rows", name, columns.len(), row_count);
        sheets.push(SheetSummary {
            name,
            columns,
            row_count,
        });
    }

    Ok(WorkbookSummary { sheets })
}

fn header_text(cell: &Data) -> Option<String> {
    cell.get_string().map(|s| s.trim().to_string())
}
