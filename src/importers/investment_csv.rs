use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::io::Read;
use tracing::{debug, info, warn};

use crate::error::SchemaError;
use crate::models::{Record, COL_AMOUNT_EUR, COL_DATE, COL_FX_RATE, COL_TYPE};

/// Date-only layouts, tried in order on the first date of an input. Slash
/// dates are month-first, or day-first when the first field cannot be a month.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Decode uploaded bytes: UTF-8 (BOM removed), or Windows-1252 when the
/// bytes are not valid UTF-8.
pub fn decode_input(bytes: &[u8]) -> Cow<'_, str> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return text;
    }
    warn!("Input is not valid UTF-8, decoding as Windows-1252");
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text
}

/// Parse raw uploaded bytes into records
pub fn parse_records_bytes(bytes: &[u8]) -> Result<Vec<Record>, SchemaError> {
    let text = decode_input(bytes);
    parse_records_csv(text.as_bytes())
}

/// Parse investment CSV and extract records.
///
/// Fails on the first missing column or unparseable value; nothing is
/// skipped silently.
pub fn parse_records_csv<R: Read>(reader: R) -> Result<Vec<Record>, SchemaError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(SchemaError::EmptyInput);
    }
    debug!("CSV headers: {:?}", headers);

    let columns = ColumnMapping::from_headers(&headers)?;
    debug!("Column mapping: {:?}", columns);

    // One date layout per file, detected from the first date
    let mut layout: Option<DateLayout> = None;
    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        records.push(parse_row(&row, &columns, &mut layout, line)?);
    }

    info!("Parsed {} investment records", records.len());
    Ok(records)
}

#[derive(Debug)]
struct ColumnMapping {
    date: usize,
    category: usize,
    amount_eur: usize,
    fx_rate: usize,
}

impl ColumnMapping {
    fn from_headers(headers: &StringRecord) -> Result<Self, SchemaError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(SchemaError::MissingColumn(name))
        };

        let mapping = ColumnMapping {
            date: find(COL_DATE)?,
            category: find(COL_TYPE)?,
            amount_eur: find(COL_AMOUNT_EUR)?,
            fx_rate: find(COL_FX_RATE)?,
        };

        let known = [COL_DATE, COL_TYPE, COL_AMOUNT_EUR, COL_FX_RATE];
        for extra in headers.iter().filter(|h| !known.contains(h)) {
            debug!("Ignoring extra column '{}'", extra);
        }

        Ok(mapping)
    }
}

fn parse_row(
    row: &StringRecord,
    columns: &ColumnMapping,
    layout: &mut Option<DateLayout>,
    line: u64,
) -> Result<Record, SchemaError> {
    let field = |idx: usize| row.get(idx).unwrap_or("").trim();

    let date_text = field(columns.date);
    let invalid_date = || SchemaError::InvalidDate {
        line,
        column: COL_DATE,
        value: date_text.to_string(),
    };
    let date_layout = match *layout {
        Some(known) => known,
        None => {
            let detected = DateLayout::detect(date_text).ok_or_else(invalid_date)?;
            debug!("Date layout detected from '{}': {:?}", date_text, detected);
            *layout = Some(detected);
            detected
        }
    };
    let date = date_layout.parse(date_text).ok_or_else(invalid_date)?;

    let amount_eur = parse_number(field(columns.amount_eur), COL_AMOUNT_EUR, line)?;

    // A blank rate is a missing value, not a malformed one: non-currency
    // rows commonly leave it empty.
    let fx_text = field(columns.fx_rate);
    let fx_rate = if fx_text.is_empty() {
        f64::NAN
    } else {
        parse_number(fx_text, COL_FX_RATE, line)?
    };

    Ok(Record {
        date,
        category: row.get(columns.category).unwrap_or("").to_string(),
        amount_eur,
        fx_rate,
    })
}

fn parse_number(text: &str, column: &'static str, line: u64) -> Result<f64, SchemaError> {
    text.parse::<f64>().map_err(|_| SchemaError::InvalidNumber {
        line,
        column,
        value: text.to_string(),
    })
}

/// How the dates of one input are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    Date(&'static str),
    DateTime(&'static str),
    Rfc3339,
}

impl DateLayout {
    /// First layout that reads `text`, in `DATE_FORMATS` then
    /// `DATETIME_FORMATS` order
    pub fn detect(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        DATE_FORMATS
            .iter()
            .copied()
            .map(DateLayout::Date)
            .chain(DATETIME_FORMATS.iter().copied().map(DateLayout::DateTime))
            .chain(std::iter::once(DateLayout::Rfc3339))
            .find(|layout| layout.parse(text).is_some())
    }

    /// Read `text` with this layout only
    pub fn parse(&self, text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        match self {
            DateLayout::Date(format) => NaiveDate::parse_from_str(text, format).ok(),
            DateLayout::DateTime(format) => NaiveDateTime::parse_from_str(text, format)
                .ok()
                .map(|dt| dt.date()),
            DateLayout::Rfc3339 => DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()),
        }
    }
}

/// Parse a single calendar date in any accepted layout; any time of day is dropped
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    DateLayout::detect(text).and_then(|layout| layout.parse(text))
}
