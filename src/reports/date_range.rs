use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::Record;

/// Earliest and latest date present in a record set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    /// None for an empty record set
    pub fn from_records(records: &[Record]) -> Option<Self> {
        let min = records.iter().map(|r| r.date).min()?;
        let max = records.iter().map(|r| r.date).max()?;
        Some(DateBounds { min, max })
    }

    /// The default filter: everything in the data
    pub fn full_range(&self) -> DateRange {
        DateRange::new(self.min, self.max)
    }

    /// Fill in whichever end of a range the caller left open
    pub fn range_with(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> DateRange {
        DateRange::new(start.unwrap_or(self.min), end.unwrap_or(self.max))
    }
}

/// Inclusive date interval.
///
/// `start > end` is allowed and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

/// Keep records dated within `range`, both ends included
pub fn filter_by_date(records: &[Record], range: DateRange) -> Vec<Record> {
    if range.is_inverted() {
        warn!(
            "Date range start {} is after end {}; no records selected",
            range.start, range.end
        );
    }

    let filtered: Vec<Record> = records
        .iter()
        .filter(|r| range.contains(r.date))
        .cloned()
        .collect();

    debug!(
        "Date filter {}..={} kept {} of {} records",
        range.start,
        range.end,
        filtered.len(),
        records.len()
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate) -> Record {
        Record {
            date,
            category: "Fixed".to_string(),
            amount_eur: 100.0,
            fx_rate: 1.0,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record(ymd(2024, 3, 1)),
            record(ymd(2024, 1, 1)),
            record(ymd(2024, 2, 1)),
        ]
    }

    #[test]
    fn test_bounds_are_min_and_max() {
        let bounds = DateBounds::from_records(&sample()).unwrap();
        assert_eq!(bounds.min, ymd(2024, 1, 1));
        assert_eq!(bounds.max, ymd(2024, 3, 1));
        assert!(DateBounds::from_records(&[]).is_none());
    }

    #[test]
    fn test_filter_is_inclusive() {
        let range = DateRange::new(ymd(2024, 1, 1), ymd(2024, 2, 1));
        let filtered = filter_by_date(&sample(), range);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.date <= ymd(2024, 2, 1)));
    }

    #[test]
    fn test_full_range_keeps_everything() {
        let records = sample();
        let range = DateBounds::from_records(&records).unwrap().full_range();
        assert_eq!(filter_by_date(&records, range), records);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let records = sample();
        let bounds = DateBounds::from_records(&records).unwrap();
        let range = DateRange::new(bounds.max, bounds.min);
        assert!(range.is_inverted());
        assert!(filter_by_date(&records, range).is_empty());
    }

    #[test]
    fn test_range_with_fills_open_ends() {
        let bounds = DateBounds::from_records(&sample()).unwrap();
        let range = bounds.range_with(Some(ymd(2024, 2, 1)), None);
        assert_eq!(range, DateRange::new(ymd(2024, 2, 1), ymd(2024, 3, 1)));
    }
}
