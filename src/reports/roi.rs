//! Period-over-period ROI series.
//!
//! ROI between two chronologically adjacent rows is the simple percentage
//! change `(current - previous) / previous * 100`. The first row of a subset
//! has no predecessor and its ROI is undefined (`None`).
//!
//! The arithmetic is plain IEEE-754: a zero previous amount yields `inf`,
//! `-inf` or `NaN` in that cell and the series carries on.

use itertools::Itertools;

use crate::models::{CurrencyRoiRow, RoiRow};
use crate::reports::categories::CategorySubset;

/// Percentage change of each value against the one before it
pub fn pct_change(values: &[f64]) -> Vec<Option<f64>> {
    std::iter::once(None)
        .chain(
            values
                .iter()
                .tuple_windows()
                .map(|(prev, current)| Some((current - prev) / prev * 100.0)),
        )
        .take(values.len())
        .collect()
}

/// ROI % over the EUR amount
pub fn calculate_roi(subset: &CategorySubset) -> Vec<RoiRow> {
    let amounts: Vec<f64> = subset.records().iter().map(|r| r.amount_eur).collect();
    subset
        .records()
        .iter()
        .zip(pct_change(&amounts))
        .map(|(record, roi_pct)| RoiRow {
            record: record.clone(),
            roi_pct,
        })
        .collect()
}

/// ROI % over the EUR amount and over its USD equivalent
pub fn calculate_currency_roi(subset: &CategorySubset) -> Vec<CurrencyRoiRow> {
    let records = subset.records();
    let amounts_eur: Vec<f64> = records.iter().map(|r| r.amount_eur).collect();
    let amounts_usd: Vec<f64> = records.iter().map(|r| r.amount_usd()).collect();

    records
        .iter()
        .zip(pct_change(&amounts_eur))
        .zip(amounts_usd.iter().zip(pct_change(&amounts_usd)))
        .map(|((record, roi_pct), (&amount_usd, roi_pct_usd))| CurrencyRoiRow {
            record: record.clone(),
            roi_pct,
            amount_usd,
            roi_pct_usd,
        })
        .collect()
}
