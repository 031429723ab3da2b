//! ROI Tracker - per-category investment ROI reports
//!
//! Parses a CSV of investment records, filters it to a date range, splits it
//! into Fixed, Variable and Currency subsets, computes period-over-period ROI
//! for each, and exports the result as a three-sheet XLSX workbook.

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod export;
pub mod importers;
pub mod models;
pub mod reports;
pub mod utils;
