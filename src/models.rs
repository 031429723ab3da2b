use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

pub const COL_DATE: &str = "Date";
pub const COL_TYPE: &str = "Investment Type";
pub const COL_AMOUNT_EUR: &str = "Amount (EUR)";
pub const COL_FX_RATE: &str = "Exchange Rate (EUR to USD)";
pub const COL_ROI: &str = "ROI %";
pub const COL_AMOUNT_USD: &str = "Amount (USD)";
pub const COL_ROI_USD: &str = "ROI % (USD)";

/// Investment categories the report knows about
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Fixed,
    Variable,
    Currency,
}

impl Category {
    /// Report order: one sheet per category, in this order
    pub const ALL: [Category; 3] = [Category::Fixed, Category::Variable, Category::Currency];

    /// Sheet / section name
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fixed => "Fixed",
            Category::Variable => "Variable",
            Category::Currency => "Currency",
        }
    }

    /// Match an `Investment Type` label, ignoring case and surrounding blanks.
    /// Anything else is not a category.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "fixed" => Some(Category::Fixed),
            "variable" => Some(Category::Variable),
            "currency" => Some(Category::Currency),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub date: NaiveDate,
    /// Label as written in the input (original casing)
    pub category: String,
    #[serde(serialize_with = "serialize_number")]
    pub amount_eur: f64,
    /// EUR to USD; NaN when the cell was left blank
    #[serde(serialize_with = "serialize_number")]
    pub fx_rate: f64,
}

impl Record {
    pub fn category(&self) -> Option<Category> {
        Category::from_label(&self.category)
    }

    /// USD equivalent of the EUR amount at this row's rate
    pub fn amount_usd(&self) -> f64 {
        self.amount_eur * self.fx_rate
    }
}

/// A record of the Fixed or Variable subset with its ROI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiRow {
    #[serde(flatten)]
    pub record: Record,
    /// None on the first row of a subset
    #[serde(serialize_with = "serialize_pct")]
    pub roi_pct: Option<f64>,
}

/// A record of the Currency subset with both EUR and USD ROI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyRoiRow {
    #[serde(flatten)]
    pub record: Record,
    #[serde(serialize_with = "serialize_pct")]
    pub roi_pct: Option<f64>,
    #[serde(serialize_with = "serialize_number")]
    pub amount_usd: f64,
    #[serde(serialize_with = "serialize_pct")]
    pub roi_pct_usd: Option<f64>,
}

/// A value of an exported cell.
///
/// Keeps "no value" apart from IEEE-754 sentinels so the writer can decide
/// how each is stored.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Date(NaiveDate),
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn from_pct(value: Option<f64>) -> Self {
        match value {
            Some(v) => Cell::Number(v),
            None => Cell::Empty,
        }
    }
}

/// Finite numbers as JSON numbers, sentinels as "inf" / "-inf" / "NaN"
pub fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_str(&non_finite_label(*value))
    }
}

pub fn serialize_pct<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serialize_number(v, serializer),
        None => serializer.serialize_none(),
    }
}

/// Text form of a non-finite float, as spreadsheets and pandas print it
pub fn non_finite_label(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_sign_negative() {
        "-inf".to_string()
    } else {
        "inf".to_string()
    }
}
