//! Utility functions for formatting and common operations
//!
//! Centralized formatting for amounts and ROI percentages so terminal
//! output looks the same everywhere.

use crate::models::non_finite_label;

/// Shown for a ROI cell that has no value (first row of a series)
pub const UNDEFINED: &str = "-";

/// Core formatting function with full control over output.
///
/// Formats a float with `,` thousands separators and `decimals` digits
/// after the `.`; non-finite values print as `inf`, `-inf` or `NaN`.
///
/// # Examples
/// ```
/// use roi_tracker::utils::format_number_with_width;
///
/// assert_eq!(format_number_with_width(1234.5, 2, 0), "1,234.50");
/// assert_eq!(format_number_with_width(-1234567.0, 0, 12), "  -1,234,567");
/// assert_eq!(format_number_with_width(f64::INFINITY, 2, 0), "inf");
/// ```
pub fn format_number_with_width(value: f64, decimals: usize, width: usize) -> String {
    let result = if value.is_finite() {
        let formatted = format!("{:.*}", decimals, value.abs());
        let (integer_part, decimal_part) = match formatted.split_once('.') {
            Some((int, dec)) => (int, Some(dec)),
            None => (formatted.as_str(), None),
        };

        let with_separators: String = integer_part
            .chars()
            .rev()
            .enumerate()
            .flat_map(|(i, c)| {
                if i > 0 && i % 3 == 0 {
                    vec![',', c]
                } else {
                    vec![c]
                }
            })
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        // No sign when rounding hides the magnitude: "-0.00" reads as a bug
        let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
        let sign = if value < 0.0 && !is_zero { "-" } else { "" };
        match decimal_part {
            Some(dec) => format!("{}{}.{}", sign, with_separators, dec),
            None => format!("{}{}", sign, with_separators),
        }
    } else {
        non_finite_label(value)
    };

    if width > 0 && result.len() < width {
        format!("{:>width$}", result, width = width)
    } else {
        result
    }
}

/// Format an amount with two decimals: "1,234.56"
///
/// # Examples
/// ```
/// use roi_tracker::utils::format_amount;
///
/// assert_eq!(format_amount(1234.56), "1,234.56");
/// assert_eq!(format_amount(-500.0), "-500.00");
/// ```
pub fn format_amount(value: f64) -> String {
    format_number_with_width(value, 2, 0)
}

/// Format a ROI cell: "12.50%", or "-" when undefined
///
/// # Examples
/// ```
/// use roi_tracker::utils::format_percent;
///
/// assert_eq!(format_percent(Some(50.0), 2), "50.00%");
/// assert_eq!(format_percent(Some(-12.345), 1), "-12.3%");
/// assert_eq!(format_percent(None, 2), "-");
/// assert_eq!(format_percent(Some(f64::INFINITY), 2), "inf");
/// ```
pub fn format_percent(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}%", format_number_with_width(v, decimals, 0)),
        Some(v) => non_finite_label(v),
        None => UNDEFINED.to_string(),
    }
}
