// Reports module - date filtering, category split, ROI series and report assembly

pub mod categories;
pub mod date_range;
pub mod roi;
pub mod roi_report;

pub use categories::{split_all, split_category, CategorySplit, CategorySubset};
pub use date_range::{filter_by_date, DateBounds, DateRange};
pub use roi::{calculate_currency_roi, calculate_roi, pct_change};
pub use roi_report::{run_pipeline, ChartPoint, CurrencyChartPoint, RoiReport, Section};
