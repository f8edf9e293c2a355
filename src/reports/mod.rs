//! Derived views over the expense collection
//!
//! Pure functions: nothing here reads or writes storage.
//!
//! - `listing`: date-descending sort, month grouping and pagination
//! - `analytics`: per-category totals and bar heights
//! - `filter`: inclusive date ranges shared with export

pub mod analytics;
pub mod filter;
pub mod listing;

pub use analytics::{AnalyticsFilter, AnalyticsReport, CategoryTotal, CHART_MAX_HEIGHT};
pub use filter::DateRange;
pub use listing::{
    group_by_month, page_count, sort_by_date_desc, ListingPage, MonthGroup, Page, PAGE_SIZE,
};
