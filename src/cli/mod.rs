//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod category;
pub mod expense;
pub mod export;
pub mod import;
pub mod report;

pub use audit::handle_audit_command;
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportArgs};
pub use import::handle_import_command;
pub use report::{handle_report_command, ReportCommands};

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_date, ExpenseId};
use crate::reports::DateRange;

/// Parse a `--from`/`--to` style date argument
pub(crate) fn parse_date_arg(label: &str, value: &str) -> ExpenseResult<NaiveDate> {
    parse_date(value).ok_or_else(|| {
        ExpenseError::Validation(format!(
            "Invalid {} date format: '{}'. Use YYYY-MM-DD",
            label, value
        ))
    })
}

/// Build an inclusive range from optional bounds, defaulting to month-to-date
pub(crate) fn parse_range(from: Option<&str>, to: Option<&str>) -> ExpenseResult<DateRange> {
    let start = from.map(|s| parse_date_arg("start", s)).transpose()?;
    let end = to.map(|s| parse_date_arg("end", s)).transpose()?;
    let range = DateRange::from_bounds(start, end);

    if range.start > range.end {
        return Err(ExpenseError::Validation(format!(
            "Start date {} is after end date {}",
            range.start, range.end
        )));
    }

    Ok(range)
}

/// Parse an expense ID argument
pub(crate) fn parse_expense_id(value: &str) -> ExpenseResult<ExpenseId> {
    value
        .trim()
        .parse()
        .map_err(|_| ExpenseError::Validation(format!("Invalid expense ID: '{}'", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        let range = parse_range(Some("2024-06-01"), Some("2024-06-30")).unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }

    #[test]
    fn test_parse_range_rejects_bad_input() {
        assert!(parse_range(Some("June"), None).unwrap_err().is_validation());
        assert!(parse_range(Some("2024-07-01"), Some("2024-06-01"))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_parse_expense_id() {
        assert_eq!(
            parse_expense_id(" 1717200000000 ").unwrap(),
            ExpenseId::from_raw(1717200000000)
        );
        assert!(parse_expense_id("abc").unwrap_err().is_validation());
    }
}
