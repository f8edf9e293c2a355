//! Date-range filtering shared by analytics and export

use chrono::{Datelike, Local, NaiveDate};

use crate::models::Expense;

/// Inclusive calendar-date range
///
/// Both ends are whole days: an expense dated on `end` is included, which
/// is the same as extending `end` to 23:59:59.999.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First day of `today`'s month through `today`
    pub fn month_to_date(today: NaiveDate) -> Self {
        let start = today.with_day(1).unwrap_or(today);
        Self { start, end: today }
    }

    /// Month-to-date range for the local clock
    pub fn current_month() -> Self {
        Self::month_to_date(Local::now().date_naive())
    }

    /// Build a range from optional ends, defaulting to month-to-date
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let default = Self::current_month();
        Self {
            start: start.unwrap_or(default.start),
            end: end.unwrap_or(default.end),
        }
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Whether an expense falls in the range; unparseable dates never do
    pub fn contains(&self, expense: &Expense) -> bool {
        expense
            .parsed_date()
            .is_some_and(|date| self.contains_date(date))
    }

    /// Expenses inside the range, in their original order
    pub fn filter<'a>(&self, expenses: &'a [Expense]) -> Vec<&'a Expense> {
        expenses.iter().filter(|e| self.contains(e)).collect()
    }
}
