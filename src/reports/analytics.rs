//! Spending analytics
//!
//! Sums expense amounts per category over a date range and scales each
//! total into a bar height for charting.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::Expense;

use super::filter::DateRange;

/// Height of the tallest bar
pub const CHART_MAX_HEIGHT: f64 = 220.0;

/// Date range plus an optional category filter (empty means all)
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsFilter {
    pub range: DateRange,
    pub categories: Vec<String>,
}

impl AnalyticsFilter {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            categories: Vec::new(),
        }
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Add the category if absent, remove it if present
    pub fn toggle_category(&mut self, category: &str) {
        match self.categories.iter().position(|c| c == category) {
            Some(i) => {
                self.categories.remove(i);
            }
            None => self.categories.push(category.to_string()),
        }
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        self.range.contains(expense)
            && (self.categories.is_empty() || self.categories.contains(&expense.category))
    }
}

/// Total spending in one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

/// Per-category totals sorted by total descending
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub totals: Vec<CategoryTotal>,
}

impl AnalyticsReport {
    /// Aggregate the expenses matching `filter`
    ///
    /// Ties in total keep the order in which the categories were first seen.
    pub fn generate(expenses: &[Expense], filter: &AnalyticsFilter) -> Self {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for expense in expenses.iter().filter(|e| filter.matches(e)) {
            match index.get(expense.category.as_str()) {
                Some(&i) => {
                    totals[i].total += expense.amount;
                    totals[i].count += 1;
                }
                None => {
                    index.insert(expense.category.as_str(), totals.len());
                    totals.push(CategoryTotal {
                        category: expense.category.clone(),
                        total: expense.amount,
                        count: 1,
                    });
                }
            }
        }

        totals.sort_by(|a, b| b.total.total_cmp(&a.total));

        Self {
            start_date: filter.range.start,
            end_date: filter.range.end,
            totals,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Largest category total, 0 when there is no data
    pub fn max_total(&self) -> f64 {
        self.totals.iter().map(|t| t.total).fold(0.0, f64::max)
    }

    pub fn grand_total(&self) -> f64 {
        self.totals.iter().map(|t| t.total).sum()
    }

    /// Bar height proportional to the largest total
    pub fn bar_height(&self, total: f64) -> f64 {
        let max = self.max_total();
        if max > 0.0 {
            total / max * CHART_MAX_HEIGHT
        } else {
            0.0
        }
    }

    /// Each category paired with its bar height
    pub fn bars(&self) -> Vec<(&CategoryTotal, f64)> {
        self.totals
            .iter()
            .map(|t| (t, self.bar_height(t.total)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, ExpenseInput};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(id: i64, category: &str, amount: f64, date: &str) -> Expense {
        Expense::new(
            ExpenseId::from_raw(id),
            ExpenseInput::new(amount, category, "", date),
            "u",
        )
    }

    fn june() -> AnalyticsFilter {
        AnalyticsFilter::new(DateRange::new(date(2024, 6, 1), date(2024, 6, 30)))
    }

    fn pairs(report: &AnalyticsReport) -> Vec<(&str, f64)> {
        report
            .totals
            .iter()
            .map(|t| (t.category.as_str(), t.total))
            .collect()
    }

    #[test]
    fn test_totals_in_range_sorted_descending() {
        let expenses = vec![
            expense(1, "A", 10.0, "2024-06-01"),
            expense(2, "B", 5.0, "2024-06-02"),
            expense(3, "A", 3.0, "2024-07-01"),
        ];

        let report = AnalyticsReport::generate(&expenses, &june());

        assert_eq!(pairs(&report), vec![("A", 10.0), ("B", 5.0)]);
        assert_eq!(report.totals[0].count, 1);
    }

    #[test]
    fn test_category_filter() {
        let expenses = vec![
            expense(1, "A", 10.0, "2024-06-01"),
            expense(2, "B", 5.0, "2024-06-02"),
            expense(3, "C", 7.0, "2024-06-03"),
        ];

        let filter = june().with_categories(vec!["B".into(), "C".into()]);
        let report = AnalyticsReport::generate(&expenses, &filter);

        assert_eq!(pairs(&report), vec![("C", 7.0), ("B", 5.0)]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let expenses = vec![
            expense(1, "Z", 5.0, "2024-06-01"),
            expense(2, "A", 5.0, "2024-06-02"),
            expense(3, "M", 9.0, "2024-06-03"),
        ];

        let report = AnalyticsReport::generate(&expenses, &june());
        assert_eq!(pairs(&report), vec![("M", 9.0), ("Z", 5.0), ("A", 5.0)]);
    }

    #[test]
    fn test_invalid_dates_and_end_day_inclusive() {
        let expenses = vec![
            expense(1, "A", 1.0, "2024-06-30"),
            expense(2, "A", 1.0, "not-a-date"),
        ];

        let report = AnalyticsReport::generate(&expenses, &june());
        assert_eq!(pairs(&report), vec![("A", 1.0)]);
    }

    #[test]
    fn test_bar_heights() {
        let expenses = vec![
            expense(1, "A", 10.0, "2024-06-01"),
            expense(2, "B", 5.0, "2024-06-02"),
        ];

        let report = AnalyticsReport::generate(&expenses, &june());
        let heights: Vec<f64> = report.bars().into_iter().map(|(_, h)| h).collect();

        assert_eq!(report.max_total(), 10.0);
        assert_eq!(heights, vec![220.0, 110.0]);
        assert_eq!(report.grand_total(), 15.0);
    }

    #[test]
    fn test_empty_report() {
        let report = AnalyticsReport::generate(&[], &june());

        assert!(report.is_empty());
        assert_eq!(report.max_total(), 0.0);
        assert_eq!(report.bar_height(5.0), 0.0);
    }

    #[test]
    fn test_toggle_category() {
        let mut filter = june();
        filter.toggle_category("A");
        filter.toggle_category("B");
        filter.toggle_category("A");
        assert_eq!(filter.categories, vec!["B"]);
    }
}
