//! Report formatting for terminal output
//!
//! Amount formatting, text bars and the analytics chart.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::reports::{AnalyticsReport, CHART_MAX_HEIGHT};

/// Width of the longest analytics bar, in terminal cells
pub const BAR_WIDTH: usize = 40;

/// Format an amount with the currency symbol and two decimals
pub fn format_amount(amount: f64, currency: &str) -> String {
    format!("{}{:.2}", currency, amount)
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[derive(Tabled)]
struct AnalyticsRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Height")]
    height: String,
}

/// Format an analytics report: totals table followed by a bar chart
pub fn format_analytics(report: &AnalyticsReport, currency: &str) -> String {
    let mut output = format!(
        "Spending by Category: {} to {}\n\n",
        report.start_date.format("%Y-%m-%d"),
        report.end_date.format("%Y-%m-%d")
    );

    if report.is_empty() {
        output.push_str("No data for the selected range.\n");
        return output;
    }

    let rows: Vec<AnalyticsRow> = report
        .bars()
        .into_iter()
        .map(|(t, height)| AnalyticsRow {
            category: t.category.clone(),
            count: t.count,
            total: format_amount(t.total, currency),
            height: format!("{:.0}", height),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(1..), Alignment::right());
    output.push_str(&table.to_string());
    output.push_str("\n\n");

    let label_width = report
        .totals
        .iter()
        .map(|t| t.category.chars().count().min(20))
        .max()
        .unwrap_or(0);

    for (total, height) in report.bars() {
        output.push_str(&format!(
            "{:<width$} {} {}\n",
            truncate(&total.category, 20),
            format_bar(height, CHART_MAX_HEIGHT, BAR_WIDTH),
            format_amount(total.total, currency),
            width = label_width
        ));
    }

    output.push_str(&format!(
        "\nTotal: {}\n",
        format_amount(report.grand_total(), currency)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseId, ExpenseInput};
    use crate::reports::{AnalyticsFilter, DateRange};
    use chrono::NaiveDate;

    fn june() -> AnalyticsFilter {
        AnalyticsFilter::new(DateRange::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        ))
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(12.5, "$"), "$12.50");
        assert_eq!(format_amount(0.0, "€"), "€0.00");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 0.0, 4), "    ");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Entertainment", 3), "...");
        assert_eq!(truncate("Café au lait", 7), "Café...");
    }

    #[test]
    fn test_format_analytics() {
        let expenses = vec![
            Expense::new(
                ExpenseId::from_raw(1),
                ExpenseInput::new(10.0, "Groceries", "", "2024-06-01"),
                "u",
            ),
            Expense::new(
                ExpenseId::from_raw(2),
                ExpenseInput::new(5.0, "Gas", "", "2024-06-02"),
                "u",
            ),
        ];
        let report = AnalyticsReport::generate(&expenses, &june());
        let output = format_analytics(&report, "$");

        assert!(output.contains("2024-06-01 to 2024-06-30"));
        assert!(output.contains("Groceries"));
        assert!(output.contains("$10.00"));
        assert!(output.contains("220"));
        assert!(output.contains("Total: $15.00"));
    }

    #[test]
    fn test_format_empty_analytics() {
        let report = AnalyticsReport::generate(&[], &june());
        assert!(format_analytics(&report, "$").contains("No data"));
    }
}
