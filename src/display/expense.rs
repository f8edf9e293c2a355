//! Expense display formatting
//!
//! Month-grouped listing pages, a flat table and a detail view.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Expense;
use crate::reports::ListingPage;

use super::report::{format_amount, truncate};

/// Format a single expense as a listing row
pub fn format_expense_row(expense: &Expense, currency: &str) -> String {
    let details = if expense.details.is_empty() {
        String::new()
    } else {
        format!("  {}", truncate(&expense.details, 30))
    };

    format!(
        "{:>13}  {:10}  {:20} {:>10}{}",
        expense.id,
        truncate(&expense.date, 10),
        truncate(&expense.category, 20),
        format_amount(expense.amount, currency),
        details
    )
}

/// Format one listing page with month headers and navigation hints
pub fn format_listing(page: &ListingPage, currency: &str) -> String {
    if page.total_items == 0 {
        return "No expenses recorded yet.\n\nRun 'expenses expense add <amount> <category>' to add one.\n"
            .to_string();
    }

    let mut output = String::new();

    for group in &page.groups {
        output.push_str(&format!(
            "{} ({})\n",
            group.label,
            format_amount(group.total(), currency)
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for expense in &group.expenses {
            output.push_str(&format_expense_row(expense, currency));
            output.push('\n');
        }
        output.push('\n');
    }

    if !page.undated.is_empty() {
        output.push_str("Invalid date\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for expense in &page.undated {
            output.push_str(&format_expense_row(expense, currency));
            output.push('\n');
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "Page {} of {} ({} expenses)",
        page.number, page.page_count, page.total_items
    ));
    if page.has_prev() {
        output.push_str(&format!("  prev: --page {}", page.number - 1));
    }
    if page.has_next() {
        output.push_str(&format!("  next: --page {}", page.number + 1));
    }
    output.push('\n');

    output
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Details")]
    details: String,
}

/// Format expenses as a flat table
pub fn format_expense_table(expenses: &[Expense], currency: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: e.date.clone(),
        category: e.category.clone(),
        amount: format_amount(e.amount, currency),
        details: truncate(&e.details, 40),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:  {}\n", expense.id));
    output.push_str(&format!("Date:     {}", expense.date));
    match expense.month_label() {
        Some(month) => output.push_str(&format!(" ({})\n", month)),
        None => output.push_str(" (invalid date)\n"),
    }
    output.push_str(&format!(
        "Amount:   {}\n",
        format_amount(expense.amount, currency)
    ));
    output.push_str(&format!("Category: {}\n", expense.category));

    if !expense.details.is_empty() {
        output.push_str(&format!("Details:  {}\n", expense.details));
    }

    output.push_str(&format!("Owner:    {}\n", expense.user_id));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, ExpenseInput};

    fn expense(id: i64, date: &str, details: &str) -> Expense {
        Expense::new(
            ExpenseId::from_raw(id),
            ExpenseInput::new(12.5, "Groceries", details, date),
            "u",
        )
    }

    #[test]
    fn test_empty_listing() {
        let page = ListingPage::build(&[], 1);
        assert!(format_listing(&page, "$").starts_with("No expenses recorded yet."));
    }

    #[test]
    fn test_listing_groups_and_navigation() {
        let expenses: Vec<Expense> = (0..12)
            .map(|i| expense(i, &format!("2024-06-{:02}", i + 1), ""))
            .chain(std::iter::once(expense(99, "someday", "")))
            .collect();

        let first = format_listing(&ListingPage::build(&expenses, 1), "$");
        assert!(first.contains("June 2024"));
        assert!(first.contains("Page 1 of 2 (13 expenses)"));
        assert!(first.contains("next: --page 2"));
        assert!(!first.contains("prev:"));

        let second = format_listing(&ListingPage::build(&expenses, 2), "$");
        assert!(second.contains("Invalid date"));
        assert!(second.contains("prev: --page 1"));
    }

    #[test]
    fn test_details() {
        let output = format_expense_details(&expense(7, "2024-06-01", "Weekly shop"), "$");

        assert!(output.contains("Expense:  7"));
        assert!(output.contains("(June 2024)"));
        assert!(output.contains("$12.50"));
        assert!(output.contains("Details:  Weekly shop"));
    }

    #[test]
    fn test_details_invalid_date() {
        let output = format_expense_details(&expense(7, "nope", ""), "$");
        assert!(output.contains("(invalid date)"));
        assert!(!output.contains("Details:"));
    }

    #[test]
    fn test_table() {
        let output = format_expense_table(&[expense(1, "2024-06-01", "x")], "$");
        assert!(output.contains("Groceries"));
        assert!(output.contains("$12.50"));
    }
}
