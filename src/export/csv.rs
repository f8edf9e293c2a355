//! CSV export
//!
//! Fixed column order `id,amount,category,details,date`. Only `details` is
//! quoted; embedded quotes are doubled. Rows are joined by `\n` with no
//! trailing newline.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

/// Header row
pub const CSV_HEADER: &str = "id,amount,category,details,date";

/// Render expenses as CSV text
pub fn render_csv(expenses: &[Expense]) -> String {
    let mut rows = Vec::with_capacity(expenses.len() + 1);
    rows.push(CSV_HEADER.to_string());

    for expense in expenses {
        rows.push(format!(
            "{},{},{},{},{}",
            expense.id,
            expense.amount,
            expense.category,
            escape_details(&expense.details),
            expense.date
        ));
    }

    rows.join("\n")
}

/// Write expenses as CSV
pub fn export_csv<W: Write>(expenses: &[Expense], writer: &mut W) -> ExpenseResult<()> {
    writer
        .write_all(render_csv(expenses).as_bytes())
        .map_err(|e| ExpenseError::Export(e.to_string()))
}

/// Quote a details field, doubling any embedded quotes
pub fn escape_details(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, ExpenseInput};

    fn expense(id: i64, amount: f64, details: &str) -> Expense {
        Expense::new(
            ExpenseId::from_raw(id),
            ExpenseInput::new(amount, "Eating out", details, "2024-06-01"),
            "u",
        )
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape_details(r#"He said "hi""#), r#""He said ""hi""""#);
        assert_eq!(escape_details(""), r#""""#);
        assert_eq!(escape_details("a, b"), r#""a, b""#);
    }

    #[test]
    fn test_render_csv() {
        let expenses = vec![
            expense(1717200000000, 12.5, r#"He said "hi""#),
            expense(1717200000001, 10.0, ""),
        ];

        let csv = render_csv(&expenses);
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            r#"1717200000000,12.5,Eating out,"He said ""hi""",2024-06-01"#
        );
        assert_eq!(lines[2], r#"1717200000001,10,Eating out,"",2024-06-01"#);
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_header_only_for_empty_input() {
        assert_eq!(render_csv(&[]), CSV_HEADER);
    }

    #[test]
    fn test_export_csv_writer() {
        let mut out = Vec::new();
        export_csv(&[expense(1, 3.0, "x")], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("id,amount,category,details,date\n"));
        assert!(text.contains(r#"1,3,Eating out,"x",2024-06-01"#));
    }
}
