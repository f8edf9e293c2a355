//! JSON export
//!
//! `{ "expenses": [...], "categories": [...] }`, pretty-printed. The same
//! document shape is accepted back by import.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

/// Export document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub expenses: Vec<Expense>,

    #[serde(default)]
    pub categories: Vec<String>,
}

impl ExportDocument {
    pub fn new(expenses: &[Expense], categories: &[String]) -> Self {
        Self {
            expenses: expenses.to_vec(),
            categories: categories.to_vec(),
        }
    }

    /// Parse a previously exported document
    pub fn parse(text: &str) -> ExpenseResult<Self> {
        serde_json::from_str(text).map_err(|e| ExpenseError::Import(e.to_string()))
    }
}

/// Render the export document as pretty JSON
pub fn render_json(expenses: &[Expense], categories: &[String]) -> ExpenseResult<String> {
    serde_json::to_string_pretty(&ExportDocument::new(expenses, categories))
        .map_err(|e| ExpenseError::Export(e.to_string()))
}

/// Write the export document as pretty JSON
pub fn export_json<W: Write>(
    expenses: &[Expense],
    categories: &[String],
    writer: &mut W,
) -> ExpenseResult<()> {
    serde_json::to_writer_pretty(writer, &ExportDocument::new(expenses, categories))
        .map_err(|e| ExpenseError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, ExpenseInput};
    use serde_json::Value;

    fn expense() -> Expense {
        Expense::new(
            ExpenseId::from_raw(1717200000000),
            ExpenseInput::new(12.5, "Groceries", "Weekly", "2024-06-01"),
            "user_placeholder_01",
        )
    }

    #[test]
    fn test_document_shape() {
        let text = render_json(&[expense()], &["Groceries".to_string()]).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["categories"], serde_json::json!(["Groceries"]));
        let first = &value["expenses"][0];
        assert_eq!(first["id"], 1717200000000i64);
        assert_eq!(first["amount"], 12.5);
        assert_eq!(first["category"], "Groceries");
        assert_eq!(first["details"], "Weekly");
        assert_eq!(first["date"], "2024-06-01");
        assert_eq!(first["user_id"], "user_placeholder_01");
    }

    #[test]
    fn test_pretty_printed() {
        let text = render_json(&[expense()], &[]).unwrap();
        assert!(text.contains("\n  \"expenses\": ["));
    }

    #[test]
    fn test_writer_matches_render() {
        let mut out = Vec::new();
        export_json(&[expense()], &["A".to_string()], &mut out).unwrap();

        let rendered = render_json(&[expense()], &["A".to_string()]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), rendered);
    }

    #[test]
    fn test_parse_back() {
        let text = render_json(&[expense()], &["Groceries".to_string()]).unwrap();
        let doc = ExportDocument::parse(&text).unwrap();

        assert_eq!(doc.expenses, vec![expense()]);
        assert!(ExportDocument::parse("[]").is_err());
    }
}
