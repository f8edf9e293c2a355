//! Field-level changes between two versions of an expense

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Expense;

/// Longest value kept in a change record, in characters
const MAX_VALUE_CHARS: usize = 40;

/// One edited field with its old and new rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub from: String,
    pub to: String,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.field, self.from, self.to)
    }
}

/// Editable fields that differ between `before` and `after`
///
/// The identifier and owner never change on edit and are not compared.
pub fn diff_expenses(before: &Expense, after: &Expense) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    if before.amount != after.amount {
        changes.push(change("amount", before.amount, after.amount));
    }
    if before.category != after.category {
        changes.push(change("category", &before.category, &after.category));
    }
    if before.details != after.details {
        changes.push(change("details", &before.details, &after.details));
    }
    if before.date != after.date {
        changes.push(change("date", &before.date, &after.date));
    }

    changes
}

fn change(field: &str, from: impl fmt::Display, to: impl fmt::Display) -> FieldChange {
    FieldChange {
        field: field.to_string(),
        from: clip(&from.to_string()),
        to: clip(&to.to_string()),
    }
}

fn clip(value: &str) -> String {
    if value.is_empty() {
        return "(empty)".to_string();
    }
    if value.chars().count() <= MAX_VALUE_CHARS {
        return value.to_string();
    }
    let head: String = value.chars().take(MAX_VALUE_CHARS - 3).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, ExpenseInput};

    fn expense(amount: f64, category: &str, details: &str) -> Expense {
        Expense::new(
            ExpenseId::from_raw(1),
            ExpenseInput::new(amount, category, details, "2024-06-01"),
            "u",
        )
    }

    #[test]
    fn test_only_changed_fields_reported() {
        let before = expense(10.5, "Gas", "");
        let after = expense(12.0, "Gas", "");

        let changes = diff_expenses(&before, &after);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].to_string(), "amount: 10.5 -> 12");
    }

    #[test]
    fn test_empty_details_rendered() {
        let before = expense(1.0, "Gas", "");
        let after = expense(1.0, "Transport", "Bus pass");

        let rendered: Vec<String> = diff_expenses(&before, &after)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            rendered,
            vec!["category: Gas -> Transport", "details: (empty) -> Bus pass"]
        );
    }

    #[test]
    fn test_no_changes() {
        let e = expense(1.0, "Gas", "x");
        assert!(diff_expenses(&e, &e).is_empty());
    }

    #[test]
    fn test_long_multibyte_value_clipped() {
        let before = expense(1.0, "Gas", &"é".repeat(100));
        let after = expense(1.0, "Gas", "short");

        let changes = diff_expenses(&before, &after);
        assert!(changes[0].from.ends_with("..."));
        assert_eq!(changes[0].from.chars().count(), MAX_VALUE_CHARS);
    }
}
