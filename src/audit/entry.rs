//! Audit log records
//!
//! A record names what changed (an expense by ID, or a category label) and
//! keeps typed snapshots of the expense on either side of the change.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Expense, ExpenseId};

use super::diff::{diff_expenses, FieldChange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Added,
    Edited,
    Removed,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Action::Added => "added",
            Action::Edited => "edited",
            Action::Removed => "removed",
        };
        f.write_str(word)
    }
}

/// The record a change applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "key", rename_all = "lowercase")]
pub enum Subject {
    Expense(ExpenseId),
    Category(String),
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Expense(id) => write!(f, "expense #{}", id),
            Subject::Category(label) => write!(f, "category \"{}\"", label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    pub action: Action,
    pub subject: Subject,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Expense>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Expense>,

    /// Edited fields, only for expense edits
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<FieldChange>,
}

impl AuditEntry {
    fn new(action: Action, subject: Subject) -> Self {
        Self {
            at: Utc::now(),
            action,
            subject,
            before: None,
            after: None,
            changes: Vec::new(),
        }
    }

    pub fn expense_added(expense: &Expense) -> Self {
        Self {
            after: Some(expense.clone()),
            ..Self::new(Action::Added, Subject::Expense(expense.id))
        }
    }

    pub fn expense_edited(before: &Expense, after: &Expense) -> Self {
        Self {
            changes: diff_expenses(before, after),
            before: Some(before.clone()),
            after: Some(after.clone()),
            ..Self::new(Action::Edited, Subject::Expense(after.id))
        }
    }

    pub fn expense_removed(expense: &Expense) -> Self {
        Self {
            before: Some(expense.clone()),
            ..Self::new(Action::Removed, Subject::Expense(expense.id))
        }
    }

    pub fn category_added(label: &str) -> Self {
        Self::new(Action::Added, Subject::Category(label.to_string()))
    }

    pub fn category_removed(label: &str) -> Self {
        Self::new(Action::Removed, Subject::Category(label.to_string()))
    }
}

/// One line per record, with the edited fields indented below an edit
impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}",
            self.at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.action,
            self.subject
        )?;

        if let Some(expense) = self.after.as_ref().or(self.before.as_ref()) {
            write!(f, ": {}", expense)?;
        }

        for change in &self.changes {
            write!(f, "\n  {}", change)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseInput;

    fn expense(amount: f64, category: &str) -> Expense {
        Expense::new(
            ExpenseId::from_raw(42),
            ExpenseInput::new(amount, category, "", "2024-06-01"),
            "u",
        )
    }

    #[test]
    fn test_expense_added() {
        let entry = AuditEntry::expense_added(&expense(12.5, "Groceries"));

        assert_eq!(entry.action, Action::Added);
        assert_eq!(entry.subject, Subject::Expense(ExpenseId::from_raw(42)));
        assert!(entry.before.is_none());
        assert_eq!(entry.after.as_ref().map(|e| e.amount), Some(12.5));
    }

    #[test]
    fn test_expense_edited_records_changes() {
        let entry = AuditEntry::expense_edited(&expense(1.0, "Gas"), &expense(2.0, "Gas"));

        assert_eq!(entry.changes.len(), 1);
        assert_eq!(entry.changes[0].field, "amount");
    }

    #[test]
    fn test_subject_serialization() {
        let entry = AuditEntry::category_removed("Gifts");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""subject":{"kind":"category","key":"Gifts"}"#));
        assert!(!json.contains("before"));

        let json = serde_json::to_string(&AuditEntry::expense_removed(&expense(1.0, "Gas"))).unwrap();
        assert!(json.contains(r#""subject":{"kind":"expense","key":42}"#));

        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.subject, Subject::Expense(ExpenseId::from_raw(42)));
        assert_eq!(back.before.map(|e| e.category), Some("Gas".to_string()));
    }

    #[test]
    fn test_display() {
        let entry = AuditEntry::expense_edited(&expense(1.0, "Gas"), &expense(2.0, "Gas"));
        let text = entry.to_string();

        assert!(text.contains("edited expense #42: 2024-06-01 2.00 (Gas)"));
        assert!(text.ends_with("\n  amount: 1 -> 2"));

        let text = AuditEntry::category_added("Books").to_string();
        assert!(text.ends_with("added category \"Books\""));
    }
}
