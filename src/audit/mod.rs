//! Audit logging
//!
//! Every persisted expense add/edit/remove and category add/remove is
//! appended to a JSONL file. Expense records carry typed before/after
//! snapshots; edits also list the fields that changed.

mod diff;
mod entry;
mod logger;

pub use diff::{diff_expenses, FieldChange};
pub use entry::{Action, AuditEntry, Subject};
pub use logger::AuditLog;
