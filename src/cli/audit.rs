//! CLI command for viewing the audit log

use crate::error::ExpenseResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, limit: usize) -> ExpenseResult<()> {
    let Some(log) = storage.audit_log() else {
        println!("Audit logging is disabled.");
        return Ok(());
    };

    let entries = log.tail(limit)?;
    if entries.is_empty() {
        println!("No audit log entries.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry);
    }

    Ok(())
}
