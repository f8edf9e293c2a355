//! CLI command handler for import
//!
//! Merges a previous JSON or CSV export back into storage.

use std::path::Path;

use crate::config::settings::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::{ImportService, ImportStatus};
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(storage: &Storage, settings: &Settings, file: &Path) -> ExpenseResult<()> {
    if !file.exists() {
        return Err(ExpenseError::Import(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let service = ImportService::new(storage).with_owner(settings.owner_id.clone());
    let parsed = service.read_file(file)?;

    if parsed.rows.is_empty() {
        println!("No expenses found in {}.", file.display());
        return Ok(());
    }

    let preview = service.generate_preview(&parsed)?;

    let new_count = preview.iter().filter(|e| e.status == ImportStatus::New).count();
    let dup_count = preview
        .iter()
        .filter(|e| e.status == ImportStatus::Duplicate)
        .count();
    let err_count = preview
        .iter()
        .filter(|e| matches!(e.status, ImportStatus::Error(_)))
        .count();

    println!("Import Preview for '{}'", file.display());
    println!("{}", "=".repeat(40));
    println!("  New expenses:       {}", new_count);
    println!("  Duplicates (skip):  {}", dup_count);
    println!("  Errors:             {}", err_count);
    println!();

    let result = service.import_from_preview(&preview, &parsed.categories)?;

    println!("Import Complete!");
    println!("  Imported:    {}", result.imported);
    println!("  Skipped:     {}", result.duplicates_skipped);
    if !result.categories_added.is_empty() {
        println!("  New categories: {}", result.categories_added.join(", "));
    }
    if !result.error_messages.is_empty() {
        println!("  Errors:      {}", result.errors);
        for (row, msg) in &result.error_messages {
            println!("    Row {}: {}", row, msg);
        }
    }

    Ok(())
}
