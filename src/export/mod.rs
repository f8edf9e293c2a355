//! Export module for the expense tracker
//!
//! Two formats, both computed from an inclusive date range:
//! - JSON: expenses plus the category list, pretty-printed
//! - CSV: one row per expense, spreadsheet-compatible
//!
//! Output is deterministic for a given data set and timestamp.

pub mod csv;
pub mod json;

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;
use crate::reports::DateRange;
use crate::storage::file_io::write_text_atomic;

pub use self::csv::{escape_details, export_csv, render_csv, CSV_HEADER};
pub use self::json::{export_json, render_json, ExportDocument};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON document with expenses and categories
    Json,
    /// CSV rows (expenses only)
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension().to_uppercase())
    }
}

/// Expenses inside `range`, or `NoData` when nothing matches
pub fn select_expenses(expenses: &[Expense], range: &DateRange) -> ExpenseResult<Vec<Expense>> {
    let selected: Vec<Expense> = range.filter(expenses).into_iter().cloned().collect();
    if selected.is_empty() {
        return Err(ExpenseError::NoData);
    }
    Ok(selected)
}

/// `expenses-<timestamp>.<ext>`
pub fn export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("expenses-{}.{}", timestamp_ms, format.extension())
}

/// Render an export payload as text
pub fn render(
    format: ExportFormat,
    expenses: &[Expense],
    categories: &[String],
) -> ExpenseResult<String> {
    match format {
        ExportFormat::Json => render_json(expenses, categories),
        ExportFormat::Csv => Ok(render_csv(expenses)),
    }
}

/// A finished export written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub expense_count: usize,
}

/// Filter, render and write an export into `dir`
pub fn write_export(
    dir: &Path,
    format: ExportFormat,
    expenses: &[Expense],
    categories: &[String],
    range: &DateRange,
    timestamp_ms: i64,
) -> ExpenseResult<ExportArtifact> {
    let selected = select_expenses(expenses, range)?;
    let text = render(format, &selected, categories)?;

    let path = dir.join(export_file_name(format, timestamp_ms));
    write_text_atomic(&path, &text)
        .map_err(|e| ExpenseError::Export(format!("Failed to write {}: {}", path.display(), e)))?;

    tracing::info!(path = %path.display(), count = selected.len(), "export written");

    Ok(ExportArtifact {
        path,
        format,
        expense_count: selected.len(),
    })
}
