//! Import service
//!
//! Merges a previous JSON or CSV export back into storage. Every row is
//! validated like a new expense; rows whose ID is already stored (or that
//! repeat an earlier row) are skipped, and labels the registry does not
//! know yet are added.

use std::collections::HashSet;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde_json::Value;

use crate::audit::AuditEntry;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::ExportFormat;
use crate::models::{Expense, ExpenseId, ExpenseInput, DEFAULT_OWNER_ID};
use crate::services::CategoryService;
use crate::storage::Storage;

/// Rows read from an import file, before duplicate checking
#[derive(Debug, Clone, Default)]
pub struct ParsedImport {
    /// 1-based row number and the parsed expense or the reason it was rejected
    pub rows: Vec<(usize, Result<Expense, String>)>,
    /// Category labels listed by the file itself (JSON only)
    pub categories: Vec<String>,
}

/// Status of a row for import preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    /// Row will be imported
    New,
    /// ID already present, row will be skipped
    Duplicate,
    /// Row failed validation
    Error(String),
}

/// Preview entry for import review
#[derive(Debug, Clone)]
pub struct ImportPreviewEntry {
    pub row_number: usize,
    pub expense: Option<Expense>,
    pub status: ImportStatus,
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub duplicates_skipped: usize,
    pub errors: usize,
    /// Labels added to the registry
    pub categories_added: Vec<String>,
    /// Error messages by row
    pub error_messages: Vec<(usize, String)>,
}

/// Column positions in a CSV export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMapping {
    id: usize,
    amount: usize,
    category: usize,
    details: Option<usize>,
    date: usize,
}

impl ColumnMapping {
    fn from_headers(headers: &StringRecord) -> ExpenseResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name)
                .ok_or_else(|| ExpenseError::Import(format!("Missing '{}' column", name)))
        };

        Ok(Self {
            id: require("id")?,
            amount: require("amount")?,
            category: require("category")?,
            details: find("details"),
            date: require("date")?,
        })
    }

    /// Undo the split of an unquoted category that contains commas
    ///
    /// A row wider than the header has its surplus fields folded back into
    /// the category column.
    fn rejoin_category(&self, record: &StringRecord, width: usize) -> StringRecord {
        let extra = record.len().saturating_sub(width);
        if extra == 0 || self.category >= width {
            return record.clone();
        }

        let fields: Vec<&str> = record.iter().collect();
        let end = self.category + extra;

        let mut rejoined = StringRecord::with_capacity(record.as_slice().len(), width);
        for field in &fields[..self.category] {
            rejoined.push_field(field);
        }
        rejoined.push_field(&fields[self.category..=end].join(","));
        for field in &fields[end + 1..] {
            rejoined.push_field(field);
        }
        rejoined
    }
}

/// Service for importing exports
pub struct ImportService<'a> {
    storage: &'a Storage,
    owner: String,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            owner: DEFAULT_OWNER_ID.to_string(),
        }
    }

    /// Owner stamped on CSV rows, which carry no owner column
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Read and parse a file, choosing the format by extension
    pub fn read_file(&self, path: &Path) -> ExpenseResult<ParsedImport> {
        let format = ExportFormat::from_path(path).ok_or_else(|| {
            ExpenseError::Import(format!(
                "Unsupported file type: {} (expected .json or .csv)",
                path.display()
            ))
        })?;

        let content = std::fs::read_to_string(path)
            .map_err(|e| ExpenseError::Import(format!("Failed to read file: {}", e)))?;

        match format {
            ExportFormat::Json => self.parse_json(&content),
            ExportFormat::Csv => self.parse_csv(&content),
        }
    }

    /// Parse a JSON export document, or a bare expense array
    pub fn parse_json(&self, text: &str) -> ExpenseResult<ParsedImport> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| ExpenseError::Import(e.to_string()))?;

        let (items, categories) = match value {
            Value::Array(items) => (items, Vec::new()),
            Value::Object(mut doc) => {
                let items = match doc.remove("expenses") {
                    Some(Value::Array(items)) => items,
                    _ => {
                        return Err(ExpenseError::Import(
                            "Document has no 'expenses' array".into(),
                        ))
                    }
                };
                let categories = match doc.remove("categories") {
                    Some(Value::Array(labels)) => labels
                        .into_iter()
                        .filter_map(|l| match l {
                            Value::String(s) => Some(s),
                            _ => None,
                        })
                        .collect(),
                    _ => Vec::new(),
                };
                (items, categories)
            }
            _ => {
                return Err(ExpenseError::Import(
                    "Expected an export document or an expense array".into(),
                ))
            }
        };

        let rows = items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                let parsed = serde_json::from_value::<Expense>(item)
                    .map_err(|e| format!("Invalid record: {}", e))
                    .and_then(validate_record);
                (idx + 1, parsed)
            })
            .collect();

        Ok(ParsedImport { rows, categories })
    }

    /// Parse a CSV export
    pub fn parse_csv(&self, text: &str) -> ExpenseResult<ParsedImport> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let mapping = ColumnMapping::from_headers(&headers)?;

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let parsed = match result {
                Ok(record) => {
                    let record = mapping.rejoin_category(&record, headers.len());
                    self.parse_record(&record, &mapping)
                }
                Err(e) => Err(format!("Error reading CSV record: {}", e)),
            };
            rows.push((idx + 1, parsed));
        }

        Ok(ParsedImport {
            rows,
            categories: Vec::new(),
        })
    }

    fn parse_record(&self, record: &StringRecord, mapping: &ColumnMapping) -> Result<Expense, String> {
        let field = |idx: usize, name: &str| {
            record
                .get(idx)
                .map(str::trim)
                .ok_or_else(|| format!("Missing {} column", name))
        };

        let id = field(mapping.id, "id")?;
        let id: ExpenseId = id
            .parse()
            .map_err(|_| format!("Could not parse id: '{}'", id))?;

        let amount = field(mapping.amount, "amount")?;
        let amount: f64 = amount
            .parse()
            .map_err(|_| format!("Could not parse amount: '{}'", amount))?;

        let details = mapping
            .details
            .and_then(|idx| record.get(idx))
            .unwrap_or_default();

        let input = ExpenseInput::new(
            amount,
            field(mapping.category, "category")?,
            details,
            field(mapping.date, "date")?,
        );

        validate_record(Expense::new(id, input, self.owner.clone()))
    }

    /// Mark each row as new, duplicate or error
    pub fn generate_preview(&self, parsed: &ParsedImport) -> ExpenseResult<Vec<ImportPreviewEntry>> {
        let mut seen: HashSet<ExpenseId> = self
            .storage
            .expenses
            .get_all()?
            .iter()
            .map(|e| e.id)
            .collect();

        let preview = parsed
            .rows
            .iter()
            .map(|(row_number, row)| match row {
                Ok(expense) => ImportPreviewEntry {
                    row_number: *row_number,
                    expense: Some(expense.clone()),
                    status: if seen.insert(expense.id) {
                        ImportStatus::New
                    } else {
                        ImportStatus::Duplicate
                    },
                },
                Err(e) => ImportPreviewEntry {
                    row_number: *row_number,
                    expense: None,
                    status: ImportStatus::Error(e.clone()),
                },
            })
            .collect();

        Ok(preview)
    }

    /// Store the new rows of a preview, then register unknown categories
    ///
    /// Nothing is registered when the expenses cannot be written.
    pub fn import_from_preview(
        &self,
        preview: &[ImportPreviewEntry],
        categories: &[String],
    ) -> ExpenseResult<ImportResult> {
        let mut result = ImportResult::default();
        let mut new_expenses = Vec::new();

        for entry in preview {
            match (&entry.status, &entry.expense) {
                (ImportStatus::New, Some(expense)) => new_expenses.push(expense.clone()),
                (ImportStatus::New, None) => {}
                (ImportStatus::Duplicate, _) => result.duplicates_skipped += 1,
                (ImportStatus::Error(e), _) => {
                    result.errors += 1;
                    result.error_messages.push((entry.row_number, e.clone()));
                }
            }
        }

        result.imported = self.storage.expenses.insert_existing(new_expenses.clone())?;

        let category_service = CategoryService::new(self.storage);
        let labels = categories
            .iter()
            .chain(new_expenses.iter().map(|e| &e.category));
        for label in labels {
            match category_service.ensure(label) {
                Ok(true) => result.categories_added.push(label.trim().to_string()),
                Ok(false) => {}
                // Expenses need not reference a registered label
                Err(e) => {
                    tracing::warn!(category = %label, error = %e, "skipping imported category")
                }
            }
        }

        for expense in &new_expenses {
            self.storage.record(|| AuditEntry::expense_added(expense));
        }
        tracing::info!(
            imported = result.imported,
            skipped = result.duplicates_skipped,
            errors = result.errors,
            "import finished"
        );

        Ok(result)
    }

    /// Parse, preview and import a file in one step
    pub fn import_file(&self, path: &Path) -> ExpenseResult<ImportResult> {
        let parsed = self.read_file(path)?;
        let preview = self.generate_preview(&parsed)?;
        self.import_from_preview(&preview, &parsed.categories)
    }
}

/// Apply the same checks as a new expense
fn validate_record(expense: Expense) -> Result<Expense, String> {
    ExpenseInput::new(
        expense.amount,
        expense.category.as_str(),
        expense.details.as_str(),
        expense.date.as_str(),
    )
    .validate()
    .map_err(|e| e.to_string())?;
    Ok(expense)
}
