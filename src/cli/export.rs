//! CLI command for data export

use std::path::PathBuf;

use chrono::Utc;
use clap::Args;

use crate::config::paths::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::ExportFormat;
use crate::services::ExpenseService;
use crate::storage::Storage;

use super::parse_range;

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// Start date (YYYY-MM-DD), defaults to the first of this month
    #[arg(short, long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD, inclusive), defaults to today
    #[arg(short, long)]
    pub to: Option<String>,

    /// Directory to write into, defaults to the exports directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    paths: &ExpensePaths,
    args: ExportArgs,
) -> ExpenseResult<()> {
    let range = parse_range(args.from.as_deref(), args.to.as_deref())?;
    let dir = args.output_dir.unwrap_or_else(|| paths.export_dir());

    let service = ExpenseService::new(storage);
    match service.export(&dir, args.format, &range, Utc::now().timestamp_millis()) {
        Ok(artifact) => {
            println!(
                "Exported {} expenses ({}) to: {}",
                artifact.expense_count,
                artifact.format,
                artifact.path.display()
            );
            Ok(())
        }
        Err(ExpenseError::NoData) => {
            println!(
                "Warning: no expenses between {} and {}. Nothing was exported.",
                range.start, range.end
            );
            Ok(())
        }
        Err(e) => Err(e),
    }
}
