use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::{
    handle_audit_command, handle_category_command, handle_expense_command, handle_export_command,
    handle_import_command, handle_report_command, CategoryCommands, ExpenseCommands, ExportArgs,
    ReportCommands,
};
use expense_tracker::config::{paths::ExpensePaths, settings::Settings};
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Personal expense tracker",
    long_about = "Record expenses by category, browse them month by month, \
                  see where the money went, and export the data as JSON or CSV."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Category management commands
    #[command(subcommand, alias = "cat")]
    Category(CategoryCommands),

    /// Spending reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export expenses in a date range to a file
    Export(ExportArgs),

    /// Merge a previous JSON or CSV export
    Import {
        /// Path to a .json or .csv export
        file: PathBuf,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(&paths)?;
    if !settings.audit_enabled {
        storage = storage.without_audit();
    }

    let outcome = storage.load_all()?;
    if outcome.recovered {
        eprintln!("Warning: stored expenses were unreadable; they were moved to quarantine.");
    } else if outcome.quarantined > 0 {
        eprintln!(
            "Warning: {} invalid expense record(s) were moved to quarantine.",
            outcome.quarantined
        );
    }

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, &paths, args)?,
        Some(Commands::Import { file }) => handle_import_command(&storage, &settings, &file)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&storage, limit)?,
        Some(Commands::Init) => {
            println!("Initializing expense tracker at: {}", paths.base_dir().display());
            expense_tracker::storage::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default categories:");
            for label in storage.categories.list()? {
                println!("  - {}", label);
            }
            println!();
            println!("Run 'expenses expense add <amount> <category>' to record an expense.");
        }
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Owner ID:        {}", settings.owner_id);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        None => {
            println!("Expense Tracker - record and analyze your spending");
            println!();
            println!("Run 'expenses --help' for usage information.");
        }
    }

    Ok(())
}
