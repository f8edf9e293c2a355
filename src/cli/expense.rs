//! Expense CLI commands
//!
//! Implements CLI commands for recording, editing and listing expenses.

use chrono::Local;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::expense::{format_expense_details, format_expense_table, format_listing};
use crate::display::report::format_amount;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseInput, DATE_FORMAT};
use crate::reports::sort_by_date_desc;
use crate::services::{CategoryService, ExpensePatch, ExpenseService};
use crate::storage::Storage;

use super::parse_expense_id;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount spent (e.g., "12.50")
        amount: String,
        /// Category label
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text details
        #[arg(short = 'm', long)]
        details: Option<String>,
    },
    /// List expenses, newest first, grouped by month
    List {
        /// Page to show (10 expenses per page)
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Show every expense in one table without grouping
        #[arg(long)]
        flat: bool,
    },
    /// Show expense details
    Show {
        /// Expense ID
        id: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New details
        #[arg(short = 'm', long)]
        details: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage).with_owner(settings.owner_id.clone());
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            details,
        } => {
            let amount = parse_amount(&amount)?;
            let date = date.unwrap_or_else(|| Local::now().date_naive().format(DATE_FORMAT).to_string());

            let expense = service.create(ExpenseInput::new(
                amount,
                category,
                details.unwrap_or_default(),
                date,
            ))?;

            println!(
                "Recorded expense {}: {} in {} on {}",
                expense.id,
                format_amount(expense.amount, currency),
                expense.category,
                expense.date
            );

            if !CategoryService::new(storage).exists(&expense.category)? {
                println!(
                    "Note: '{}' is not a known category. Run 'expenses category add \"{}\"' to add it.",
                    expense.category, expense.category
                );
            }
        }

        ExpenseCommands::List { page, flat } => {
            if flat {
                let expenses = sort_by_date_desc(&service.list()?);
                println!("{}", format_expense_table(&expenses, currency));
            } else {
                print!("{}", format_listing(&service.listing(page)?, currency));
            }
        }

        ExpenseCommands::Show { id } => {
            let id = parse_expense_id(&id)?;
            let expense = service.require(id)?;
            print!("{}", format_expense_details(&expense, currency));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            date,
            details,
        } => {
            let id = parse_expense_id(&id)?;
            let patch = ExpensePatch {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                category,
                details,
                date,
            };

            if patch.is_empty() {
                println!("No changes specified. Use --amount, --category, --date or --details.");
                return Ok(());
            }

            let expense = service.edit(id, patch)?;
            println!("Updated expense {}", expense.id);
            print!("{}", format_expense_details(&expense, currency));
        }

        ExpenseCommands::Delete { id, force } => {
            let id = parse_expense_id(&id)?;
            let expense = service.require(id)?;

            if !force {
                println!("About to delete:");
                print!("{}", format_expense_details(&expense, currency));
                println!();
                println!("To proceed, run again with --force flag:");
                println!("  expenses expense delete {} --force", id);
                return Ok(());
            }

            service.delete(id)?;
            println!("Deleted expense {}", id);
        }
    }

    Ok(())
}

/// Parse an amount argument, leaving range checks to validation
fn parse_amount(value: &str) -> ExpenseResult<f64> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();

    cleaned
        .parse::<f64>()
        .map_err(|_| ExpenseError::Validation(format!("Invalid amount: '{}'", value)))
}
