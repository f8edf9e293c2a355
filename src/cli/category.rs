//! Category CLI commands
//!
//! Implements CLI commands for category label management.

use clap::Subcommand;

use crate::display::category::format_category_list;
use crate::error::ExpenseResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Add a new category
    Add {
        /// Category label
        label: String,
    },

    /// Delete a category (expenses keep their label)
    Delete {
        /// Category label
        label: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> ExpenseResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let labels = service
                .list()?
                .into_iter()
                .map(|label| {
                    let usage = service.usage_count(&label)?;
                    Ok((label, usage))
                })
                .collect::<ExpenseResult<Vec<_>>>()?;
            println!("{}", format_category_list(&labels));
        }

        CategoryCommands::Add { label } => {
            let label = service.add(&label)?;
            println!("Added category: {}", label);
        }

        CategoryCommands::Delete { label, force } => {
            if !service.exists(&label)? {
                return Err(crate::error::ExpenseError::category_not_found(label));
            }

            if !force {
                let usage = service.usage_count(&label)?;
                println!(
                    "Are you sure you want to delete the category \"{}\"? This cannot be undone.",
                    label
                );
                if usage > 0 {
                    println!(
                        "{} expense(s) use this category and will keep the label.",
                        usage
                    );
                }
                println!();
                println!("To proceed, run again with --force flag:");
                println!("  expenses category delete \"{}\" --force", label);
                return Ok(());
            }

            service.remove(&label)?;
            println!("Deleted category: {}", label);
        }
    }

    Ok(())
}
