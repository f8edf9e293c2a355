//! CLI commands for reports

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::report::format_analytics;
use crate::error::ExpenseResult;
use crate::reports::AnalyticsFilter;
use crate::services::ExpenseService;
use crate::storage::Storage;

use super::parse_range;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending per category with a bar chart
    #[command(alias = "spending")]
    Analytics {
        /// Start date (YYYY-MM-DD), defaults to the first of this month
        #[arg(short, long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD, inclusive), defaults to today
        #[arg(short, long)]
        to: Option<String>,

        /// Only include these categories (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<String>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    match cmd {
        ReportCommands::Analytics {
            from,
            to,
            categories,
        } => {
            let range = parse_range(from.as_deref(), to.as_deref())?;
            let filter = AnalyticsFilter::new(range).with_categories(categories);

            let report = ExpenseService::new(storage).analytics(&filter)?;
            print!("{}", format_analytics(&report, &settings.currency_symbol));
        }
    }

    Ok(())
}
