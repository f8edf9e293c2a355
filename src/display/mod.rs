//! Display formatting for terminal output
//!
//! Every formatter builds a `String`; printing is left to the CLI layer.

pub mod category;
pub mod expense;
pub mod report;

pub use category::format_category_list;
pub use expense::{format_expense_details, format_expense_row, format_expense_table, format_listing};
pub use report::{format_amount, format_analytics, format_bar, truncate};
