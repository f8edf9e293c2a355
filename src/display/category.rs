//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Category")]
    label: String,
    #[tabled(rename = "Expenses")]
    usage: usize,
}

/// Format category labels with how many expenses use each
pub fn format_category_list(labels: &[(String, usize)]) -> String {
    if labels.is_empty() {
        return "No categories found.\n\nRun 'expenses category add <label>' to create one."
            .to_string();
    }

    let rows = labels.iter().enumerate().map(|(i, (label, usage))| CategoryRow {
        index: i + 1,
        label: label.clone(),
        usage: *usage,
    });

    Table::new(rows).with(Style::rounded()).to_string()
}
