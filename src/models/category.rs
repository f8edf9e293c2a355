//! Category labels
//!
//! Categories are plain unique strings. Expenses refer to them by label,
//! so removing a label leaves any expense that used it untouched.

use std::fmt;

/// Labels seeded on first run
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Eating out",
    "Groceries",
    "Chocolate",
    "Transport",
    "Entertainment",
    "Gas",
    "Shopping",
    "Hiking",
    "Gifts",
    "Other",
];

/// The default category list as owned strings
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// Normalize a user-supplied label
pub fn normalize_label(label: &str) -> Result<String, CategoryValidationError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }

    if label.chars().count() > 50 {
        return Err(CategoryValidationError::NameTooLong(label.chars().count()));
    }

    if let Some(c) = label.chars().find(|&c| is_forbidden_label_char(c)) {
        return Err(CategoryValidationError::ForbiddenCharacter(c));
    }

    Ok(label.to_string())
}

/// Characters that cannot appear in a label
///
/// The category column of a CSV export is written unquoted, so a quote or
/// a line break would corrupt the row.
pub fn is_forbidden_label_char(c: char) -> bool {
    matches!(c, '"' | '\n' | '\r')
}

/// Validation errors for category labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    ForbiddenCharacter(char),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::ForbiddenCharacter(c) => {
                write!(f, "Category name cannot contain {:?}", c)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories() {
        let defaults = default_categories();
        assert_eq!(defaults.len(), 10);
        assert_eq!(defaults[0], "Eating out");
        assert_eq!(defaults[9], "Other");
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Rent ").unwrap(), "Rent");
        assert_eq!(normalize_label("   "), Err(CategoryValidationError::EmptyName));
        assert!(matches!(
            normalize_label(&"a".repeat(51)),
            Err(CategoryValidationError::NameTooLong(51))
        ));
        assert_eq!(normalize_label("Food, drinks").unwrap(), "Food, drinks");
        assert_eq!(
            normalize_label("Say \"hi\""),
            Err(CategoryValidationError::ForbiddenCharacter('"'))
        );
        assert_eq!(
            normalize_label("two\nlines"),
            Err(CategoryValidationError::ForbiddenCharacter('\n'))
        );
    }
}
