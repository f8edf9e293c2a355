//! Storage initialization
//!
//! Handles first-run setup: directories and the default category list.

use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::default_categories;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing data is never overwritten.
pub fn initialize_storage(paths: &ExpensePaths) -> Result<(), ExpenseError> {
    paths.ensure_directories()?;

    if needs_initialization(paths) {
        write_json_atomic(paths.categories_file(), &default_categories())?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &ExpensePaths) -> bool {
    !paths.categories_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.data_dir().exists());

        let content = std::fs::read_to_string(paths.categories_file()).unwrap();
        let labels: Vec<String> = serde_json::from_str(&content).unwrap();
        assert_eq!(labels.len(), 10);
        assert!(labels.contains(&"Hiking".to_string()));
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();
        write_json_atomic(paths.categories_file(), &vec!["Custom"]).unwrap();

        initialize_storage(&paths).unwrap();

        let content = std::fs::read_to_string(paths.categories_file()).unwrap();
        let labels: Vec<String> = serde_json::from_str(&content).unwrap();
        assert_eq!(labels, vec!["Custom"]);
    }
}
