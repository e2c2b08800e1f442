//! Path management for fintrack
//!
//! ## Path Resolution Order
//!
//! 1. `FINTRACK_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory from `directories`
//!    (`~/.config/fintrack` on Linux, `~/Library/Application Support/fintrack`
//!    on macOS, `%APPDATA%\fintrack` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FinanceError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FINTRACK_DATA_DIR";

/// Manages all paths used by fintrack
#[derive(Debug, Clone)]
pub struct FinTrackPaths {
    base_dir: PathBuf,
}

impl FinTrackPaths {
    /// Resolve the base directory from the environment or platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FinanceError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "fintrack")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    FinanceError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON document per table
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Settings file, which also holds the notification settings record
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    pub fn budget_goals_file(&self) -> PathBuf {
        self.data_dir().join("budget_goals.json")
    }

    pub fn financial_goals_file(&self) -> PathBuf {
        self.data_dir().join("financial_goals.json")
    }

    pub fn recurring_file(&self) -> PathBuf {
        self.data_dir().join("recurring.json")
    }

    /// Custom (user-defined) categories; built-ins are never persisted
    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), FinanceError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinanceError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FinanceError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if fintrack has been initialized (settings file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_table_files_live_in_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let data = temp_dir.path().join("data");

        assert_eq!(paths.transactions_file(), data.join("transactions.json"));
        assert_eq!(paths.budget_goals_file(), data.join("budget_goals.json"));
        assert_eq!(paths.financial_goals_file(), data.join("financial_goals.json"));
        assert_eq!(paths.recurring_file(), data.join("recurring.json"));
        assert_eq!(paths.categories_file(), data.join("categories.json"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }
}
