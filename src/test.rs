//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{Amount, Expense, DATE_FORMAT};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::TempDir;

/// Test environment with a scratch directory that holds the expenses file and config files.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    temp_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The expenses file path. It does not exist until something writes it.
    pub fn data_file(&self) -> PathBuf {
        self.root().join("expenses.csv")
    }

    pub fn write_data(&self, content: &str) {
        std::fs::write(self.data_file(), content).unwrap();
    }

    pub fn read_data(&self) -> String {
        std::fs::read_to_string(self.data_file()).unwrap()
    }

    /// Writes a config file named `name` into the root and returns its path.
    pub fn write_config(&self, name: &str, json: &str) -> PathBuf {
        let path = self.root().join(name);
        std::fs::write(&path, json).unwrap();
        path
    }

    pub fn expense(&self, date: &str, category: &str, amount: &str) -> Expense {
        Expense::new(
            NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap(),
            category,
            Amount::from_str(amount).unwrap(),
            "",
        )
    }
}
