//! Command handlers for the expenses CLI.
//!
//! This module contains implementations for all CLI subcommands. Each handler loads the ledger,
//! runs one operation and returns an `Out` for the front end to render.

mod add;
mod export;
mod list;
mod remove;

use crate::error::{Error, ErrorType, IntoResult};
use crate::ledger::Ledger;
use crate::{Config, Result};
use anyhow::anyhow;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, error, warn};

pub use add::add;
pub use export::export;
pub use list::{list, months, summary, totals};
pub use remove::remove;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print to stdout: the structured data as JSON if `json` is set and there is any, otherwise
    /// the message.
    pub fn print(&self, json: bool) {
        let structure = match self.structure() {
            Some(structure) => structure,
            None => {
                println!("{}", self.message);
                return;
            }
        };
        match serde_json::to_string_pretty(structure) {
            Ok(s) if json => println!("{s}"),
            Ok(s) => {
                println!("{}", self.message);
                debug!("Command output:\n\n{s}\n\n");
            }
            Err(e) => {
                error!("Unable to serialize command output: {e}");
                println!("{}", self.message);
            }
        }
    }
}

/// How a command is going to use the ledger it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    /// Nothing is saved.
    Read,
    /// The file is rewritten. Refused if some lines of it could not be read.
    Write,
    /// The file is rewritten even if that drops lines that could not be read.
    ForceWrite,
}

impl Access {
    fn write(force: bool) -> Self {
        if force {
            Access::ForceWrite
        } else {
            Access::Write
        }
    }
}

/// Opens the ledger named by `config`, logging any lines that could not be read.
///
/// Saving rewrites the file from what could be read, so `Access::Write` refuses a file with
/// unreadable lines and `Access::ForceWrite` only warns about the loss.
fn open_ledger(config: &Config, access: Access) -> Result<Ledger> {
    let (ledger, errors) = Ledger::open(config.data_file(), config.load_policy())?;
    for e in &errors {
        warn!("{}: {e}", config.data_file().display());
    }
    match access {
        Access::Write if !errors.is_empty() => refuse_rewrite(config, &errors),
        Access::ForceWrite if !errors.is_empty() => {
            warn!(
                "Rewriting {} with only the {} that could be read",
                config.data_file().display(),
                expenses(ledger.store().len())
            );
            Ok(ledger)
        }
        _ => Ok(ledger),
    }
}

fn refuse_rewrite(config: &Config, errors: &[Error]) -> Result<Ledger> {
    let details: String = errors.iter().map(|e| format!("\n  {e}")).collect();
    Err(anyhow!(
        "Refusing to change {}: {} could not be read and would be lost. Fix the file first or \
         pass --force to drop them{details}",
        config.data_file().display(),
        lines(errors.len()),
    ))
    .pub_result(ErrorType::Parse)
}

fn lines(count: usize) -> String {
    format!("{count} line{}", if count == 1 { "" } else { "s" })
}

/// "1 expense", "2 expenses"
fn expenses(count: usize) -> String {
    format!("{count} expense{}", if count == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::LoadPolicy;
    use crate::test::TestEnv;

    #[test]
    fn test_out_message() {
        let out: Out<()> = Out::new_message("hello");
        assert_eq!(out.message(), "hello");
        assert!(out.structure().is_none());
        let out = Out::new("with data", vec![1, 2]);
        assert_eq!(out.structure(), Some(&vec![1, 2]));
    }

    #[test]
    fn test_open_ledger_refuses_to_rewrite_bad_file() {
        let env = TestEnv::new();
        env.write_data("date,category,amount,description\n2024-01-01,Food,abc,lunch\n");
        let data_file = env.data_file();
        let config = Config::load(None, Some(data_file.as_path())).unwrap();
        assert!(open_ledger(&config, Access::Read).is_ok());
        let err = open_ledger(&config, Access::Write).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Parse);
        assert!(err.to_string().contains("1 line could not be read"));
        assert!(err.to_string().contains("Unable to parse line 2"));
        assert!(err.to_string().contains("--force"));
    }

    #[test]
    fn test_open_ledger_force_write_with_skip() {
        let env = TestEnv::new();
        env.write_data(
            "date,category,amount,description\n\
             2024-01-01,Food,abc,lunch\n\
             2024-01-02,Food,2,dinner\n\
             bad-date,Food,3,x\n",
        );
        let data_file = env.data_file();
        let config = Config::load(None, Some(data_file.as_path()))
            .unwrap()
            .with_load_policy(LoadPolicy::Skip);
        let err = open_ledger(&config, Access::Write).unwrap_err();
        assert!(err.to_string().contains("2 lines could not be read"));
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("line 4"));

        let ledger = open_ledger(&config, Access::ForceWrite).unwrap();
        assert_eq!(ledger.store().len(), 1);
    }

    #[test]
    fn test_access_write() {
        assert_eq!(Access::write(false), Access::Write);
        assert_eq!(Access::write(true), Access::ForceWrite);
    }

    #[test]
    fn test_expenses_plural() {
        assert_eq!(expenses(1), "1 expense");
        assert_eq!(expenses(0), "0 expenses");
    }
}
