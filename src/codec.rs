//! Reading and writing expenses as CSV.
//!
//! Every file starts with the header `date,category,amount,description`, followed by one line
//! per expense. Two writers exist:
//!
//! - `save` is used to persist the store after every change. Commas and newlines in `category`
//!   and `description` are replaced with spaces and nothing is quoted, so the file can be read
//!   back with a plain split on the first three commas.
//! - `export` writes a copy for use elsewhere. Fields that contain a comma, a newline or a double
//!   quote are quoted, with inner quotes doubled. Exported files are not meant to be loaded.

use crate::error::{Error, ErrorType, IntoResult, Res};
use crate::model::{parse_date, Amount, Expense, DATE_FORMAT};
use crate::store::ExpenseStore;
use crate::{fs, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, trace, warn};

/// The first line of every file.
pub const HEADER: &str = "date,category,amount,description";

/// The columns in `HEADER`.
const COLUMNS: [&str; 4] = ["date", "category", "amount", "description"];

/// What to do when a line of a persisted file cannot be parsed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Stop reading at the first bad line. Expenses read before it are kept.
    #[default]
    Stop,
    /// Skip bad lines and keep reading.
    Skip,
}

serde_plain::derive_display_from_serialize!(LoadPolicy);
serde_plain::derive_fromstr_from_deserialize!(LoadPolicy);

/// The result of reading a persisted file.
///
/// A file with bad lines still produces a store. The problems are reported in `errors`, each of
/// type `ErrorType::Parse`.
#[derive(Debug, Default)]
pub struct Loaded {
    store: ExpenseStore,
    errors: Vec<Error>,
}

impl Loaded {
    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_parts(self) -> (ExpenseStore, Vec<Error>) {
        (self.store, self.errors)
    }
}

/// Reads the expenses stored at `path`.
///
/// A missing file is not an error, it produces an empty store.
///
/// # Errors
/// - Returns an error of type `ErrorType::Io` if the file exists but cannot be read.
pub fn load(path: impl AsRef<Path>, policy: LoadPolicy) -> Result<Loaded> {
    let path = path.as_ref();
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No expenses file at {}, starting empty", path.display());
            return Ok(Loaded::default());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Unable to read expenses from {}", path.display()))
                .pub_result(ErrorType::Io)
        }
    };
    let loaded = decode(&text, policy);
    debug!(
        "Loaded {} expenses from {} with {} bad lines",
        loaded.store.len(),
        path.display(),
        loaded.errors.len()
    );
    Ok(loaded)
}

/// Parses the content of a persisted file.
pub fn decode(text: &str, policy: LoadPolicy) -> Loaded {
    let mut loaded = Loaded::default();
    // The first line is the header, whatever it says.
    for (ix, line) in text.lines().enumerate().skip(1) {
        let line_number = ix + 1;
        if line.trim().is_empty() {
            continue;
        }
        match decode_line(line) {
            Ok(Some(expense)) => loaded.store.push_back(expense),
            Ok(None) => trace!("Skipping line {line_number} with fewer than 3 fields"),
            Err(e) => {
                let e = Error::new(
                    ErrorType::Parse,
                    e.context(format!("Unable to parse line {line_number}")),
                );
                warn!("{e}");
                loaded.errors.push(e);
                if policy == LoadPolicy::Stop {
                    break;
                }
            }
        }
    }
    loaded
}

/// Returns `None` for lines with fewer than three fields. Quotes are not interpreted.
fn decode_line(line: &str) -> Res<Option<Expense>> {
    let parts: Vec<&str> = line.splitn(COLUMNS.len(), ',').collect();
    if parts.len() < 3 {
        return Ok(None);
    }
    let date = parse_date(parts[0].trim())?;
    let amount = Amount::from_str(parts[2]).context("Invalid amount")?;
    let description = parts.get(3).copied().unwrap_or_default();
    Ok(Some(Expense::new(date, parts[1], amount, description)))
}

/// Renders `store` in the persisted format.
pub fn encode(store: &ExpenseStore) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + store.len() * 48);
    out.push_str(HEADER);
    out.push('\n');
    for expense in store {
        out.push_str(&format!(
            "{},{},{},{}\n",
            expense.date().format(DATE_FORMAT),
            flatten(expense.category()),
            expense.amount(),
            flatten(expense.description()),
        ));
    }
    out
}

/// Replaces the characters that would break a naive line split with spaces.
pub fn flatten(field: &str) -> String {
    field.replace([',', '\n', '\r'], " ")
}

/// Writes `store` to `path` in the persisted format, replacing the file.
///
/// The content is written to a temporary file next to `path` which is then renamed over it, so
/// an interrupted save leaves the previous file intact.
///
/// # Errors
/// - Returns an error of type `ErrorType::Io` if writing or renaming fails.
pub fn save(store: &ExpenseStore, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write_atomic(path, encode(store))
        .with_context(|| format!("Unable to save expenses to {}", path.display()))
        .pub_result(ErrorType::Io)?;
    debug!("Saved {} expenses to {}", store.len(), path.display());
    Ok(())
}

/// Renders `store` in the export format.
pub fn encode_export(store: &ExpenseStore) -> Res<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for expense in store {
        writer.write_record([
            expense.date().format(DATE_FORMAT).to_string(),
            expense.category().to_string(),
            expense.amount().to_string(),
            expense.description().to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to flush CSV writer: {}", e.error()))?;
    String::from_utf8(bytes).context("Exported CSV is not valid UTF-8")
}

/// Writes `store` to `path` in the export format.
///
/// # Errors
/// - Returns an error of type `ErrorType::Io` if the file cannot be written.
pub fn export(store: &ExpenseStore, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    encode_export(store)
        .and_then(|content| fs::write_all(path, content.into_bytes()))
        .with_context(|| format!("Unable to export expenses to {}", path.display()))
        .pub_result(ErrorType::Io)?;
    debug!("Exported {} expenses to {}", store.len(), path.display());
    Ok(())
}
