//! Add command handler.

use crate::args::AddArgs;
use crate::commands::{open_ledger, Access, Out};
use crate::model::{Expense, DATE_FORMAT, SUGGESTED_CATEGORIES};
use crate::{Config, Result};
use chrono::Local;
use tracing::debug;

/// Records a new expense at position 0 and saves the file.
///
/// The input is validated before the file is touched; `date` defaults to today's local date.
///
/// # Errors
///
/// - Returns an error of type `ErrorType::Validation` if the date or amount cannot be parsed or a
///   required field is empty.
/// - Returns an error of type `ErrorType::Parse` if the file has lines that could not be read,
///   unless `args.force()` is set.
/// - Returns an error of type `ErrorType::Io` if the file cannot be read or saved.
pub fn add(config: &Config, args: &AddArgs) -> Result<Out<Expense>> {
    let today = Local::now().date_naive().format(DATE_FORMAT).to_string();
    let date = args.date().unwrap_or(today.as_str());
    let expense = Expense::parse(date, args.category(), args.amount(), args.description())?;
    if !SUGGESTED_CATEGORIES.contains(&expense.category()) {
        debug!("Using a category outside of the suggestions: {}", expense.category());
    }

    let mut ledger = open_ledger(config, Access::write(args.force()))?;
    ledger.add(expense.clone()).saved?;

    let message = format!(
        "Added {} {} on {} ({})",
        expense.category(),
        expense.amount().pretty(config.currency_symbol()),
        expense.date().format(DATE_FORMAT),
        super::expenses(ledger.store().len()),
    );
    Ok(Out::new(message, expense))
}
