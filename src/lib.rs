//! Record, filter and total personal expenses kept in a CSV file.
//!
//! The core is small: an `ExpenseStore` holds `Expense` records in insertion order (newest
//! first), the `codec` module reads and writes them as CSV, and the `filter` module selects the
//! expenses of a month and totals them. A `Ledger` ties a store to its file and saves after every
//! change.

pub mod args;
pub mod codec;
pub mod commands;
mod config;
mod error;
pub mod filter;
mod fs;
mod ledger;
pub mod model;
mod store;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, ErrorType, Result};
pub use ledger::{Ledger, Mutation};
pub use store::ExpenseStore;
