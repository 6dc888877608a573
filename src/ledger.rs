//! An `ExpenseStore` bound to the file it is persisted in.

use crate::codec::{self, LoadPolicy};
use crate::filter::{MonthFilter, Summary};
use crate::model::Expense;
use crate::store::ExpenseStore;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// The outcome of a mutation whose in-memory change always stands.
///
/// `saved` is the result of rewriting the file afterwards. A failed save does not undo the
/// change, the file simply lags behind until the next successful save.
#[derive(Debug)]
pub struct Mutation<T> {
    pub value: T,
    pub saved: Result<()>,
}

/// The expenses of one session and the path they are saved to.
///
/// Every mutation rewrites the whole file from the in-memory state.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    store: ExpenseStore,
}

impl Ledger {
    /// Loads the expenses at `path` (a missing file gives an empty ledger).
    ///
    /// Returns the ledger together with any lines that could not be parsed. Which lines were kept
    /// depends on `policy`.
    ///
    /// # Errors
    /// - Returns an error of type `ErrorType::Io` if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>, policy: LoadPolicy) -> Result<(Self, Vec<Error>)> {
        let path = path.into();
        let (store, errors) = codec::load(&path, policy)?.into_parts();
        debug!("Opened ledger {} with {} expenses", path.display(), store.len());
        Ok((Self { path, store }, errors))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    /// Adds `expense` at the front and saves.
    pub fn add(&mut self, expense: Expense) -> Mutation<()> {
        self.store.add(expense);
        Mutation {
            value: (),
            saved: self.save(),
        }
    }

    /// Removes the expense at `index` and saves.
    ///
    /// # Errors
    /// - Returns an error of type `ErrorType::Index`, without saving, if `index` is out of range.
    pub fn remove_at(&mut self, index: usize) -> Result<Mutation<Expense>> {
        let removed = self.store.remove_at(index)?;
        Ok(Mutation {
            value: removed,
            saved: self.save(),
        })
    }

    /// Removes the expenses at `indices` (positions before the call) and saves.
    ///
    /// # Errors
    /// - Returns an error of type `ErrorType::Index`, without removing or saving anything, if any
    ///   index is out of range.
    pub fn remove_many(&mut self, indices: &[usize]) -> Result<Mutation<Vec<Expense>>> {
        let removed = self.store.remove_many(indices)?;
        Ok(Mutation {
            value: removed,
            saved: self.save(),
        })
    }

    /// A snapshot of the current state for `filter`.
    pub fn summary(&self, filter: &MonthFilter) -> Summary {
        Summary::new(&self.store, filter)
    }

    /// Writes the current state to `path` in the export format.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<()> {
        codec::export(&self.store, path)
    }

    fn save(&self) -> Result<()> {
        let result = codec::save(&self.store, &self.path);
        if let Err(e) = &result {
            error!("The expenses file is out of date: {e}");
        }
        result
    }
}
