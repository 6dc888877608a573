//! The in-memory, ordered collection of expenses.

use crate::error::{ErrorType, IntoResult};
use crate::filter::{self, CategoryTotal};
use crate::model::{Expense, MonthKey};
use crate::Result;
use anyhow::bail;
use std::collections::BTreeSet;

/// An ordered list of expenses.
///
/// New expenses go to the front, so the default order is most-recently-added first. This order
/// says nothing about the expenses' dates. Expenses are identified only by their position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `expense` at position 0. Every existing expense moves back by one position.
    pub fn add(&mut self, expense: Expense) {
        self.expenses.insert(0, expense);
    }

    /// Appends `expense` at the end. Used when rebuilding a store in file order.
    pub(crate) fn push_back(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    /// Removes and returns the expense at `index`. Later expenses move forward by one position.
    ///
    /// # Errors
    /// - Returns an error of type `ErrorType::Index` if `index` is not less than `len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<Expense> {
        self.check_index(index).pub_result(ErrorType::Index)?;
        Ok(self.expenses.remove(index))
    }

    /// Removes the expenses at all of the given positions, which refer to the store as it was
    /// before the call. Duplicate positions are removed once.
    ///
    /// Nothing is removed unless every index is valid. The removed expenses are returned in
    /// ascending position order.
    ///
    /// # Errors
    /// - Returns an error of type `ErrorType::Index` if any index is out of range.
    pub fn remove_many(&mut self, indices: &[usize]) -> Result<Vec<Expense>> {
        let unique: BTreeSet<usize> = indices.iter().copied().collect();
        for &index in &unique {
            self.check_index(index).pub_result(ErrorType::Index)?;
        }
        // Back to front so that the remaining positions stay valid.
        let mut removed: Vec<Expense> = unique
            .into_iter()
            .rev()
            .map(|index| self.expenses.remove(index))
            .collect();
        removed.reverse();
        Ok(removed)
    }

    /// All expenses in store order.
    pub fn list(&self) -> &[Expense] {
        &self.expenses
    }

    /// The expense at `index`, if there is one.
    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.expenses.get(index)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Totals per category over the whole store.
    ///
    /// Categories appear in the order they are first seen while scanning `list()` from the front,
    /// so the category of the most recently added expense comes first. Categories are compared
    /// exactly, without trimming or case folding.
    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        filter::category_totals(&self.expenses)
    }

    /// The distinct months of all expenses, newest first.
    pub fn distinct_months(&self) -> Vec<MonthKey> {
        let months: BTreeSet<MonthKey> = self.expenses.iter().map(Expense::month_key).collect();
        months.into_iter().rev().collect()
    }

    fn check_index(&self, index: usize) -> anyhow::Result<()> {
        if index >= self.expenses.len() {
            bail!(
                "There is no expense at position {index}, the store has {} expense{}",
                self.expenses.len(),
                if self.expenses.len() == 1 { "" } else { "s" }
            );
        }
        Ok(())
    }
}

impl FromIterator<Expense> for ExpenseStore {
    /// Collects expenses keeping the iteration order, i.e. the first item is at position 0.
    fn from_iter<T: IntoIterator<Item = Expense>>(iter: T) -> Self {
        Self {
            expenses: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ExpenseStore {
    type Item = &'a Expense;
    type IntoIter = std::slice::Iter<'a, Expense>;

    fn into_iter(self) -> Self::IntoIter {
        self.expenses.iter()
    }
}
