//! Month filtering and the totals that are shown alongside the filtered rows.

use crate::model::{Amount, Expense, MonthKey};
use crate::store::ExpenseStore;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Which expenses to show.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthFilter {
    #[default]
    All,
    Month(MonthKey),
}

impl MonthFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(key) => expense.month_key() == *key,
        }
    }
}

impl From<Option<MonthKey>> for MonthFilter {
    fn from(value: Option<MonthKey>) -> Self {
        value.map(MonthFilter::Month).unwrap_or_default()
    }
}

impl Display for MonthFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MonthFilter::All => write!(f, "All months"),
            MonthFilter::Month(key) => Display::fmt(key, f),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = anyhow::Error;

    /// Accepts `all` or `All months` in any case, or a `YYYY-MM` month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s.eq_ignore_ascii_case("all months") {
            return Ok(MonthFilter::All);
        }
        Ok(MonthFilter::Month(MonthKey::from_str(s)?))
    }
}

/// The expenses of `store` that pass `filter`, in store order.
pub fn filter_by_month<'a>(store: &'a ExpenseStore, filter: &MonthFilter) -> Vec<&'a Expense> {
    store.list().iter().filter(|e| filter.matches(e)).collect()
}

/// The sum of the amounts of `expenses`. Zero if there are none.
pub fn total<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Amount {
    expenses.into_iter().map(Expense::amount).sum()
}

/// The total amount spent in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    category: String,
    total: Amount,
}

impl CategoryTotal {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn total(&self) -> Amount {
        self.total
    }
}

/// Totals per category, in the order each category is first seen in `expenses`.
pub fn category_totals<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for expense in expenses {
        // The number of categories is small, a linear search keeps first-seen order for free.
        match totals.iter_mut().find(|t| t.category == expense.category()) {
            Some(existing) => existing.total += expense.amount(),
            None => totals.push(CategoryTotal {
                category: expense.category().to_string(),
                total: expense.amount(),
            }),
        }
    }
    totals
}

/// The column that visible rows can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Date,
    Category,
    Amount,
}

serde_plain::derive_display_from_serialize!(SortKey);
serde_plain::derive_fromstr_from_deserialize!(SortKey);

impl SortKey {
    fn compare(&self, a: &Expense, b: &Expense) -> Ordering {
        match self {
            SortKey::Date => a.date().cmp(&b.date()),
            SortKey::Category => a.category().cmp(b.category()),
            SortKey::Amount => a.amount().cmp(&b.amount()),
        }
    }
}

/// Orders `rows` by `key`, ascending unless `descending` is set.
///
/// The sort is stable in both directions, so rows that compare equal stay in store order. Each
/// row keeps its `index`, which still addresses the same expense in the store.
pub fn sort_rows(rows: &mut [Row], key: SortKey, descending: bool) {
    rows.sort_by(|a, b| {
        let ordering = key.compare(&a.expense, &b.expense);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

/// One visible row: the expense and its position in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub index: usize,
    #[serde(flatten)]
    pub expense: Expense,
}

/// A snapshot of everything a front end renders for one filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// The selected month, or `None` for all months.
    month: Option<MonthKey>,
    rows: Vec<Row>,
    /// The total of the visible rows.
    total: Amount,
    /// Category totals over the whole store, not only the visible rows.
    category_totals: Vec<CategoryTotal>,
    /// Every month that has expenses, newest first.
    months: Vec<MonthKey>,
}

impl Summary {
    pub fn new(store: &ExpenseStore, filter: &MonthFilter) -> Self {
        let rows: Vec<Row> = store
            .list()
            .iter()
            .enumerate()
            .filter(|(_, e)| filter.matches(e))
            .map(|(index, e)| Row {
                index,
                expense: e.clone(),
            })
            .collect();
        let total = total(rows.iter().map(|r| &r.expense));
        Self {
            month: match filter {
                MonthFilter::All => None,
                MonthFilter::Month(key) => Some(*key),
            },
            rows,
            total,
            category_totals: store.category_totals(),
            months: store.distinct_months(),
        }
    }

    /// The same snapshot with its rows ordered by `key`. Totals and months are unaffected.
    pub fn sorted(mut self, key: SortKey, descending: bool) -> Self {
        sort_rows(&mut self.rows, key, descending);
        self
    }

    pub fn filter(&self) -> MonthFilter {
        self.month.into()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn category_totals(&self) -> &[CategoryTotal] {
        &self.category_totals
    }

    pub fn months(&self) -> &[MonthKey] {
        &self.months
    }
}
