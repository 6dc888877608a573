//! Types that represent the core data model, such as `Expense` and `Amount`.
mod amount;
mod expense;
mod month;

pub use amount::{Amount, AmountError};
pub use expense::{Expense, DATE_FORMAT, SUGGESTED_CATEGORIES};
pub(crate) use expense::parse_date;
pub use month::MonthKey;
