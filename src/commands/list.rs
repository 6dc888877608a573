//! Read-only command handlers: list, summary, totals and months.

use crate::args::{JsonArgs, ListArgs};
use crate::commands::{open_ledger, Access, Out};
use crate::filter::{CategoryTotal, Row, Summary};
use crate::model::{MonthKey, DATE_FORMAT};
use crate::{Config, Result};
use std::fmt::Write;

/// Shows the expenses of the selected month, in store order unless a sort is given, followed by
/// their total.
pub fn list(config: &Config, args: &ListArgs) -> Result<Out<Vec<Row>>> {
    let summary = snapshot(config, args)?;
    let symbol = config.currency_symbol();
    let message = format!(
        "Showing: {}\n{}Total: {}",
        summary.filter(),
        rows_table(summary.rows(), symbol),
        summary.total().pretty(symbol)
    );
    Ok(Out::new(message, summary.rows().to_vec()))
}

/// Shows everything at once: the visible expenses and their total, the category totals over all
/// expenses, and the months that have expenses.
pub fn summary(config: &Config, args: &ListArgs) -> Result<Out<Summary>> {
    let summary = snapshot(config, args)?;
    let symbol = config.currency_symbol();
    let message = format!(
        "Showing: {}\n{}Total: {}\n\nCategory Totals\n{}\nMonths\n{}",
        summary.filter(),
        rows_table(summary.rows(), symbol),
        summary.total().pretty(symbol),
        totals_text(summary.category_totals(), symbol),
        months_text(summary.months()),
    );
    Ok(Out::new(message, summary))
}

/// Shows the total per category over all expenses, most recently used category first.
pub fn totals(config: &Config, _args: &JsonArgs) -> Result<Out<Vec<CategoryTotal>>> {
    let totals = open_ledger(config, Access::Read)?.store().category_totals();
    let message = totals_text(&totals, config.currency_symbol());
    Ok(Out::new(message, totals))
}

/// Shows the months that have expenses, newest first.
pub fn months(config: &Config, _args: &JsonArgs) -> Result<Out<Vec<MonthKey>>> {
    let months = open_ledger(config, Access::Read)?.store().distinct_months();
    Ok(Out::new(months_text(&months), months))
}

fn snapshot(config: &Config, args: &ListArgs) -> Result<Summary> {
    let summary = open_ledger(config, Access::Read)?.summary(args.month());
    Ok(match args.sort() {
        Some(key) => summary.sorted(key, args.descending()),
        None => summary,
    })
}

fn rows_table(rows: &[Row], symbol: &str) -> String {
    if rows.is_empty() {
        return String::from("(no expenses)\n");
    }
    let amounts: Vec<String> = rows.iter().map(|r| r.expense.amount().pretty(symbol)).collect();
    let index_width = rows
        .iter()
        .map(|r| r.index.to_string().len())
        .max()
        .unwrap_or(1)
        .max(1);
    let category_width = rows
        .iter()
        .map(|r| r.expense.category().chars().count())
        .chain(std::iter::once("Category".len()))
        .max()
        .unwrap_or_default();
    let amount_width = amounts
        .iter()
        .map(|a| a.chars().count())
        .chain(std::iter::once("Amount".len()))
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>index_width$}  {:<10}  {:<category_width$}  {:>amount_width$}  Description",
        "#", "Date", "Category", "Amount"
    );
    for (row, amount) in rows.iter().zip(&amounts) {
        let _ = writeln!(
            out,
            "{:>index_width$}  {}  {:<category_width$}  {:>amount_width$}  {}",
            row.index,
            row.expense.date().format(DATE_FORMAT),
            row.expense.category(),
            amount,
            row.expense.description().replace('\n', " "),
        );
    }
    out
}

fn totals_text(totals: &[CategoryTotal], symbol: &str) -> String {
    if totals.is_empty() {
        return String::from("(no expenses)\n");
    }
    totals
        .iter()
        .map(|t| format!("{} : {}\n", t.category(), t.total().pretty(symbol)))
        .collect()
}

fn months_text(months: &[MonthKey]) -> String {
    if months.is_empty() {
        return String::from("(no expenses)\n");
    }
    months.iter().map(|m| format!("{m}\n")).collect()
}
