//! These structs provide the CLI interface for the expenses CLI.

use crate::codec::LoadPolicy;
use crate::filter::{MonthFilter, SortKey};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// expenses: A command-line tool for recording and totaling personal expenses.
///
/// Expenses are kept in a CSV file, `expenses.csv` in the working directory unless told
/// otherwise. Every change rewrites the file. Each expense is addressed by its position as shown
/// by `expenses list`, with the most recently added expense at position 0.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Record a new expense. It is added at position 0.
    Add(AddArgs),
    /// Delete one or more expenses by position.
    Remove(RemoveArgs),
    /// Show expenses, optionally only those of one month.
    List(ListArgs),
    /// Show the total spent per category over all expenses.
    Totals(JsonArgs),
    /// Show the months that have expenses, newest first.
    Months(JsonArgs),
    /// Show the visible expenses, their total, category totals and months in one go.
    Summary(ListArgs),
    /// Write all expenses to another CSV file, quoting fields where needed.
    Export(ExportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The expenses CSV file. Defaults to the config file's `data_file`, or to expenses.csv in
    /// the working directory.
    #[arg(long, env = "EXPENSES_FILE")]
    file: Option<DisplayPath>,

    /// The JSON config file. Defaults to <config dir>/expenses/config.json if it exists.
    #[arg(long, env = "EXPENSES_CONFIG")]
    config: Option<DisplayPath>,

    /// What to do with lines of the expenses file that cannot be read: stop or skip.
    /// Overrides the config file's `on_bad_line`. Defaults to stop.
    #[arg(long)]
    on_bad_line: Option<LoadPolicy>,
}

impl Common {
    pub fn new(log_level: LevelFilter, file: Option<PathBuf>, config: Option<PathBuf>) -> Self {
        Self {
            log_level,
            file: file.map(Into::into),
            config: config.map(Into::into),
            on_bad_line: None,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn config(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    pub fn on_bad_line(&self) -> Option<LoadPolicy> {
        self.on_bad_line
    }
}

/// Args for the `expenses add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The amount spent, e.g. 12.50
    #[arg(long, short, allow_hyphen_values = true)]
    amount: String,

    /// The date of the expense as yyyy-mm-dd. Defaults to today.
    #[arg(long, short)]
    date: Option<String>,

    /// The category. Suggestions: Food, Travel, Shopping, Bills, Others.
    #[arg(long, short, default_value = "Food")]
    category: String,

    /// A free-form description.
    #[arg(long = "description", short = 'm', default_value = "")]
    description: String,

    /// Save even if lines of the expenses file could not be read. Those lines are dropped.
    #[arg(long)]
    force: bool,
}

impl AddArgs {
    pub fn new(
        amount: impl Into<String>,
        date: Option<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            date,
            category: category.into(),
            description: description.into(),
            force: false,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn force(&self) -> bool {
        self.force
    }
}

/// Args for the `expenses remove` command.
#[derive(Debug, Parser, Clone)]
pub struct RemoveArgs {
    /// Positions of the expenses to delete, as shown by `expenses list`.
    #[arg(required = true)]
    indices: Vec<usize>,

    /// Save even if lines of the expenses file could not be read. Those lines are dropped.
    #[arg(long)]
    force: bool,
}

impl RemoveArgs {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            force: false,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn force(&self) -> bool {
        self.force
    }
}

/// Args for the `expenses list` and `expenses summary` commands.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// Only show expenses of this month (yyyy-mm), or "all".
    #[arg(long, default_value = "all")]
    month: MonthFilter,

    /// Order the rows by date, category or amount instead of store order. Positions shown in the
    /// `#` column stay the ones `expenses remove` expects.
    #[arg(long)]
    sort: Option<SortKey>,

    /// Sort in descending order.
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    pub fn new(month: MonthFilter, json: bool) -> Self {
        Self {
            month,
            sort: None,
            desc: false,
            json,
        }
    }

    pub fn with_sort(mut self, key: SortKey, descending: bool) -> Self {
        self.sort = Some(key);
        self.desc = descending;
        self
    }

    pub fn month(&self) -> &MonthFilter {
        &self.month
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn descending(&self) -> bool {
        self.desc
    }

    pub fn json(&self) -> bool {
        self.json
    }
}

/// Args for commands whose only option is the output format.
#[derive(Debug, Parser, Clone, Default)]
pub struct JsonArgs {
    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl JsonArgs {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn json(&self) -> bool {
        self.json
    }
}

/// Args for the `expenses export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// Where to write the exported CSV. An existing file is overwritten.
    path: PathBuf,
}

impl ExportArgs {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MonthKey;

    #[test]
    fn test_parse_add() {
        let args = Args::parse_from([
            "expenses", "add", "--amount", "-12.5", "--category", "Travel", "-m", "taxi",
        ]);
        let Command::Add(add) = args.command() else {
            panic!("expected add");
        };
        assert_eq!(add.amount(), "-12.5");
        assert_eq!(add.category(), "Travel");
        assert_eq!(add.description(), "taxi");
        assert_eq!(add.date(), None);
    }

    #[test]
    fn test_parse_add_defaults() {
        let args = Args::parse_from(["expenses", "add", "-a", "3", "-d", "2024-01-01"]);
        let Command::Add(add) = args.command() else {
            panic!("expected add");
        };
        assert_eq!(add.category(), "Food");
        assert_eq!(add.description(), "");
        assert_eq!(add.date(), Some("2024-01-01"));
    }

    #[test]
    fn test_parse_list_month() {
        let args = Args::parse_from(["expenses", "list", "--month", "2024-02", "--json"]);
        let Command::List(list) = args.command() else {
            panic!("expected list");
        };
        assert_eq!(
            list.month(),
            &MonthFilter::Month(MonthKey::new(2024, 2).unwrap())
        );
        assert!(list.json());

        let args = Args::parse_from(["expenses", "list"]);
        let Command::List(list) = args.command() else {
            panic!("expected list");
        };
        assert_eq!(list.month(), &MonthFilter::All);
    }

    #[test]
    fn test_parse_list_sort() {
        let args = Args::parse_from(["expenses", "summary", "--sort", "amount", "--desc"]);
        let Command::Summary(list) = args.command() else {
            panic!("expected summary");
        };
        assert_eq!(list.sort(), Some(SortKey::Amount));
        assert!(list.descending());

        let args = Args::parse_from(["expenses", "list"]);
        let Command::List(list) = args.command() else {
            panic!("expected list");
        };
        assert_eq!(list.sort(), None);
        assert!(!list.descending());

        assert!(Args::try_parse_from(["expenses", "list", "--sort", "note"]).is_err());
        assert!(Args::try_parse_from(["expenses", "list", "--desc"]).is_err());
    }

    #[test]
    fn test_parse_list_bad_month() {
        assert!(Args::try_parse_from(["expenses", "list", "--month", "2024-13"]).is_err());
    }

    #[test]
    fn test_parse_remove() {
        let args = Args::parse_from(["expenses", "remove", "2", "0"]);
        let Command::Remove(remove) = args.command() else {
            panic!("expected remove");
        };
        assert_eq!(remove.indices(), &[2, 0]);
        assert!(!remove.force());
        let args = Args::parse_from(["expenses", "remove", "--force", "1"]);
        let Command::Remove(remove) = args.command() else {
            panic!("expected remove");
        };
        assert!(remove.force());
        assert!(Args::try_parse_from(["expenses", "remove"]).is_err());
        assert!(Args::try_parse_from(["expenses", "remove", "-1"]).is_err());
    }

    #[test]
    fn test_parse_common() {
        let args = Args::parse_from([
            "expenses",
            "--file",
            "/tmp/x.csv",
            "--log-level",
            "debug",
            "--on-bad-line",
            "skip",
            "months",
        ]);
        assert_eq!(args.common().file(), Some(Path::new("/tmp/x.csv")));
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        assert_eq!(args.common().on_bad_line(), Some(LoadPolicy::Skip));
    }
}
