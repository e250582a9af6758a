//! These structs provide the CLI interface for the expenses CLI.

use crate::model::{Category, CategoryFilter};
use crate::persist::DEFAULT_STORAGE_KEY;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expenses: A command-line tool for tracking your day-to-day spending.
///
/// Record what you spend with `expenses add`, remove mistakes with `expenses delete`, and see your
/// totals and history with `expenses list`. Everything is kept in a JSON file in your expenses
/// home directory.
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
    /// Create the expenses home directory and its configuration file.
    ///
    /// You do not need to run this; the directory is created with default settings the first
    /// time any other command runs. Use it if you want a different storage key.
    Init(InitArgs),
    /// Record a new expense, dated today.
    Add(AddArgs),
    /// Delete an expense by its id. The ids are shown by `expenses list`.
    Delete(DeleteArgs),
    /// Show the total, the number of expenses and the list of expenses.
    List(ListArgs),
    /// Show the categories an expense can be filed under.
    Categories,
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

    /// The directory where expense data and configuration is held. Defaults to ~/expenses
    #[arg(long, env = "EXPENSES_HOME", default_value_t = default_expenses_home())]
    expenses_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, expenses_home: PathBuf) -> Self {
        Self {
            log_level,
            expenses_home: expenses_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn expenses_home(&self) -> &DisplayPath {
        &self.expenses_home
    }
}

/// Args for the `expenses init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The name the expense list is stored under. It is saved to `<storage-key>.json`.
    #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
    storage_key: String,
}

impl InitArgs {
    pub fn new(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

/// Args for the `expenses add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// What the money was spent on, e.g. "Lunch at cafe".
    description: String,

    /// How much was spent, e.g. 12.50. A leading '$' and thousands commas are allowed.
    #[arg(allow_hyphen_values = true)]
    amount: String,

    /// The category to file the expense under.
    #[arg(long, short, value_enum, ignore_case = true, default_value_t = Category::Food)]
    category: Category,
}

impl AddArgs {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            category,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

/// Args for the `expenses delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The id of the expense to delete.
    id: String,
}

impl DeleteArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Args for the `expenses list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// Only show one category, or "All".
    #[arg(long, short, default_value_t = CategoryFilter::All)]
    category: CategoryFilter,
}

impl ListArgs {
    pub fn new(category: CategoryFilter) -> Self {
        Self { category }
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }
}

fn default_expenses_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expenses"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --expenses-home or EXPENSES_HOME instead of relying on the \
                default expenses home directory. If you continue using the program right now, you \
                may have problems!",
            );
            PathBuf::from("expenses")
        }
    })
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

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut full = vec!["expenses", "--expenses-home", "/tmp/x"];
        full.extend_from_slice(args);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_parse_add_defaults_to_food() {
        let args = parse(&["add", "Lunch", "12.50"]);
        match args.command() {
            Command::Add(add) => {
                assert_eq!(add.description(), "Lunch");
                assert_eq!(add.amount(), "12.50");
                assert_eq!(add.category(), Category::Food);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(args.common().expenses_home().path(), Path::new("/tmp/x"));
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
    }

    #[test]
    fn test_parse_add_with_category() {
        let args = parse(&["add", "Bus", "2.75", "--category", "transport"]);
        match args.command() {
            Command::Add(add) => assert_eq!(add.category(), Category::Transport),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_negative_amount() {
        let args = parse(&["add", "Refund", "-5"]);
        match args.command() {
            Command::Add(add) => assert_eq!(add.amount(), "-5"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_filter() {
        let args = parse(&["list"]);
        match args.command() {
            Command::List(list) => assert_eq!(list.category(), CategoryFilter::All),
            other => panic!("unexpected command {other:?}"),
        }

        let args = parse(&["list", "-c", "Bills"]);
        match args.command() {
            Command::List(list) => {
                assert_eq!(list.category(), CategoryFilter::Only(Category::Bills))
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_bad_filter() {
        let result = Args::try_parse_from(["expenses", "list", "--category", "Groceries"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_init() {
        let args = parse(&["init", "--storage-key", "travel"]);
        match args.command() {
            Command::Init(init) => assert_eq!(init.storage_key(), "travel"),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
