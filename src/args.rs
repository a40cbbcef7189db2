//! These structs provide the CLI interface for the penny CLI.

use crate::model::{Amount, Category, SortOption, TimeFrame, TransactionType};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;
use uuid::Uuid;

/// penny: A command-line tool for tracking personal income and expenses.
///
/// Record transactions with `add`, fix them with `edit` and remove them with `delete`. Use `list`
/// to search your history and `dashboard` to see totals, where your money goes and your most
/// recent activity for a chosen time frame.
///
/// Run `penny init` once before anything else to create the data directory.
#[derive(Debug, Parser, Clone)]
#[command(version)]
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
    /// Create the data directory, the configuration file and an empty database.
    ///
    /// By default the data directory is $HOME/penny. Pass --penny-home or set PENNY_HOME to put it
    /// somewhere else.
    Init,
    /// List transactions in a time frame, optionally narrowed by a search term.
    List(ListArgs),
    /// Show income and expense totals, spending by category and recent activity.
    Dashboard(DashboardArgs),
    /// Record a new transaction.
    Add(AddArgs),
    /// Change an existing transaction. Only the fields you pass are changed.
    Edit(EditArgs),
    /// Delete a transaction.
    Delete(DeleteArgs),
    /// Print the available categories and the transaction type each one belongs to.
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

    /// The directory where penny data and configuration is held. Defaults to ~/penny
    #[arg(long, env = "PENNY_HOME", default_value_t = default_penny_home())]
    penny_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, penny_home: PathBuf) -> Self {
        Self {
            log_level,
            penny_home: penny_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn penny_home(&self) -> &DisplayPath {
        &self.penny_home
    }
}

/// Args for the `penny list` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ListArgs {
    /// Only show transactions from this window. Defaults to the configured time frame.
    #[arg(long, value_enum)]
    time_frame: Option<TimeFrame>,

    /// Case-insensitive text to look for in titles and category names.
    #[arg(long)]
    search: Option<String>,

    /// How to order the list. Defaults to the configured sort option.
    #[arg(long, value_enum)]
    sort: Option<SortOption>,
}

impl ListArgs {
    pub fn new(
        time_frame: Option<TimeFrame>,
        search: Option<String>,
        sort: Option<SortOption>,
    ) -> Self {
        Self {
            time_frame,
            search,
            sort,
        }
    }

    pub fn time_frame(&self) -> Option<TimeFrame> {
        self.time_frame
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn sort(&self) -> Option<SortOption> {
        self.sort
    }
}

/// Args for the `penny dashboard` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct DashboardArgs {
    /// The window for the category breakdown and recent activity.
    #[arg(long, value_enum)]
    time_frame: Option<TimeFrame>,

    /// How to order recent activity.
    #[arg(long, value_enum)]
    sort: Option<SortOption>,
}

impl DashboardArgs {
    pub fn new(time_frame: Option<TimeFrame>, sort: Option<SortOption>) -> Self {
        Self { time_frame, sort }
    }

    pub fn time_frame(&self) -> Option<TimeFrame> {
        self.time_frame
    }

    pub fn sort(&self) -> Option<SortOption> {
        self.sort
    }
}

/// Args for the `penny add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    #[arg(long)]
    title: String,

    /// A positive amount, e.g. 52.49 or $1,200.
    #[arg(long)]
    amount: Amount,

    #[arg(long = "type", value_enum)]
    kind: TransactionType,

    /// Must belong to the chosen type. Run `penny categories` to see which is which.
    #[arg(long, value_enum)]
    category: Category,

    /// Either YYYY-MM-DD or an RFC 3339 timestamp. Defaults to now.
    #[arg(long, value_parser = parse_date)]
    date: Option<DateTime<Utc>>,

    #[arg(long)]
    notes: Option<String>,
}

impl AddArgs {
    pub fn new(
        title: impl Into<String>,
        amount: Amount,
        kind: TransactionType,
        category: Category,
    ) -> Self {
        Self {
            title: title.into(),
            amount,
            kind,
            category,
            date: None,
            notes: None,
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Args for the `penny edit` command.
#[derive(Debug, Parser, Clone)]
pub struct EditArgs {
    /// The id of the transaction to change, as shown by `penny list`.
    id: Uuid,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    amount: Option<Amount>,

    /// Changing the type without --category moves the transaction to the first category of the
    /// new type.
    #[arg(long = "type", value_enum)]
    kind: Option<TransactionType>,

    #[arg(long, value_enum)]
    category: Option<Category>,

    /// Either YYYY-MM-DD or an RFC 3339 timestamp.
    #[arg(long, value_parser = parse_date)]
    date: Option<DateTime<Utc>>,

    /// Pass an empty string to clear the notes.
    #[arg(long)]
    notes: Option<String>,
}

impl EditArgs {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            title: None,
            amount: None,
            kind: None,
            category: None,
            date: None,
            notes: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    pub fn kind(&self) -> Option<TransactionType> {
        self.kind
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Args for the `penny delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The id of the transaction to delete, as shown by `penny list`.
    id: Uuid,
}

impl DeleteArgs {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// Parses a calendar date (taken as midnight UTC) or a full RFC 3339 timestamp.
fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| format!("'{s}' is neither YYYY-MM-DD nor an RFC 3339 timestamp: {e}"))
}

fn default_penny_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("penny"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --penny-home or PENNY_HOME instead of relying on the default \
                penny home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("penny")
        }
    })
}

/// A `PathBuf` that implements `Display` so that clap can show it as a default value.
#[derive(Debug, Clone, PartialEq, Eq)]
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
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
