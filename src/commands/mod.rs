//! Command handlers for the penny CLI.
//!
//! This module contains implementations for all CLI subcommands. Each handler drives an `App`
//! over the configured store, the same way an interactive front end would.

mod add;
mod categories;
mod dashboard;
mod delete;
mod edit;
mod init;
mod list;

use crate::editor::EditorStatus;
use crate::error::{ErrorType, IntoResult};
use crate::model::{Amount, Transaction};
use crate::Result;
use anyhow::anyhow;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use add::add;
pub use categories::categories;
pub use dashboard::dashboard;
pub use delete::delete;
pub use edit::edit;
pub use init::init;
pub use list::list;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Turns the editor's status after a save into a command result.
fn check_saved(status: EditorStatus) -> Result<()> {
    match status {
        EditorStatus::Completed => Ok(()),
        EditorStatus::Rejected(e) => Err::<(), _>(e).pub_result(ErrorType::Request),
        EditorStatus::Failed(message) => {
            Err::<(), _>(anyhow!(message)).pub_result(ErrorType::Store)
        }
        other => Err::<(), _>(anyhow!("The save did not finish, the editor is {other:?}"))
            .pub_result(ErrorType::Store),
    }
}

/// The amount with its cash-flow direction, e.g. `+$2,000.00` or `-$52.49`.
fn signed_amount(t: &Transaction) -> String {
    if t.is_expense() {
        (Amount::ZERO - t.amount()).to_string()
    } else {
        format!("+{}", t.amount())
    }
}

/// One line of a transaction listing.
fn format_row(t: &Transaction) -> String {
    format!(
        "{}  {:<24}  {:>14}  {:<13}  {}",
        t.date().format("%Y-%m-%d"),
        t.title(),
        signed_amount(t),
        t.category().display_name(),
        t.id()
    )
}
