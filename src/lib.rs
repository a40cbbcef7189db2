//! penny: a personal finance tracker.
//!
//! Transactions are kept in a `TransactionStore`. The `query` module turns a list of them into
//! the views a user looks at (time-frame filtering, sorting, search and category totals), the
//! `editor` module runs the add/edit workflow with validation, and `state::App` ties both to a
//! store through a pure reducer.

pub mod args;
pub mod commands;
mod config;
pub mod editor;
mod error;
pub mod model;
pub mod query;
pub mod state;
pub mod store;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, ErrorType, Result, StoreError, ValidationError};
pub use state::App;
