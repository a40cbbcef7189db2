use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory and:
/// - Creates an initial `config.json` file with default settings
/// - Creates an empty SQLite database
///
/// # Arguments
/// - `penny_home` - The directory that will be the root of data directory, e.g. `$HOME/penny`
///
/// # Errors
/// - Returns an error if the directory is already initialized or any file operations fail.
pub async fn init(penny_home: &Path) -> Result<Out<()>> {
    let config = Config::create(penny_home)
        .await
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the penny directory at {}",
        config.root().display()
    )
    .into())
}
