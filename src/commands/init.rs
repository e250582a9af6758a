use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the expenses home directory and writes `config.json` with `storage_key`.
///
/// # Errors
/// - Returns an error if `storage_key` is invalid or any file operations fail.
pub async fn init(expenses_home: &Path, storage_key: &str) -> Result<Out<()>> {
    let config = Config::create(expenses_home, storage_key)
        .await
        .context("Unable to create the expenses directory and config")?;
    Ok(format!(
        "Successfully created the expenses directory at {}",
        config.root().display()
    )
    .into())
}
