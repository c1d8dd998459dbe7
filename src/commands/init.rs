use crate::commands::Out;
use crate::{Config, Result};
use std::path::Path;

/// Creates the home directory, if needed, and writes a default `config.json` into it.
///
/// # Errors
/// - Returns an error if `config.json` already exists or any file operation fails.
pub fn init(home: &Path) -> Result<Out<()>> {
    let config = Config::create(home)
        .map_err(|e| e.context("Unable to create the wellness home directory and config"))?;
    Ok(format!(
        "Created {} with the journal at {}",
        config.config_path().display(),
        config.data_path().display()
    )
    .into())
}
