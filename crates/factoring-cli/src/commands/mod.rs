pub mod init;
pub mod invoke;
pub mod status;

use anyhow::{Context, Result};
use factoring::prelude::*;
use std::path::Path;

/// Open the LMDB-backed store from a config file or a bare path
pub fn open_db(db_path: &Path, config: Option<&Path>) -> Result<FactoringDb> {
    let cfg = match config {
        Some(config_path) => FactoringConfig::from_json_file(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?,
        None => FactoringConfig::new(db_path.to_path_buf()),
    };

    tracing::debug!("Opening store at {}", cfg.path.display());
    let db = FactoringDb::open_with_config(cfg).context("Failed to open store")?;
    Ok(db)
}

/// Print a response and turn a failure into an error
pub fn report(response: &Response) -> Result<()> {
    println!("Status: {} ({:?})", response.status.code(), response.status);
    if !response.message.is_empty() {
        println!("Message: {}", response.message);
    }

    if !response.is_success() {
        anyhow::bail!("invocation failed: {}", response.message);
    }
    Ok(())
}
