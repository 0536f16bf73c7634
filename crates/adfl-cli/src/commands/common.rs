//! Shared helpers for CLI commands

use adfl_client::JsonExportClient;
use adfl_core::Config;
use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::GlobalArgs;

/// Load the config file (or defaults) and apply global overrides
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let path = global.config.as_deref().map(Path::new);
    let mut config = Config::load_or_default(path).context("Failed to load configuration")?;

    if let Some(dir) = &global.export_dir {
        config.export_dir = dir.clone();
    }
    Ok(config)
}

/// Metadata client over the configured export directory
pub(crate) fn export_client(config: &Config) -> JsonExportClient {
    log::debug!("Reading factory export from {}", config.export_dir);
    JsonExportClient::new(&config.export_dir)
}
