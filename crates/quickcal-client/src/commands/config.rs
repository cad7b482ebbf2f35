//! Configuration commands.

use std::path::Path;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &ClientConfig, path: &Path) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", path.display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration file at `path`.
///
/// A missing file is valid: every setting has a default.
pub fn validate(path: &Path) -> ClientResult<()> {
    if !path.exists() {
        println!("No configuration file at {}; using defaults.", path.display());
        return Ok(());
    }

    let config = ClientConfig::load_from(path).map_err(ClientError::Config)?;
    println!("Timestamps without an offset are read in zone {}.", config.environment.zone);
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> ClientResult<()> {
    println!("config: {}", path.display());
    Ok(())
}
