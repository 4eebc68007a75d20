//! Configuration commands.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &ClientConfig) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", ClientConfig::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    config.validate().map_err(ClientError::Config)?;

    match config.feed.relay() {
        Some(relay) => println!("Feed {} is fetched through {}.", config.feed.url, relay),
        None => println!("Feed {} is fetched directly.", config.feed.url),
    }
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> ClientResult<()> {
    let config_path = ClientConfig::default_path();
    println!("config: {}", config_path.display());
    Ok(())
}
