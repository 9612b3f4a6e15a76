mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, time::Duration};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";
pub const API_URL_VAR: &str = "HUGGINGFACE_API_URL";
pub const API_TOKEN_VAR: &str = "HUGGINGFACE_API_TOKEN";
pub const TIMEOUT_VAR: &str = "EXTERNAL_API_TIMEOUT";
pub const PORT_VAR: &str = "PORT";

/// Loads the YAML file (if any) and applies environment overrides on top.
///
/// An explicit `CONFIG_PATH` must be readable; the default `config.yaml` is
/// optional and defaults are used when it is absent.
pub async fn load() -> Result<Config> {
    load_with(DEFAULT_CONFIG_PATH, |key| env::var(key).ok()).await
}

/// [`load`] with the default file location and variable source supplied by the caller.
pub async fn load_with<F>(default_path: &str, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let config = if let Some(path) = lookup(CONFIG_PATH_VAR) {
        from_file(&path).await?
    } else if tokio::fs::try_exists(default_path).await? {
        from_file(default_path).await?
    } else {
        debug!("No configuration file found, using defaults");
        Config::default()
    };

    apply_env_overrides(config, lookup)
}

pub async fn from_file(path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", path);

    let config_str = tokio::fs::read_to_string(path).await?;
    from_yaml(&config_str)
}

pub fn from_yaml(yaml: &str) -> Result<Config> {
    // An empty document deserializes to unit, not to an empty mapping.
    if yaml.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(API_URL_VAR) {
        config.upstream.api_url = url;
    }

    if let Some(token) = lookup(API_TOKEN_VAR) {
        config.upstream.api_token = if token.is_empty() { None } else { Some(token) };
    }

    if let Some(timeout) = lookup(TIMEOUT_VAR) {
        let secs: f64 = timeout.trim().parse().map_err(|_| {
            Error::config(format!("{} must be a number of seconds, got '{}'", TIMEOUT_VAR, timeout))
        })?;
        if secs <= 0.0 || Duration::try_from_secs_f64(secs).is_err() {
            return Err(Error::config(format!(
                "{} must be a positive, representable number of seconds, got '{}'",
                TIMEOUT_VAR, timeout
            )));
        }
        config.upstream.timeout_secs = secs;
    }

    if let Some(port) = lookup(PORT_VAR) {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("{} must be a valid port, got '{}'", PORT_VAR, port)))?;
    }

    Ok(config)
}
