use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Desktop browser UA sent with every page fetch. Several storefronts serve a
/// stripped page (no JSON-LD, no cart button) to unknown agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// config. Decoupled from the process environment so tests can pass a
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("STOCKWATCH_LOG_LEVEL", "info");
    let targets_path = PathBuf::from(or_default("STOCKWATCH_TARGETS_PATH", "./urls.txt"));
    let log_path = PathBuf::from(or_default("STOCKWATCH_LOG_PATH", "./stock_check.log"));
    let request_timeout_secs = parse_u64("STOCKWATCH_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("STOCKWATCH_USER_AGENT", DEFAULT_USER_AGENT);
    let poll_interval_secs = parse_u64("STOCKWATCH_POLL_INTERVAL_SECS", "300")?;

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOCKWATCH_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        log_level,
        targets_path,
        log_path,
        request_timeout_secs,
        user_agent,
        poll_interval_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
