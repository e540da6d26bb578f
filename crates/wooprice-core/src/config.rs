use crate::app_config::{AppConfig, AuthMode};
use crate::ConfigError;

/// Largest `per_page` value the WooCommerce REST API accepts.
const MAX_PAGE_SIZE: u32 = 100;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let base_url = require("WOOPRICE_BASE_URL")?;
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "WOOPRICE_BASE_URL".to_string(),
            reason: format!("expected an http:// or https:// URL, got \"{base_url}\""),
        });
    }

    let consumer_key = or_default("WOOPRICE_CONSUMER_KEY", "");
    let consumer_secret = or_default("WOOPRICE_CONSUMER_SECRET", "");
    let auth_mode = parse_auth_mode(&or_default("WOOPRICE_AUTH_MODE", "auto"))?;

    let request_timeout_secs = parse_u64("WOOPRICE_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "WOOPRICE_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let page_size = parse_u32("WOOPRICE_PAGE_SIZE", "100")?;
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::InvalidEnvVar {
            var: "WOOPRICE_PAGE_SIZE".to_string(),
            reason: format!("must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"),
        });
    }

    let user_agent = or_default("WOOPRICE_USER_AGENT", "wooprice/0.1 (price-maintenance)");
    let log_level = or_default("WOOPRICE_LOG_LEVEL", "warn");

    Ok(AppConfig {
        base_url,
        consumer_key,
        consumer_secret,
        auth_mode,
        request_timeout_secs,
        page_size,
        user_agent,
        log_level,
    })
}

/// Parse a string into an `AuthMode` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values so a typo
/// does not silently fall back to a mode the store will reject.
fn parse_auth_mode(s: &str) -> Result<AuthMode, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "auto" => Ok(AuthMode::Auto),
        "oauth1" | "oauth" => Ok(AuthMode::OAuth1),
        "basic" => Ok(AuthMode::Basic),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WOOPRICE_AUTH_MODE".to_string(),
            reason: format!("unknown auth mode \"{other}\" (expected auto, oauth1 or basic)"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
