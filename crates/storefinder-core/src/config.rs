use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Every setting has a default, so an empty environment yields a working
/// development config pointed at a backend on `127.0.0.1:5000`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("STOREFINDER_ENV", "development"))?;

    let bind_addr = or_default("STOREFINDER_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("STOREFINDER_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("STOREFINDER_LOG_LEVEL", "info");

    let backend_url = parse_http_url(
        "STOREFINDER_BACKEND_URL",
        &or_default("STOREFINDER_BACKEND_URL", "http://127.0.0.1:5000"),
    )?;
    let proxy_url = parse_http_url(
        "STOREFINDER_PROXY_URL",
        &or_default("STOREFINDER_PROXY_URL", "http://127.0.0.1:3000"),
    )?;
    let geolocation_url = optional("STOREFINDER_GEOLOCATION_URL")
        .map(|raw| parse_http_url("STOREFINDER_GEOLOCATION_URL", &raw))
        .transpose()?;

    let upstream_timeout_secs = optional("STOREFINDER_UPSTREAM_TIMEOUT_SECS")
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| invalid("STOREFINDER_UPSTREAM_TIMEOUT_SECS", e.to_string()))
        })
        .transpose()?;

    let page_size = optional("STOREFINDER_PAGE_SIZE")
        .map(|raw| match raw.parse::<usize>() {
            Ok(0) => Err(invalid(
                "STOREFINDER_PAGE_SIZE",
                "page size must be at least 1".to_string(),
            )),
            Ok(n) => Ok(n),
            Err(e) => Err(invalid("STOREFINDER_PAGE_SIZE", e.to_string())),
        })
        .transpose()?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        backend_url,
        upstream_timeout_secs,
        proxy_url,
        geolocation_url,
        page_size,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOREFINDER_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Accepts only `http://` and `https://` URLs with a host, trimming any
/// trailing slash so paths can be appended uniformly.
fn parse_http_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let trimmed = raw.trim();
    let url = url::Url::parse(trimmed).map_err(|e| invalid(format!("'{raw}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "'{raw}' must start with http:// or https://"
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(format!("'{raw}' has no host")));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
