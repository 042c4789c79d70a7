use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    let log_level = or_default("POISCAN_LOG_LEVEL", "info");
    let store_path = PathBuf::from(or_default("POISCAN_STORE_PATH", "./.poiscan/store.json"));
    let places_base_url = or_default("POISCAN_PLACES_BASE_URL", "https://places.googleapis.com");
    let request_timeout_secs = parse_u64("POISCAN_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("POISCAN_USER_AGENT", "poiscan/0.1 (place-audit)");
    let cache_max_age_secs = parse_u64("POISCAN_CACHE_MAX_AGE_SECS", "1800")?;
    let places_api_key = lookup("POISCAN_PLACES_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "POISCAN_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        log_level,
        store_path,
        places_base_url,
        request_timeout_secs,
        user_agent,
        cache_max_age_secs,
        places_api_key,
    })
}
