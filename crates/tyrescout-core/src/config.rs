use crate::app_config::AppConfig;
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
/// Decoupled from the real environment so tests can pass a `HashMap` lookup.
/// Credentials are optional here; the commands that need them check for
/// their presence.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    let parse_flag = |var: &str, default: &str| -> Result<bool, ConfigError> {
        parse_bool(&or_default(var, default)).ok_or_else(|| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: "expected true/false, yes/no, or 1/0".to_string(),
        })
    };

    let non_empty = |var: &str| lookup(var).ok().filter(|v| !v.trim().is_empty());

    let google_api_key = non_empty("GOOGLE_API_KEY");
    let sheets_access_token = non_empty("GOOGLE_SHEETS_ACCESS_TOKEN");
    let sheets_title = or_default("TYRESCOUT_SHEETS_TITLE", "Tractor Tyre Repair Companies");

    let data_dir = PathBuf::from(or_default("TYRESCOUT_DATA_DIR", "./data"));
    let search_plan_path =
        PathBuf::from(or_default("TYRESCOUT_SEARCH_PATH", "./config/search.yaml"));
    let log_level = or_default("TYRESCOUT_LOG_LEVEL", "info");

    let search_delay_ms = parse_u64("TYRESCOUT_SEARCH_DELAY_MS", "300")?;
    let page_delay_ms = parse_u64("TYRESCOUT_PAGE_DELAY_MS", "1000")?;
    let request_timeout_secs = parse_u64("TYRESCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("TYRESCOUT_USER_AGENT", "tyrescout/0.1 (business-research)");
    let max_retries = parse_u32("TYRESCOUT_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("TYRESCOUT_RETRY_BACKOFF_BASE_MS", "1000")?;

    let fetch_place_details = parse_flag("TYRESCOUT_FETCH_PLACE_DETAILS", "true")?;
    let review_apply_defaults = parse_flag("TYRESCOUT_REVIEW_DEFAULTS", "false")?;

    Ok(AppConfig {
        google_api_key,
        sheets_access_token,
        sheets_title,
        data_dir,
        search_plan_path,
        log_level,
        search_delay_ms,
        page_delay_ms,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        fetch_place_details,
        review_apply_defaults,
    })
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
