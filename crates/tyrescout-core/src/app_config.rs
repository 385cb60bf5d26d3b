use std::path::PathBuf;

use crate::ConfigError;

#[derive(Clone)]
pub struct AppConfig {
    pub google_api_key: Option<String>,
    pub sheets_access_token: Option<String>,
    pub sheets_title: String,
    pub data_dir: PathBuf,
    pub search_plan_path: PathBuf,
    pub log_level: String,
    pub search_delay_ms: u64,
    pub page_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub fetch_place_details: bool,
    pub review_apply_defaults: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "sheets_access_token",
                &self.sheets_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("sheets_title", &self.sheets_title)
            .field("data_dir", &self.data_dir)
            .field("search_plan_path", &self.search_plan_path)
            .field("log_level", &self.log_level)
            .field("search_delay_ms", &self.search_delay_ms)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("fetch_place_details", &self.fetch_place_details)
            .field("review_apply_defaults", &self.review_apply_defaults)
            .finish()
    }
}

impl AppConfig {
    /// The Places key, required by `collect` and `run`.
    pub fn require_google_api_key(&self) -> Result<&str, ConfigError> {
        self.google_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_API_KEY".to_string()))
    }

    pub fn require_sheets_access_token(&self) -> Result<&str, ConfigError> {
        self.sheets_access_token
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_SHEETS_ACCESS_TOKEN".to_string()))
    }
}
