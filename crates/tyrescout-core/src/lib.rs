//! Shared domain types and configuration for the tyrescout workspace.

pub mod app_config;
pub mod config;
pub mod record;
pub mod search_plan;
pub mod unknown;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use record::{BusinessRecord, CompanyType, Confidence, Location, QualityFlag};
pub use search_plan::{load_search_plan, SearchPlan};
pub use unknown::UNKNOWN;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {kind}: {value}")]
    InvalidVariant { kind: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read search plan at {path}: {source}")]
    SearchPlanIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse search plan: {0}")]
    SearchPlanParse(#[from] serde_yaml::Error),

    #[error("search plan validation failed: {0}")]
    Validation(String),
}
