mod app_config;
mod companies;
mod config;
pub mod rules;
mod signal;

use thiserror::Error;

pub use app_config::AppConfig;
pub use companies::{load_companies, CompaniesFile, CompanyConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use signal::{Signal, SignalKind, SourceKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read companies file {path}: {source}")]
    CompaniesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse companies file: {0}")]
    CompaniesFileParse(#[from] serde_yaml::Error),

    #[error("invalid companies config: {0}")]
    Validation(String),
}
