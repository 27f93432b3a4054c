use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    /// When `None`, snapshots go to flat files under `data_dir` and signals
    /// are logged to the console instead of persisted.
    pub database_url: Option<String>,
    pub log_level: String,
    pub companies_path: PathBuf,
    pub data_dir: PathBuf,
    pub github_token: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_checks: usize,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub repo_check_interval_secs: u64,
    pub store_docs_check_interval_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("companies_path", &self.companies_path)
            .field("data_dir", &self.data_dir)
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_concurrent_checks", &self.max_concurrent_checks)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("repo_check_interval_secs", &self.repo_check_interval_secs)
            .field(
                "store_docs_check_interval_secs",
                &self.store_docs_check_interval_secs,
            )
            .finish()
    }
}
