use std::path::PathBuf;

/// Runtime settings for a stock-check run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Newline-delimited list of product page URLs.
    pub targets_path: PathBuf,
    /// Append-only event log.
    pub log_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Delay between polling rounds in watch mode.
    pub poll_interval_secs: u64,
}
