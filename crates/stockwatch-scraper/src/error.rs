use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}

impl ScraperError {
    /// `true` when the request was abandoned because the configured timeout elapsed.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, ScraperError::Http(e) if e.is_timeout())
    }
}

#[derive(Debug, Error)]
pub enum TargetsError {
    #[error("target list '{}' not found", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read target list '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
