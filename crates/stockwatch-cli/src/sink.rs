//! Event sink for stock-check results.
//!
//! The driver never logs results through global state: every status line,
//! warning and fetch error goes through an [`EventSink`] handed to it at
//! startup. [`LogSink`] is the production sink; `Vec<SinkEvent>` collects
//! events in tests.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use stockwatch_scraper::Verdict;
use tracing::Level;

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reconciled verdict for one target in one round. Only built from
/// [`stockwatch_scraper::reconcile`] output, which always has a status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatusRecord {
    pub timestamp: DateTime<Local>,
    pub target: String,
    pub verdict: Verdict,
}

impl StatusRecord {
    pub fn now(target: &str, verdict: Verdict) -> Self {
        Self {
            timestamp: Local::now(),
            target: target.to_owned(),
            verdict,
        }
    }

    /// `timestamp | target | verdict message`
    pub fn line(&self) -> String {
        format!(
            "{} | {} | {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.target,
            self.verdict.message().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SinkEvent {
    Status(StatusRecord),
    NoStructuredData { target: String },
    FetchFailed { target: String, cause: String },
    TargetListMissing { path: PathBuf },
    TargetListUnreadable { path: PathBuf, cause: String },
}

impl SinkEvent {
    pub fn level(&self) -> Level {
        match self {
            SinkEvent::Status(_) => Level::INFO,
            SinkEvent::NoStructuredData { .. } => Level::WARN,
            SinkEvent::FetchFailed { .. }
            | SinkEvent::TargetListMissing { .. }
            | SinkEvent::TargetListUnreadable { .. } => Level::ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SinkEvent::Status(record) => record.line(),
            SinkEvent::NoStructuredData { target } => {
                format!("Warning: No JSON-LD stock data found for {target}.")
            }
            SinkEvent::FetchFailed { target, cause } => {
                format!("Error fetching {target}: {cause}")
            }
            SinkEvent::TargetListMissing { path } => {
                format!("Error: '{}' not found.", path.display())
            }
            SinkEvent::TargetListUnreadable { path, cause } => {
                format!("Error: could not read '{}': {cause}", path.display())
            }
        }
    }

    /// Verdict this event reports, `None` for run-level events.
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            SinkEvent::Status(record) => Some(record.verdict),
            SinkEvent::NoStructuredData { .. } => Some(Verdict::NoStructuredDataAvailable),
            SinkEvent::FetchFailed { .. } => Some(Verdict::FetchFailed),
            SinkEvent::TargetListMissing { .. } | SinkEvent::TargetListUnreadable { .. } => None,
        }
    }

    #[cfg(test)]
    pub fn target(&self) -> Option<&str> {
        match self {
            SinkEvent::Status(record) => Some(&record.target),
            SinkEvent::NoStructuredData { target } | SinkEvent::FetchFailed { target, .. } => {
                Some(target)
            }
            SinkEvent::TargetListMissing { .. } | SinkEvent::TargetListUnreadable { .. } => None,
        }
    }
}

pub(crate) trait EventSink {
    fn emit(&mut self, event: &SinkEvent);
}

impl EventSink for Vec<SinkEvent> {
    fn emit(&mut self, event: &SinkEvent) {
        self.push(event.clone());
    }
}

/// Appends `timestamp - LEVEL - message` lines to a log file and mirrors the
/// bare message to stdout.
pub(crate) struct LogSink {
    file: File,
    path: PathBuf,
    echo: bool,
}

impl LogSink {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
            echo: true,
        })
    }

    /// Disables the stdout mirror.
    #[cfg(test)]
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &SinkEvent) {
        let message = event.message();
        let line = format!(
            "{} - {} - {}\n",
            Local::now().format(TIMESTAMP_FORMAT),
            level_name(event.level()),
            message
        );
        if let Err(e) = self.file.write_all(line.as_bytes()) {
            tracing::error!(path = %self.path.display(), error = %e, "failed to append to event log");
        }
        if self.echo {
            println!("{message}");
        }
    }
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}
