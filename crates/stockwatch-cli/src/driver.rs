//! Poll driver: runs the fetch → extract → reconcile pipeline over the target
//! list once, or repeatedly with a fixed delay between rounds.

use std::path::Path;
use std::time::Duration;

use stockwatch_scraper::{
    extract_signals, load_targets, reconcile, PageClient, ScraperError, StructuredAvailability,
    TargetsError,
};

use crate::sink::{EventSink, SinkEvent, StatusRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PollMode {
    SingleRound,
    /// Re-read the target list and run a round every `interval` until the
    /// list is empty or missing.
    Continuous { interval: Duration },
}

/// Result of checking one target.
#[derive(Debug)]
pub(crate) enum CheckOutcome {
    Checked(StatusRecord),
    /// The page loaded but carried no JSON-LD `Product` block; reconciliation
    /// was skipped.
    NoStructuredData,
    FetchFailed(ScraperError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RoundSummary {
    pub checked: usize,
    pub discrepancies: usize,
    pub no_structured_data: usize,
    pub fetch_failed: usize,
}

/// Fetches one target and turns the page into a [`CheckOutcome`].
pub(crate) async fn check_target(client: &PageClient, target: &str) -> CheckOutcome {
    let html = match client.fetch_page(target).await {
        Ok(html) => html,
        Err(e) => return CheckOutcome::FetchFailed(e),
    };

    let signals = extract_signals(&html);
    match (signals.availability, signals.control) {
        (StructuredAvailability::Absent, _) | (_, None) => CheckOutcome::NoStructuredData,
        (availability, Some(control)) => {
            CheckOutcome::Checked(StatusRecord::now(target, reconcile(availability, control)))
        }
    }
}

/// Checks every target in order, emitting one event per target.
///
/// A failure on one target never stops the round.
pub(crate) async fn run_round<S: EventSink>(
    client: &PageClient,
    targets: &[String],
    sink: &mut S,
) -> RoundSummary {
    let mut summary = RoundSummary::default();

    for target in targets {
        let event = match check_target(client, target).await {
            CheckOutcome::Checked(record) => {
                summary.checked += 1;
                if record.verdict.is_discrepancy() {
                    summary.discrepancies += 1;
                }
                SinkEvent::Status(record)
            }
            CheckOutcome::NoStructuredData => {
                summary.no_structured_data += 1;
                SinkEvent::NoStructuredData {
                    target: target.clone(),
                }
            }
            CheckOutcome::FetchFailed(e) => {
                summary.fetch_failed += 1;
                if e.is_timeout() {
                    tracing::debug!(url = %target, "fetch timed out");
                }
                SinkEvent::FetchFailed {
                    target: target.clone(),
                    cause: e.to_string(),
                }
            }
        };
        tracing::debug!(url = %target, verdict = ?event.verdict(), "target processed");
        sink.emit(&event);
    }

    summary
}

/// Runs the driver until it has nothing left to do and returns the number of
/// completed rounds.
///
/// The target list is read at the start of every round, so edits take effect
/// without a restart. A missing, unreadable or empty list ends the run.
pub(crate) async fn run<S: EventSink>(
    client: &PageClient,
    targets_path: &Path,
    mode: PollMode,
    sink: &mut S,
) -> usize {
    let mut rounds = 0usize;

    loop {
        let targets = read_targets_or_report(targets_path, sink).await;
        if targets.is_empty() {
            tracing::info!(path = %targets_path.display(), rounds, "no valid URLs found; exiting");
            return rounds;
        }

        let summary = run_round(client, &targets, sink).await;
        rounds += 1;
        tracing::info!(
            round = rounds,
            targets = targets.len(),
            checked = summary.checked,
            discrepancies = summary.discrepancies,
            no_structured_data = summary.no_structured_data,
            fetch_failed = summary.fetch_failed,
            "round complete"
        );

        match mode {
            PollMode::SingleRound => return rounds,
            PollMode::Continuous { interval } => tokio::time::sleep(interval).await,
        }
    }
}

async fn read_targets_or_report<S: EventSink>(path: &Path, sink: &mut S) -> Vec<String> {
    match load_targets(path).await {
        Ok(targets) => targets,
        Err(TargetsError::NotFound { path }) => {
            sink.emit(&SinkEvent::TargetListMissing { path });
            Vec::new()
        }
        Err(TargetsError::Io { path, source }) => {
            tracing::debug!(error = %source, "failed to read target list");
            sink.emit(&SinkEvent::TargetListUnreadable {
                path,
                cause: source.to_string(),
            });
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "driver_test.rs"]
mod tests;
