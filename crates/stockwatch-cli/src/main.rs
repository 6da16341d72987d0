mod driver;
mod sink;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::driver::PollMode;
use crate::sink::LogSink;

#[derive(Debug, Parser)]
#[command(name = "stockwatch-cli")]
#[command(about = "Check product pages for stock availability")]
struct Cli {
    /// Target list file (one URL per line); overrides `STOCKWATCH_TARGETS_PATH`.
    #[arg(long, global = true)]
    targets: Option<PathBuf>,

    /// Event log file; overrides `STOCKWATCH_LOG_PATH`.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check every target once and exit (default).
    Check,
    /// Check every target, then repeat after a fixed delay until the list is empty.
    Watch {
        /// Seconds between rounds; overrides `STOCKWATCH_POLL_INTERVAL_SECS`.
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = stockwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let targets_path = cli.targets.unwrap_or_else(|| config.targets_path.clone());
    let log_path = cli.log_file.unwrap_or_else(|| config.log_path.clone());

    let mode = match cli.command {
        None | Some(Commands::Check) => PollMode::SingleRound,
        Some(Commands::Watch { interval }) => {
            let secs = interval.unwrap_or(config.poll_interval_secs);
            tracing::info!(interval_secs = secs, "starting stock monitoring");
            PollMode::Continuous {
                interval: Duration::from_secs(secs),
            }
        }
    };

    let client =
        stockwatch_scraper::PageClient::new(config.request_timeout_secs, &config.user_agent)?;
    let mut sink = LogSink::open(&log_path)
        .with_context(|| format!("failed to open event log {}", log_path.display()))?;

    tokio::select! {
        rounds = driver::run(&client, &targets_path, mode, &mut sink) => {
            tracing::debug!(rounds, "stock check finished");
        }
        () = shutdown_signal() => {
            tracing::info!("interrupted; stopping stock check");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_defaults_to_single_check() {
        let cli = Cli::try_parse_from(["stockwatch-cli"]).expect("parse");
        assert!(cli.command.is_none());
        assert!(cli.targets.is_none());
    }

    #[test]
    fn watch_accepts_interval_and_global_paths() {
        let cli = Cli::try_parse_from([
            "stockwatch-cli",
            "watch",
            "--interval",
            "60",
            "--targets",
            "/srv/urls.txt",
            "--log-file",
            "/var/log/stock.log",
        ])
        .expect("parse");
        assert!(matches!(
            cli.command,
            Some(Commands::Watch { interval: Some(60) })
        ));
        assert_eq!(cli.targets, Some(PathBuf::from("/srv/urls.txt")));
        assert_eq!(cli.log_file, Some(PathBuf::from("/var/log/stock.log")));
    }

    #[test]
    fn help_is_handled_by_the_parser() {
        let err = Cli::try_parse_from(["stockwatch-cli", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
