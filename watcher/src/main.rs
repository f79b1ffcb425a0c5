//! marquee watcher entry point.
//!
//! Initialises tracing, parses configuration, opens the watched log, and
//! drives the refresh loop until SIGTERM or Ctrl-C.

mod assemble;
mod markup;
mod session;
mod snapshots;
mod store;
mod surface;
mod tail;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal::unix::SignalKind;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

use crate::session::WatchSession;
use crate::snapshots::CommandInspector;
use crate::surface::AnsiSurface;

/// Renders a live, color-coded tail of a system log over the login window.
#[derive(Debug, Parser)]
#[command(name = "marquee-watcher", version)]
struct Config {
    /// Log file to follow.
    #[arg(long, env = "MARQUEE_LOG_FILE", default_value = "/var/log/jamf.log")]
    log_file: PathBuf,

    /// Substring that selects processes for the process snapshot.
    #[arg(long, env = "MARQUEE_PROCESS_FILTER", default_value = "jamf")]
    process_filter: String,

    /// Seconds between refresh passes.
    #[arg(long, env = "MARQUEE_INTERVAL_SECS", default_value_t = 5)]
    interval_secs: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    tracing::info!(
        log_file = %config.log_file.display(),
        interval_secs = config.interval_secs,
        "marquee-watcher starting"
    );

    let mut session = WatchSession::start(
        &config.log_file,
        CommandInspector,
        AnsiSurface::new(),
        config.process_filter.clone(),
    )
    .await?;

    let mut ticks = tokio::time::interval(Duration::from_secs(config.interval_secs));
    // A slow pass must not pile up extra ticks; refreshes stay serial.
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut sigterm =
        tokio::signal::unix::signal(SignalKind::terminate()).context("installing SIGTERM handler")?;

    // The first tick fires immediately, so the initial pass reads whatever
    // the file already holds.
    loop {
        tokio::select! {
            _ = ticks.tick() => session.refresh().await,
            _ = sigterm.recv() => break,
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    // Dropping the session closes the watched file with the timer.
    tracing::info!("marquee-watcher stopping");
    Ok(())
}
