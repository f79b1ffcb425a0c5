//! `marquee-remove` — best-effort teardown of installed watcher agents.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::application::services::teardown;
use crate::domain::paths;
use crate::infra::accounts::DsclAccounts;
use crate::infra::launchctl::Launchctl;
use crate::infra::records::PlistRecords;
use crate::output::{OutputContext, TerminalReporter};

/// Remove the watcher agent from every scope it may be installed in.
///
/// Device-management runners invoke removal tools with positional
/// arguments prepended (mount point, computer name, username) and the
/// odd stray flag; parsing tolerates both instead of failing the
/// policy run.
#[derive(Parser)]
#[command(name = "marquee-remove", version, ignore_errors = true)]
pub struct RemoveArgs {
    /// Label of the agent to remove
    #[arg(long)]
    pub agent_name: Option<String>,

    /// launchd domain the agent was installed in
    #[arg(long, default_value = "system")]
    pub agent_domain: String,

    /// Directory holding the system-scope record
    #[arg(long, default_value = paths::AGENTS_DIR)]
    pub agent_directory: PathBuf,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Positional arguments a management runner prepends; ignored.
    #[arg(hide = true, num_args = 0..)]
    pub passthrough: Vec<String>,
}

/// Run `marquee-remove`.
///
/// Teardown itself is best-effort and always completes; the only error
/// is a missing `--agent-name`.
///
/// # Errors
///
/// Returns an error if `--agent-name` was not supplied.
pub async fn run(args: &RemoveArgs) -> Result<()> {
    let name = args
        .agent_name
        .as_deref()
        .context("--agent-name is required")?;
    let ctx = OutputContext::new(args.no_color, args.quiet);
    let reporter = TerminalReporter::new(&ctx);

    ctx.header(&format!("Removing {name}"));

    let records = PlistRecords::privileged();
    let control = Launchctl::default_runner();
    let catalog = DsclAccounts::default_runner();
    teardown::remove(
        name,
        &args.agent_domain,
        &args.agent_directory,
        &catalog,
        &records,
        &control,
        &reporter,
    )
    .await;

    ctx.success("Teardown complete.");
    Ok(())
}
