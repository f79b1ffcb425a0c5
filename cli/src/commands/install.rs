//! `marquee-install` — install and activate the login-window watcher agent.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::application::services::reconcile;
use crate::domain::AgentDescriptor;
use crate::domain::descriptor::LOGIN_WINDOW_SESSION;
use crate::domain::paths;
use crate::infra::launchctl::Launchctl;
use crate::infra::records::PlistRecords;
use crate::output::{OutputContext, TerminalReporter};

/// Name of the watcher binary inside the payload directory.
const WATCHER_BIN: &str = "marquee-watcher";

/// Install the provisioning watcher as a login-window launch agent.
#[derive(Parser)]
#[command(name = "marquee-install", version)]
pub struct InstallArgs {
    /// Agent label (reverse-DNS)
    #[arg(long, default_value = "com.marquee.watcher")]
    pub label: String,

    /// Directory that receives the agent record
    #[arg(long, default_value = paths::AGENTS_DIR)]
    pub agents_dir: PathBuf,

    /// Directory that receives the watcher payload
    #[arg(long, default_value = paths::SUPPORT_DIR)]
    pub support_dir: PathBuf,

    /// Directory that receives the agent's log
    #[arg(long, default_value = paths::LOGS_DIR)]
    pub logs_dir: PathBuf,

    /// Watcher binary to install (default: marquee-watcher next to this
    /// executable)
    #[arg(long)]
    pub payload: Option<PathBuf>,

    /// Log file the installed watcher will follow
    #[arg(long, default_value = "/var/log/jamf.log")]
    pub log_file: PathBuf,

    /// Substring the watcher greps the process table for
    #[arg(long, default_value = "jamf")]
    pub process_filter: String,

    /// Seconds between watcher refresh passes
    #[arg(long, default_value_t = 5)]
    pub interval_secs: u64,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl InstallArgs {
    fn payload_source(&self) -> Result<PathBuf> {
        if let Some(payload) = &self.payload {
            return Ok(payload.clone());
        }
        let exe = std::env::current_exe().context("locating this executable")?;
        let dir = exe
            .parent()
            .context("this executable has no parent directory")?;
        Ok(dir.join(WATCHER_BIN))
    }

    /// Desired agent state: a login-window agent running the installed
    /// payload with this invocation's watcher flags.
    fn descriptor(&self, payload_path: &Path, log: &Path) -> AgentDescriptor {
        AgentDescriptor {
            label: self.label.clone(),
            program_arguments: vec![
                payload_path.display().to_string(),
                "--log-file".to_string(),
                self.log_file.display().to_string(),
                "--process-filter".to_string(),
                self.process_filter.clone(),
                "--interval-secs".to_string(),
                self.interval_secs.to_string(),
            ],
            limit_load_to_session_type: vec![LOGIN_WINDOW_SESSION.to_string()],
            run_at_load: true,
            keep_alive: false,
            standard_out_path: log.to_path_buf(),
            standard_error_path: log.to_path_buf(),
        }
    }
}

/// Run `marquee-install`.
///
/// # Errors
///
/// Returns an error if the label is invalid, the payload cannot be
/// read, or a record or payload write fails. Activation failures are
/// warnings, not errors.
pub async fn run(args: &InstallArgs) -> Result<()> {
    AgentDescriptor::validate_label(&args.label)?;
    let ctx = OutputContext::new(args.no_color, args.quiet);
    let reporter = TerminalReporter::new(&ctx);

    ctx.header(&format!("Installing {}", args.label));

    let source = args.payload_source()?;
    let content = fs::read(&source)
        .with_context(|| format!("reading watcher payload {}", source.display()))?;

    for dir in [&args.agents_dir, &args.support_dir, &args.logs_dir] {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let payload_path = paths::payload_dir(&args.support_dir, &args.label).join(WATCHER_BIN);
    let record_path = paths::descriptor_path(&args.agents_dir, &args.label);
    let log = paths::log_path(&args.logs_dir, &args.label);
    let desired = args.descriptor(&payload_path, &log);

    let records = PlistRecords::privileged();
    reconcile::sync_payload(&content, &payload_path, &records, &reporter)?;
    let control = Launchctl::default_runner();
    reconcile::apply(&desired, &record_path, &records, &control, &reporter).await?;

    ctx.kv("record", &record_path.display().to_string());
    ctx.kv("payload", &payload_path.display().to_string());
    ctx.kv("log", &log.display().to_string());
    ctx.success("Watcher agent installed.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_args() -> InstallArgs {
        InstallArgs::parse_from(["marquee-install"])
    }

    #[test]
    fn descriptor_pins_the_watcher_flags() {
        let args = InstallArgs::parse_from([
            "marquee-install",
            "--log-file",
            "/var/log/jamf.log",
            "--process-filter",
            "jamf",
            "--interval-secs",
            "7",
        ]);
        let desired = args.descriptor(
            Path::new("/Library/Application Support/com.marquee.watcher/marquee-watcher"),
            Path::new("/Library/Logs/com.marquee.watcher.log"),
        );

        assert_eq!(
            desired.program_arguments,
            vec![
                "/Library/Application Support/com.marquee.watcher/marquee-watcher",
                "--log-file",
                "/var/log/jamf.log",
                "--process-filter",
                "jamf",
                "--interval-secs",
                "7",
            ]
        );
        assert!(desired.is_login_window());
        assert!(desired.run_at_load);
        assert!(!desired.keep_alive);
        assert_eq!(desired.standard_out_path, desired.standard_error_path);
    }

    #[test]
    fn explicit_payload_path_wins_over_the_sibling_default() {
        let mut args = default_args();
        args.payload = Some(PathBuf::from("/tmp/staged-watcher"));
        assert_eq!(
            args.payload_source().expect("payload source"),
            PathBuf::from("/tmp/staged-watcher")
        );
    }

    #[tokio::test]
    async fn invalid_labels_fail_before_any_write() {
        let mut args = default_args();
        args.label = "nodots".to_string();
        let err = run(&args).await.expect_err("label should not validate");
        assert!(err.to_string().contains("Invalid agent label"));
    }
}
