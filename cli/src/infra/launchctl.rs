//! Infrastructure implementation of the `ServiceControl` port.
//!
//! `Launchctl<R>` routes every lifecycle transition through a
//! `CommandRunner`, so tests can record the exact argument vectors
//! without a real launchd.

use std::path::Path;
use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ServiceControl};
use crate::infra::command_runner::{DEFAULT_CMD_TIMEOUT, TokioCommandRunner};

/// Fixed path; launchctl is not looked up on PATH.
const LAUNCHCTL: &str = "/bin/launchctl";

/// Infrastructure adapter for the `launchctl` binary.
///
/// Generic over `R: CommandRunner` so that tests can inject a recording
/// runner without spawning real processes.
pub struct Launchctl<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> Launchctl<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl Launchctl<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT))
    }
}

fn record_arg(record: &Path) -> Result<&str> {
    record.to_str().context("record path is not valid UTF-8")
}

impl<R: CommandRunner> ServiceControl for Launchctl<R> {
    async fn bootstrap(&self, domain: &str, record: &Path) -> Result<Output> {
        self.runner
            .run(LAUNCHCTL, &["bootstrap", domain, record_arg(record)?])
            .await
            .context("failed to run launchctl bootstrap")
    }

    async fn enable(&self, target: &str) -> Result<Output> {
        self.runner
            .run(LAUNCHCTL, &["enable", target])
            .await
            .context("failed to run launchctl enable")
    }

    async fn kickstart(&self, target: &str) -> Result<Output> {
        self.runner
            .run(LAUNCHCTL, &["kickstart", "-k", target])
            .await
            .context("failed to run launchctl kickstart")
    }

    async fn kill(&self, signal: &str, target: &str) -> Result<Output> {
        self.runner
            .run(LAUNCHCTL, &["kill", signal, target])
            .await
            .context("failed to run launchctl kill")
    }

    async fn bootout(&self, target: &str) -> Result<Output> {
        self.runner
            .run(LAUNCHCTL, &["bootout", target])
            .await
            .context("failed to run launchctl bootout")
    }

    async fn disable(&self, target: &str) -> Result<Output> {
        self.runner
            .run(LAUNCHCTL, &["disable", target])
            .await
            .context("failed to run launchctl disable")
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;
    use std::time::Duration;

    use super::*;

    #[derive(Default)]
    struct RecordingRunner {
        invocations: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl CommandRunner for RecordingRunner {
        async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
            self.invocations.borrow_mut().push((
                program.to_string(),
                args.iter().map(ToString::to_string).collect(),
            ));
            Ok(Output {
                status: ExitStatus::from_raw(0),
                stdout: Vec::new(),
                stderr: Vec::new(),
            })
        }

        async fn run_with_timeout(
            &self,
            program: &str,
            args: &[&str],
            _timeout: Duration,
        ) -> Result<Output> {
            self.run(program, args).await
        }
    }

    fn args_of(runner: &RecordingRunner, index: usize) -> (String, Vec<String>) {
        runner.invocations.borrow()[index].clone()
    }

    #[tokio::test]
    async fn bootstrap_passes_domain_and_record_path() {
        let launchctl = Launchctl::new(RecordingRunner::default());
        launchctl
            .bootstrap("system", Path::new("/Library/LaunchAgents/com.acme.watcher.plist"))
            .await
            .expect("bootstrap");

        let (program, args) = args_of(&launchctl.runner, 0);
        assert_eq!(program, "/bin/launchctl");
        assert_eq!(
            args,
            vec![
                "bootstrap",
                "system",
                "/Library/LaunchAgents/com.acme.watcher.plist",
            ]
        );
    }

    #[tokio::test]
    async fn kickstart_restarts_with_dash_k() {
        let launchctl = Launchctl::new(RecordingRunner::default());
        launchctl
            .kickstart("loginwindow/com.acme.watcher")
            .await
            .expect("kickstart");

        let (_, args) = args_of(&launchctl.runner, 0);
        assert_eq!(args, vec!["kickstart", "-k", "loginwindow/com.acme.watcher"]);
    }

    #[tokio::test]
    async fn teardown_verbs_map_to_launchctl_subcommands() {
        let launchctl = Launchctl::new(RecordingRunner::default());
        launchctl
            .kill("SIGTERM", "gui/501/com.acme.watcher")
            .await
            .expect("kill");
        launchctl
            .bootout("gui/501/com.acme.watcher")
            .await
            .expect("bootout");
        launchctl
            .disable("gui/501/com.acme.watcher")
            .await
            .expect("disable");

        assert_eq!(
            args_of(&launchctl.runner, 0).1,
            vec!["kill", "SIGTERM", "gui/501/com.acme.watcher"]
        );
        assert_eq!(
            args_of(&launchctl.runner, 1).1,
            vec!["bootout", "gui/501/com.acme.watcher"]
        );
        assert_eq!(
            args_of(&launchctl.runner, 2).1,
            vec!["disable", "gui/501/com.acme.watcher"]
        );
    }
}
