//! Ports: traits the application services depend on.
//!
//! Implementations live in `infra` (process execution, launchctl,
//! account lookup, plist records) and `output` (progress reporting).
//! Services stay testable by swapping these for stubs.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{AgentDescriptor, LocalAccount};

// ── Process execution ──────────────────────────────────────────────

/// Runs external commands.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run `program` with `args`, capturing output.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run `program` with `args`, killing it after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or exceeds
    /// the timeout.
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── launchd control ────────────────────────────────────────────────

/// Drives launchd service lifecycle transitions.
///
/// Each call returns the raw [`Output`] so callers can decide whether
/// a nonzero exit is fatal; many are expected during teardown.
#[allow(async_fn_in_trait)]
pub trait ServiceControl {
    /// Load the record at `record` into `domain`.
    ///
    /// # Errors
    ///
    /// Returns an error if the control command cannot be executed.
    async fn bootstrap(&self, domain: &str, record: &Path) -> Result<Output>;

    /// Clear any disabled override for `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the control command cannot be executed.
    async fn enable(&self, target: &str) -> Result<Output>;

    /// Start `target`, restarting it if already running.
    ///
    /// # Errors
    ///
    /// Returns an error if the control command cannot be executed.
    async fn kickstart(&self, target: &str) -> Result<Output>;

    /// Send `signal` to the process backing `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the control command cannot be executed.
    async fn kill(&self, signal: &str, target: &str) -> Result<Output>;

    /// Unload `target` from its domain.
    ///
    /// # Errors
    ///
    /// Returns an error if the control command cannot be executed.
    async fn bootout(&self, target: &str) -> Result<Output>;

    /// Mark `target` disabled so launchd will not restart it.
    ///
    /// # Errors
    ///
    /// Returns an error if the control command cannot be executed.
    async fn disable(&self, target: &str) -> Result<Output>;
}

// ── Agent records ──────────────────────────────────────────────────

/// Reads and writes agent descriptor records on disk.
pub trait RecordStore {
    /// Load the record at `path`.
    ///
    /// A missing or undecodable record is `Ok(None)`; reconciliation
    /// treats both the same way.
    ///
    /// # Errors
    ///
    /// Returns an error only for I/O failures other than absence.
    fn load(&self, path: &Path) -> Result<Option<AgentDescriptor>>;

    /// Write `descriptor` to `path` atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written.
    fn save(&self, path: &Path, descriptor: &AgentDescriptor) -> Result<()>;
}

/// Reads and writes installed watcher payloads.
pub trait PayloadStore {
    /// Read the payload at `path`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error only for I/O failures other than absence.
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>>;

    /// Write `content` to `path` atomically, marked executable.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be written.
    fn write(&self, path: &Path, content: &[u8]) -> Result<()>;
}

/// Inspects and removes records without needing them to decode fully.
pub trait RecordScanner {
    /// Session types declared by the record at `path`.
    ///
    /// Missing or unreadable records yield an empty list.
    fn session_types(&self, path: &Path) -> Vec<String>;

    /// Delete the record at `path`.
    ///
    /// Returns `false` when no record was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be removed.
    fn remove(&self, path: &Path) -> Result<bool>;
}

// ── Account enumeration ────────────────────────────────────────────

/// Enumerates local user accounts eligible for per-user agents.
#[allow(async_fn_in_trait)]
pub trait AccountCatalog {
    /// List local accounts with their uids and home directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory service cannot be queried.
    async fn local_accounts(&self) -> Result<Vec<LocalAccount>>;
}

// ── Progress reporting ─────────────────────────────────────────────

/// Receives human-readable progress as a workflow runs.
pub trait ProgressReporter {
    /// Report a step that is underway or informational.
    fn step(&self, message: &str);
    /// Report a step that completed.
    fn success(&self, message: &str);
    /// Report a step that failed but did not stop the workflow.
    fn warn(&self, message: &str);
}
