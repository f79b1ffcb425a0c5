//! Canonical filesystem layout for installed agents.

use std::path::{Path, PathBuf};

/// System-wide agents directory.
pub const AGENTS_DIR: &str = "/Library/LaunchAgents";
/// Support directory that holds installed watcher payloads.
pub const SUPPORT_DIR: &str = "/Library/Application Support";
/// Log directory for stdout/stderr redirection.
pub const LOGS_DIR: &str = "/Library/Logs";

/// Record path for `label` under `agents_dir`.
#[must_use]
pub fn descriptor_path(agents_dir: &Path, label: &str) -> PathBuf {
    agents_dir.join(format!("{label}.plist"))
}

/// Log-redirection path for `label` under `logs_dir`.
#[must_use]
pub fn log_path(logs_dir: &Path, label: &str) -> PathBuf {
    logs_dir.join(format!("{label}.log"))
}

/// Payload directory for `label` under `support_dir`.
#[must_use]
pub fn payload_dir(support_dir: &Path, label: &str) -> PathBuf {
    support_dir.join(label)
}

/// Per-user agents directory inside `home`.
#[must_use]
pub fn user_agents_dir(home: &Path) -> PathBuf {
    home.join("Library").join("LaunchAgents")
}
