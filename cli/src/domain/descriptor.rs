//! Launchd agent descriptor — the declarative unit of reconciliation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::error::DescriptorError;
use crate::domain::target;

/// Session type launchd uses for agents shown over the login window.
pub const LOGIN_WINDOW_SESSION: &str = "LoginWindow";

/// Declarative definition of a watcher agent.
///
/// Serializes to the launchd property-list schema (PascalCase keys).
/// Structural equality over every field is the reconciliation trigger;
/// an on-disk record with unknown keys is a mismatch, not an extension
/// (`deny_unknown_fields`), so stray edits get reconciled away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct AgentDescriptor {
    /// Reverse-DNS identity, unique per scope directory.
    pub label: String,
    /// Program plus arguments, in exec order.
    pub program_arguments: Vec<String>,
    /// Session types the agent may load into.
    pub limit_load_to_session_type: Vec<String>,
    pub run_at_load: bool,
    pub keep_alive: bool,
    pub standard_out_path: PathBuf,
    pub standard_error_path: PathBuf,
}

impl AgentDescriptor {
    /// Validate a label as a reverse-DNS identity.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorError::InvalidLabel` unless the label has at
    /// least two non-empty dot-separated segments of ASCII alphanumerics
    /// or hyphens.
    pub fn validate_label(label: &str) -> Result<(), DescriptorError> {
        let segments: Vec<&str> = label.split('.').collect();
        let well_formed = segments.len() >= 2
            && segments.iter().all(|segment| {
                !segment.is_empty()
                    && segment
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-')
            });
        if well_formed {
            Ok(())
        } else {
            Err(DescriptorError::InvalidLabel(label.to_string()))
        }
    }

    /// Whether this agent is restricted to the login-window session.
    #[must_use]
    pub fn is_login_window(&self) -> bool {
        self.limit_load_to_session_type
            .iter()
            .any(|session| session == LOGIN_WINDOW_SESSION)
    }

    /// Service domain the agent activates under: `loginwindow` for
    /// login-window agents, `system` otherwise.
    #[must_use]
    pub fn activation_domain(&self) -> &'static str {
        if self.is_login_window() {
            target::LOGIN_WINDOW_DOMAIN
        } else {
            target::SYSTEM_DOMAIN
        }
    }
}
