//! Reconcile an agent installation toward its desired state.
//!
//! The record and payload writers are convergent: they compare what is
//! on disk against what is desired and only write on a mismatch.
//! Activation always runs, so a record that is already correct but not
//! loaded still comes up.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{PayloadStore, ProgressReporter, RecordStore, ServiceControl};
use crate::application::services::report_step;
use crate::domain::{AgentDescriptor, target};

/// Bring the record at `record_path` in line with `desired`, then
/// activate the agent.
///
/// Returns `true` when the record was written, `false` when it already
/// matched. Activation failures are reported but never fatal; launchd
/// reports errors freely for states that are already correct.
///
/// # Errors
///
/// Returns an error if the record cannot be read (beyond absence) or
/// written.
pub async fn apply(
    desired: &AgentDescriptor,
    record_path: &Path,
    records: &impl RecordStore,
    control: &impl ServiceControl,
    reporter: &impl ProgressReporter,
) -> Result<bool> {
    let changed = match records.load(record_path)? {
        Some(existing) if existing == *desired => {
            reporter.success(&format!("agent record {} already matches", record_path.display()));
            false
        }
        _ => {
            reporter.step(&format!(
                "agent record {} does not exist or does not match; writing it",
                record_path.display()
            ));
            records.save(record_path, desired)?;
            reporter.success(&format!("agent record {} installed", record_path.display()));
            true
        }
    };
    activate(desired, record_path, control, reporter).await;
    Ok(changed)
}

/// Bring the payload at `payload_path` in line with `content`.
///
/// Returns `true` when the payload was written.
///
/// # Errors
///
/// Returns an error if the payload cannot be read (beyond absence) or
/// written.
pub fn sync_payload(
    content: &[u8],
    payload_path: &Path,
    payloads: &impl PayloadStore,
    reporter: &impl ProgressReporter,
) -> Result<bool> {
    match payloads.read(payload_path)? {
        Some(existing) if existing == content => {
            reporter.success(&format!(
                "watcher payload {} already matches",
                payload_path.display()
            ));
            Ok(false)
        }
        _ => {
            reporter.step(&format!(
                "watcher payload {} does not exist or does not match; writing it",
                payload_path.display()
            ));
            payloads.write(payload_path, content)?;
            reporter.success(&format!("watcher payload {} installed", payload_path.display()));
            Ok(true)
        }
    }
}

/// Load, enable, and start the agent, reporting each transition.
async fn activate(
    desired: &AgentDescriptor,
    record_path: &Path,
    control: &impl ServiceControl,
    reporter: &impl ProgressReporter,
) {
    let domain = desired.activation_domain();
    let service = target::service_target(domain, &desired.label);
    report_step(
        "bootstrap",
        &format!("{domain} {}", record_path.display()),
        control.bootstrap(domain, record_path).await,
        reporter,
    );
    report_step("enable", &service, control.enable(&service).await, reporter);
    report_step("kickstart", &service, control.kickstart(&service).await, reporter);
}
