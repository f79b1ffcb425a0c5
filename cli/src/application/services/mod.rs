//! Workflow services that drive agent install and removal.

pub mod reconcile;
pub mod teardown;

use std::process::Output;

use anyhow::Result;

use crate::application::ports::ProgressReporter;

/// Report one best-effort control action against `target`.
///
/// A spawn failure and a nonzero exit both become warnings; the
/// surrounding workflow keeps going either way.
pub(crate) fn report_step(
    action: &str,
    target: &str,
    result: Result<Output>,
    reporter: &impl ProgressReporter,
) {
    match result {
        Ok(output) if output.status.success() => reporter.step(&format!("{action} {target}")),
        Ok(output) => {
            reporter.warn(&format!("{action} {target} exited with {}", output.status));
        }
        Err(e) => reporter.warn(&format!("{action} {target} failed: {e:#}")),
    }
}
