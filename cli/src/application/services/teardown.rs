//! Tear an agent down across every scope it may be installed in.
//!
//! Removal never fails outright: each target is dismantled with
//! best-effort control calls and a record delete, and problems surface
//! as warnings so the remaining targets still get cleaned up.

use std::path::{Path, PathBuf};

use crate::application::ports::{AccountCatalog, ProgressReporter, RecordScanner, ServiceControl};
use crate::application::services::report_step;
use crate::domain::descriptor::LOGIN_WINDOW_SESSION;
use crate::domain::paths::{descriptor_path, user_agents_dir};
use crate::domain::target::{LOGIN_WINDOW_DOMAIN, SYSTEM_DOMAIN, account_target, service_target};

const TERM_SIGNAL: &str = "SIGTERM";

/// One installation to dismantle: its launchd target and its record.
struct TeardownTarget {
    service: String,
    record: PathBuf,
}

/// Remove every installation of `name` reachable from `domain`.
///
/// `system` names a single domain-wide installation under `agents_dir`.
/// Any other domain (typically `gui`) fans out over the local accounts,
/// pairing each `domain/uid` target with the record in that account's
/// home. A record that declares the login-window session type is
/// controlled through the `loginwindow` domain instead, whatever domain
/// was asked for.
pub async fn remove(
    name: &str,
    domain: &str,
    agents_dir: &Path,
    catalog: &impl AccountCatalog,
    scanner: &impl RecordScanner,
    control: &impl ServiceControl,
    reporter: &impl ProgressReporter,
) {
    let domain = domain.to_ascii_lowercase();
    let targets: Vec<TeardownTarget> = if domain == SYSTEM_DOMAIN {
        vec![TeardownTarget {
            service: service_target(&domain, name),
            record: descriptor_path(agents_dir, name),
        }]
    } else {
        let accounts = match catalog.local_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                reporter.warn(&format!("could not enumerate local accounts: {e:#}"));
                Vec::new()
            }
        };
        accounts
            .into_iter()
            .map(|account| TeardownTarget {
                service: account_target(&domain, account.uid, name),
                record: descriptor_path(&user_agents_dir(&account.home), name),
            })
            .collect()
    };

    for mut target in targets {
        if scanner
            .session_types(&target.record)
            .iter()
            .any(|session| session == LOGIN_WINDOW_SESSION)
        {
            reporter.step(&format!(
                "record {} is login-window scoped; controlling it via {LOGIN_WINDOW_DOMAIN}",
                target.record.display()
            ));
            target.service = service_target(LOGIN_WINDOW_DOMAIN, name);
        }
        dismantle(&target, scanner, control, reporter).await;
    }
}

/// Stop, unload, disable, and delete one installation.
async fn dismantle(
    target: &TeardownTarget,
    scanner: &impl RecordScanner,
    control: &impl ServiceControl,
    reporter: &impl ProgressReporter,
) {
    report_step(
        "kill",
        &target.service,
        control.kill(TERM_SIGNAL, &target.service).await,
        reporter,
    );
    report_step(
        "bootout",
        &target.service,
        control.bootout(&target.service).await,
        reporter,
    );
    report_step(
        "disable",
        &target.service,
        control.disable(&target.service).await,
        reporter,
    );
    match scanner.remove(&target.record) {
        Ok(true) => reporter.success(&format!("removed record {}", target.record.display())),
        Ok(false) => reporter.step(&format!("no record at {}", target.record.display())),
        Err(e) => reporter.warn(&format!(
            "could not remove record {}: {e:#}",
            target.record.display()
        )),
    }
}
