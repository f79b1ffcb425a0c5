//! launchd target strings for the domains this tool manages.

/// Domain that hosts agents shown at the login window.
pub const LOGIN_WINDOW_DOMAIN: &str = "loginwindow";
/// Domain that hosts system-wide agents.
pub const SYSTEM_DOMAIN: &str = "system";

/// Target for a service scoped to a whole domain, e.g. `system/com.acme.watcher`.
#[must_use]
pub fn service_target(domain: &str, label: &str) -> String {
    format!("{domain}/{label}")
}

/// Target for a service scoped to one account, e.g. `gui/501/com.acme.watcher`.
#[must_use]
pub fn account_target(domain: &str, uid: u32, label: &str) -> String {
    format!("{domain}/{uid}/{label}")
}
