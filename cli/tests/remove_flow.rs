//! End-to-end teardown runs against a scratch agents directory.
//!
//! The control-plane calls fail on machines without launchd; teardown
//! treats that as routine and still removes the record, which is the
//! behavior these tests pin down.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn marquee_remove() -> Command {
    Command::cargo_bin("marquee-remove").expect("marquee-remove binary should exist")
}

const LOGIN_WINDOW_RECORD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>com.test.agent</string>
    <key>LimitLoadToSessionType</key>
    <string>LoginWindow</string>
</dict>
</plist>
"#;

#[test]
fn test_remove_deletes_the_system_record_despite_junk_arguments() {
    let agents = TempDir::new().expect("tempdir");
    let record = agents.path().join("com.test.agent.plist");
    std::fs::write(&record, "scratch record").expect("seed record");

    marquee_remove()
        .args([
            "/",
            "MacBook",
            "localadmin",
            "--agent-name",
            "com.test.agent",
            "--agent-domain",
            "system",
            "--agent-directory",
        ])
        .arg(agents.path())
        .args(["--unknown-flag", "value"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed record"));

    assert!(!record.exists(), "record should be deleted");
}

#[test]
fn test_remove_controls_login_window_records_via_the_loginwindow_domain() {
    let agents = TempDir::new().expect("tempdir");
    let record = agents.path().join("com.test.agent.plist");
    std::fs::write(&record, LOGIN_WINDOW_RECORD).expect("seed record");

    marquee_remove()
        .args([
            "--agent-name",
            "com.test.agent",
            "--agent-domain",
            "system",
            "--agent-directory",
        ])
        .arg(agents.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("login-window scoped"))
        .stdout(predicate::str::contains("loginwindow/com.test.agent"));

    assert!(!record.exists(), "record should be deleted");
}

#[test]
fn test_remove_exits_zero_when_no_record_exists() {
    let agents = TempDir::new().expect("tempdir");

    marquee_remove()
        .args(["--agent-name", "com.test.agent", "--agent-directory"])
        .arg(agents.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no record at"));
}
