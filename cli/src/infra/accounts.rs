//! Infrastructure implementation of the `AccountCatalog` port.
//!
//! `DsclAccounts<R>` enumerates local users through `dscl`, pairing the
//! `UniqueID` listing with the `NFSHomeDirectory` listing and filtering
//! out service accounts.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};

use crate::application::ports::{AccountCatalog, CommandRunner};
use crate::domain::LocalAccount;
use crate::infra::command_runner::{DEFAULT_CMD_TIMEOUT, TokioCommandRunner};

const DSCL: &str = "/usr/bin/dscl";

/// Real user accounts start here; everything below is a system account.
const MIN_USER_UID: u32 = 500;

/// Accounts that never get a per-user agent even when their uid clears
/// the floor.
const EXCLUDED_ACCOUNTS: [&str; 5] = ["admin", "daemon", "guest", "nobody", "root"];

/// Infrastructure adapter for the `dscl` directory-service client.
pub struct DsclAccounts<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> DsclAccounts<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn listing(&self, attribute: &str) -> Result<String> {
        let output = self
            .runner
            .run(DSCL, &[".", "-list", "/Users", attribute])
            .await
            .with_context(|| format!("failed to run dscl -list /Users {attribute}"))?;
        ensure!(
            output.status.success(),
            "dscl -list /Users {attribute} exited with {}",
            output.status
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl DsclAccounts<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT))
    }
}

impl<R: CommandRunner> AccountCatalog for DsclAccounts<R> {
    async fn local_accounts(&self) -> Result<Vec<LocalAccount>> {
        let uids = self.listing("UniqueID").await?;
        let homes = self.listing("NFSHomeDirectory").await?;
        Ok(join_accounts(&parse_listing(&uids), &parse_listing(&homes)))
    }
}

/// Split a two-column `dscl -list` output into (name, value) pairs.
fn parse_listing(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| {
            let (name, value) = line.split_once(char::is_whitespace)?;
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

/// Join uid and home listings into accounts, dropping service accounts.
///
/// `nobody` reports uid -2, which fails the unsigned parse and drops out
/// with the rest of the negative-uid accounts.
fn join_accounts(uids: &[(String, String)], homes: &[(String, String)]) -> Vec<LocalAccount> {
    let homes: HashMap<&str, &str> = homes
        .iter()
        .map(|(name, home)| (name.as_str(), home.as_str()))
        .collect();
    let mut accounts: Vec<LocalAccount> = uids
        .iter()
        .filter_map(|(name, uid)| {
            let uid: u32 = uid.parse().ok()?;
            if uid < MIN_USER_UID || EXCLUDED_ACCOUNTS.contains(&name.as_str()) {
                return None;
            }
            let home = homes
                .get(name.as_str())
                .map_or_else(|| PathBuf::from("/Users").join(name), PathBuf::from);
            Some(LocalAccount {
                name: name.clone(),
                uid,
                home,
            })
        })
        .collect();
    accounts.sort_by_key(|account| account.uid);
    accounts
}
