//! Local account identity used for per-user agent targets.

use std::path::PathBuf;

/// A non-system local account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAccount {
    pub name: String,
    pub uid: u32,
    pub home: PathBuf,
}
