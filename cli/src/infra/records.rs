//! Infrastructure implementation of the record and payload ports.
//!
//! `PlistRecords` owns every on-disk artifact: XML property-list records
//! and watcher payload binaries. Writes go through a temp file in the
//! destination directory, get their owner and mode set, then rename into
//! place, so a crash never leaves a half-written record for launchd to
//! chew on.

use std::fs::{self, Permissions};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::application::ports::{PayloadStore, RecordScanner, RecordStore};
use crate::domain::AgentDescriptor;

const RECORD_MODE: u32 = 0o644;
const PAYLOAD_MODE: u32 = 0o755;
const DIR_MODE: u32 = 0o755;

/// Filesystem store for agent records and payloads.
pub struct PlistRecords {
    owner_uid: u32,
    owner_gid: u32,
}

impl PlistRecords {
    /// Store that writes root:wheel artifacts, for production use.
    #[must_use]
    pub fn privileged() -> Self {
        Self::with_owner(0, 0)
    }

    /// Store with an explicit artifact owner.
    #[must_use]
    pub fn with_owner(owner_uid: u32, owner_gid: u32) -> Self {
        Self {
            owner_uid,
            owner_gid,
        }
    }

    /// Write `content` to `path` atomically with the given mode.
    fn install(&self, path: &Path, content: &[u8], mode: u32) -> Result<()> {
        let dir = path
            .parent()
            .with_context(|| format!("{} has no parent directory", path.display()))?;
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let mut staged = NamedTempFile::new_in(dir)
            .with_context(|| format!("staging a write in {}", dir.display()))?;
        staged
            .write_all(content)
            .with_context(|| format!("writing {}", path.display()))?;
        std::os::unix::fs::chown(staged.path(), Some(self.owner_uid), Some(self.owner_gid))
            .with_context(|| format!("setting owner of {}", path.display()))?;
        fs::set_permissions(staged.path(), Permissions::from_mode(mode))
            .with_context(|| format!("setting mode of {}", path.display()))?;
        staged
            .persist(path)
            .with_context(|| format!("moving staged write into {}", path.display()))?;
        Ok(())
    }
}

impl RecordStore for PlistRecords {
    fn load(&self, path: &Path) -> Result<Option<AgentDescriptor>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };
        // An undecodable record reconciles like a missing one.
        Ok(plist::from_bytes(&bytes).ok())
    }

    fn save(&self, path: &Path, descriptor: &AgentDescriptor) -> Result<()> {
        let mut xml = Vec::new();
        plist::to_writer_xml(&mut xml, descriptor)
            .with_context(|| format!("encoding the record for {}", descriptor.label))?;
        self.install(path, &xml, RECORD_MODE)
    }
}

impl PayloadStore for PlistRecords {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        let dir = path
            .parent()
            .with_context(|| format!("{} has no parent directory", path.display()))?;
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        std::os::unix::fs::chown(dir, Some(self.owner_uid), Some(self.owner_gid))
            .with_context(|| format!("setting owner of {}", dir.display()))?;
        fs::set_permissions(dir, Permissions::from_mode(DIR_MODE))
            .with_context(|| format!("setting mode of {}", dir.display()))?;
        self.install(path, content, PAYLOAD_MODE)
    }
}

impl RecordScanner for PlistRecords {
    fn session_types(&self, path: &Path) -> Vec<String> {
        let Ok(value) = plist::Value::from_file(path) else {
            return Vec::new();
        };
        value
            .as_dictionary()
            .and_then(|dict| dict.get("LimitLoadToSessionType"))
            .map(session_types_of)
            .unwrap_or_default()
    }

    fn remove(&self, path: &Path) -> Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
        }
    }
}

/// Session types from a record value; launchd accepts either one string
/// or an array of them.
fn session_types_of(value: &plist::Value) -> Vec<String> {
    match value {
        plist::Value::String(session) => vec![session.clone()],
        plist::Value::Array(sessions) => sessions
            .iter()
            .filter_map(|session| session.as_string().map(ToString::to_string))
            .collect(),
        _ => Vec::new(),
    }
}
