//! Incremental reads from the watched file.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Follows a growing file, returning whatever bytes are available past the
/// previous read.
///
/// The handle is opened once per watch and owns the read position. An
/// incomplete UTF-8 sequence at the end of a read is held back until the
/// next call so decoding never splits a scalar value.
pub struct LogFollower {
    file: File,
    carry: Vec<u8>,
}

impl LogFollower {
    /// Open `path` for tailing, starting from the beginning of the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub async fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .await
            .with_context(|| format!("opening {}", path.display()))?;
        Ok(Self {
            file,
            carry: Vec::new(),
        })
    }

    /// Drain all bytes currently available and decode them.
    ///
    /// Returns an empty string when nothing new was appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails; the follower stays usable.
    pub async fn read_available(&mut self) -> Result<String> {
        let mut buf = [0u8; 8192];
        loop {
            let n = self
                .file
                .read(&mut buf)
                .await
                .context("reading watched file")?;
            if n == 0 {
                break;
            }
            self.carry.extend_from_slice(&buf[..n]);
        }

        let held_back = incomplete_utf8_suffix(&self.carry);
        let ready: Vec<u8> = self.carry.drain(..self.carry.len() - held_back).collect();
        Ok(String::from_utf8_lossy(&ready).into_owned())
    }
}

/// Length of an incomplete UTF-8 sequence at the end of `bytes`, 0–3.
///
/// Only a truncated sequence counts; invalid bytes flush through so the
/// lossy decode can replace them.
fn incomplete_utf8_suffix(bytes: &[u8]) -> usize {
    let len = bytes.len();
    for index in (len.saturating_sub(3)..len).rev() {
        let byte = bytes[index];
        if byte < 0x80 {
            return 0;
        }
        if byte >= 0xC0 {
            let need = if byte >= 0xF0 {
                4
            } else if byte >= 0xE0 {
                3
            } else {
                2
            };
            let have = len - index;
            return if have < need { have } else { 0 };
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn ascii_and_complete_sequences_flush_entirely() {
        assert_eq!(incomplete_utf8_suffix(b""), 0);
        assert_eq!(incomplete_utf8_suffix(b"abc"), 0);
        assert_eq!(incomplete_utf8_suffix("héllo".as_bytes()), 0);
        assert_eq!(incomplete_utf8_suffix("…".as_bytes()), 0);
    }

    #[test]
    fn truncated_sequences_are_held_back() {
        // lead byte of 'é' without its continuation
        assert_eq!(incomplete_utf8_suffix(&[0x61, 0xC3]), 1);
        // first two bytes of a three-byte sequence
        assert_eq!(incomplete_utf8_suffix(&[0x61, 0xE2, 0x80]), 2);
        // first three bytes of a four-byte sequence
        assert_eq!(incomplete_utf8_suffix(&[0xF0, 0x9F, 0x92]), 3);
    }

    #[test]
    fn stray_continuation_bytes_flush_through() {
        assert_eq!(incomplete_utf8_suffix(&[0x80, 0x80, 0x80, 0x80]), 0);
        assert_eq!(incomplete_utf8_suffix(&[0xE2, 0x80, 0x41]), 0);
    }

    #[tokio::test]
    async fn reads_appended_bytes_across_calls() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("watched.log");
        std::fs::write(&path, b"first\n").expect("seed file");

        let mut follower = LogFollower::open(&path).await.expect("open");
        assert_eq!(follower.read_available().await.expect("read"), "first\n");
        assert_eq!(follower.read_available().await.expect("read"), "");

        let mut writer = std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .expect("append handle");
        writer.write_all(b"second").expect("append");
        assert_eq!(follower.read_available().await.expect("read"), "second");
        writer.write_all(b"\n").expect("append");
        assert_eq!(follower.read_available().await.expect("read"), "\n");
    }

    #[tokio::test]
    async fn split_utf8_sequence_survives_the_read_boundary() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("watched.log");
        std::fs::write(&path, b"").expect("seed file");

        let mut follower = LogFollower::open(&path).await.expect("open");
        let mut writer = std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .expect("append handle");

        // "café" cut between the two bytes of 'é'
        writer.write_all(&[b'c', b'a', b'f', 0xC3]).expect("append");
        assert_eq!(follower.read_available().await.expect("read"), "caf");
        writer.write_all(&[0xA9, b'\n']).expect("append");
        assert_eq!(follower.read_available().await.expect("read"), "\u{e9}\n");
    }
}
