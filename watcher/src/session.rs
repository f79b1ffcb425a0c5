//! One watcher run: the open file handle, the store, and the refresh body.

use std::path::Path;

use anyhow::Result;

use crate::assemble::LineAssembler;
use crate::snapshots::{self, SystemInspector};
use crate::store::LogLineStore;
use crate::surface::RenderSurface;
use crate::tail::LogFollower;

/// Owns everything a single watch needs. Built once per run; dropping it
/// closes the file handle, so stopping the loop releases the resources on
/// every path, error or not.
pub struct WatchSession<I, S> {
    follower: LogFollower,
    assembler: LineAssembler,
    store: LogLineStore,
    inspector: I,
    surface: S,
    process_filter: String,
}

impl<I: SystemInspector, S: RenderSurface> WatchSession<I, S> {
    /// Open the watched file and reset the store for a fresh session.
    ///
    /// # Errors
    ///
    /// Returns an error if the watched file cannot be opened.
    pub async fn start(
        path: &Path,
        inspector: I,
        surface: S,
        process_filter: String,
    ) -> Result<Self> {
        let follower = LogFollower::open(path).await?;
        let mut store = LogLineStore::new();
        store.clear();
        Ok(Self {
            follower,
            assembler: LineAssembler::new(),
            store,
            inspector,
            surface,
            process_filter,
        })
    }

    /// One refresh pass: drain new bytes, update the store, re-render, and
    /// refresh the system snapshots.
    ///
    /// A failed read is logged and the pass continues; the snapshot block
    /// is refreshed regardless of whether new bytes arrived.
    pub async fn refresh(&mut self) {
        match self.follower.read_available().await {
            Ok(chunk) if !chunk.is_empty() => {
                self.assembler.feed(&chunk, &mut self.store);
                self.surface.render(&self.store);
            }
            Ok(_) => {}
            Err(error) => tracing::warn!(error = %error, "log read failed"),
        }

        let snapshots = snapshots::gather(&self.inspector, &self.process_filter).await;
        self.surface.render_snapshots(&snapshots);
    }
}
