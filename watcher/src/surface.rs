//! Rendering surface — the terminal in production, a spy in tests.

use std::io::Write as _;

use owo_colors::OwoColorize as _;

use crate::snapshots::SystemSnapshots;
use crate::store::{LogLine, LogLineStore};

/// Where refresh output lands. Implementations decide how lines and the
/// snapshot block appear; the core never touches a UI toolkit directly.
pub trait RenderSurface {
    /// Draw lines appended or replaced since the previous call and scroll
    /// to the newest one.
    fn render(&mut self, store: &LogLineStore);
    /// Draw the system snapshot block.
    fn render_snapshots(&mut self, snapshots: &SystemSnapshots);
}

const ERASE_LINE: &str = "\r\x1b[2K";

/// Renders to stdout with ANSI colors.
///
/// The newest line stays unterminated on screen so a partial tail can be
/// rewritten in place when its continuation arrives. The snapshot block is
/// reprinted only when its contents change.
#[derive(Debug, Default)]
pub struct AnsiSurface {
    committed: usize,
    tail: Option<LogLine>,
    last_snapshots: Option<SystemSnapshots>,
}

impl AnsiSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn print_line(line: &LogLine, terminated: bool) {
        let text = line.text.color(line.color.ansi());
        if terminated {
            println!("{text}");
        } else {
            print!("{text}");
        }
    }
}

impl RenderSurface for AnsiSurface {
    fn render(&mut self, store: &LogLineStore) {
        if self.tail.take().is_some() {
            print!("{ERASE_LINE}");
        }
        let count = store.count();
        for index in self.committed..count {
            if let Some(line) = store.at(index) {
                if index + 1 == count {
                    Self::print_line(line, false);
                    self.tail = Some(line.clone());
                } else {
                    Self::print_line(line, true);
                }
            }
        }
        self.committed = count.saturating_sub(1);
        let _ = std::io::stdout().flush();
    }

    fn render_snapshots(&mut self, snapshots: &SystemSnapshots) {
        if self.last_snapshots.as_ref() == Some(snapshots) {
            return;
        }
        if self.tail.is_some() {
            print!("{ERASE_LINE}");
        }
        println!("{}", format!("[{}]", snapshots.host_name).dimmed());
        for line in snapshots.processes.lines() {
            println!("{}", format!("  {line}").dimmed());
        }
        for line in snapshots.network.lines() {
            println!("{}", format!("  {line}").dimmed());
        }
        if let Some(line) = &self.tail {
            Self::print_line(line, false);
        }
        self.last_snapshots = Some(snapshots.clone());
        let _ = std::io::stdout().flush();
    }
}
