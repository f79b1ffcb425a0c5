//! Ordered record of rendered log lines.

use crate::markup::ColorTag;

/// One rendered line with its resolved color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub text: String,
    pub color: ColorTag,
}

/// Append-only store of lines in file order.
///
/// The single exception to append-only is `replace_last`, used while the
/// newest line is still waiting for its terminator. `clear` runs once per
/// watch-start; the store has exactly one writer, the refresh loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogLineStore {
    lines: Vec<LogLine>,
}

impl LogLineStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, line: LogLine) {
        self.lines.push(line);
    }

    /// Swap the newest entry for `line`; appends when the store is empty.
    pub fn replace_last(&mut self, line: LogLine) {
        if let Some(last) = self.lines.last_mut() {
            *last = line;
        } else {
            self.lines.push(line);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn at(&self, index: usize) -> Option<&LogLine> {
        self.lines.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> LogLine {
        LogLine {
            text: text.to_string(),
            color: ColorTag::Black,
        }
    }

    #[test]
    fn append_grows_in_order() {
        let mut store = LogLineStore::new();
        store.append(line("a"));
        store.append(line("b"));
        assert_eq!(store.count(), 2);
        assert_eq!(store.at(0).map(|l| l.text.as_str()), Some("a"));
        assert_eq!(store.at(1).map(|l| l.text.as_str()), Some("b"));
        assert!(store.at(2).is_none());
    }

    #[test]
    fn replace_last_swaps_only_the_newest_entry() {
        let mut store = LogLineStore::new();
        store.append(line("a"));
        store.append(line("b"));
        store.replace_last(line("bc"));
        assert_eq!(store.count(), 2);
        assert_eq!(store.at(0).map(|l| l.text.as_str()), Some("a"));
        assert_eq!(store.at(1).map(|l| l.text.as_str()), Some("bc"));
    }

    #[test]
    fn clear_empties_the_store() {
        let mut store = LogLineStore::new();
        store.append(line("a"));
        store.clear();
        assert_eq!(store.count(), 0);
        store.append(line("b"));
        assert_eq!(store.count(), 1);
    }
}
