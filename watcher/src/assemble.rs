//! Turns arbitrary read chunks into parsed store entries.

use crate::markup;
use crate::store::{LogLine, LogLineStore};

/// Splits incoming chunks on line feeds and coalesces partial tails across
/// reads.
///
/// `partial` holds the pre-parse text of the newest line while its
/// terminator has not been read; `Some` doubles as the partial flag. A
/// continuation is appended to that raw text and the concatenation is
/// re-parsed before replacing the newest store entry, so a color directive
/// split across two reads still resolves.
#[derive(Debug, Default)]
pub struct LineAssembler {
    partial: Option<String>,
}

impl LineAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed newly read text into `store`. An empty chunk mutates nothing.
    pub fn feed(&mut self, chunk: &str, store: &mut LogLineStore) {
        for segment in chunk.split_inclusive('\n') {
            let complete = segment.ends_with('\n');
            let segment = segment.strip_suffix('\n').unwrap_or(segment);
            match self.partial.take() {
                Some(previous) => {
                    let raw = previous + segment;
                    let (text, color) = markup::parse(&raw);
                    store.replace_last(LogLine { text, color });
                    if !complete {
                        self.partial = Some(raw);
                    }
                }
                None => {
                    let (text, color) = markup::parse(segment);
                    store.append(LogLine { text, color });
                    if !complete {
                        self.partial = Some(segment.to_string());
                    }
                }
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// chunk boundaries never change the final store contents
        #[test]
        fn prop_chunking_is_order_preserving(
            corpus in "[ -~\n]{0,64}",
            cuts in proptest::collection::vec(0usize..64, 0..6),
        ) {
            let mut whole = LogLineStore::new();
            LineAssembler::new().feed(&corpus, &mut whole);

            let mut cuts: Vec<usize> = cuts.into_iter().map(|c| c.min(corpus.len())).collect();
            cuts.sort_unstable();
            let mut chunked = LogLineStore::new();
            let mut assembler = LineAssembler::new();
            let mut start = 0;
            for cut in cuts {
                if cut < start {
                    continue;
                }
                assembler.feed(&corpus[start..cut], &mut chunked);
                start = cut;
            }
            assembler.feed(&corpus[start..], &mut chunked);

            prop_assert_eq!(whole, chunked);
        }
    }
}
