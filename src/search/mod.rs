//! Search, replace and line navigation over a document
//!
//! Every operation walks all blocks in document order. Match offsets
//! reported to callers are global character offsets.

mod pattern;
mod rewrite;

use tracing::{debug, warn};

use crate::document::Document;
use crate::error::Result;

pub use pattern::{Matcher, Pattern};
pub use rewrite::{replace, ReplaceScope};

/// A located occurrence of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Block the match was found in
    pub block_index: usize,
    /// Global character offset of the first matched character
    pub start: usize,
    /// Length in characters
    pub length: usize,
}

impl Match {
    /// Exclusive global end offset
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Find every match of `pattern` in the document
pub fn search(doc: &Document, pattern: &Pattern) -> Result<Vec<Match>> {
    let matcher = pattern.compile().inspect_err(|err| warn!(%err, "invalid search pattern"))?;

    let mut matches = Vec::new();
    let mut block_start = 0;
    for (idx, block) in doc.blocks().iter().enumerate() {
        for range in matcher.find_in(block.text()) {
            matches.push(Match {
                block_index: idx,
                start: block_start + range.start,
                length: range.len(),
            });
        }
        block_start += block.char_len() + 1;
    }

    debug!(pattern = %pattern.source, matches = matches.len(), "search");
    Ok(matches)
}

/// Search and make the result the document's highlight set
///
/// Previous highlights are always dropped, even when nothing matches. An
/// invalid pattern leaves them untouched.
pub fn highlight_matches(doc: &mut Document, pattern: &Pattern) -> Result<usize> {
    let matches = search(doc, pattern)?;
    let count = matches.len();
    doc.set_selections(matches);
    Ok(count)
}

/// Resolve a 1-based line number to a block index
///
/// Returns `None` for lines outside `[1, block_count]`.
pub fn go_to_line(block_count: usize, line: usize) -> Option<usize> {
    if !(1..=block_count).contains(&line) {
        return None;
    }
    Some(line - 1)
}
