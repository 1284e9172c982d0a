//! Block comment tracking
//!
//! `/* ... */` comments may span blocks. Each block records the state it
//! leaves behind so the next block knows whether it starts inside a comment.

use super::rules::LexState;
use crate::text::CharIndex;

const OPENER: &str = "/*";
const CLOSER: &str = "*/";

/// Block comment ranges of one block and the state carried into the next
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentScan {
    /// Half-open character ranges, in discovery order
    pub ranges: Vec<(usize, usize)>,
    /// State at end of block
    pub exit_state: LexState,
}

/// Scan `text` for block comment ranges given the state it starts in
///
/// A block entered inside a comment has its first range start at offset 0.
/// Otherwise ranges start at `/*`. A range ends just past the first `*/`
/// found at or after its start, or runs to the end of the block, in which
/// case the block exits inside the comment.
pub fn scan_block_comments(text: &str, entry: LexState, index: &CharIndex) -> CommentScan {
    let mut scan = CommentScan::default();

    // byte offsets until the final conversion
    let mut start = match entry {
        LexState::InBlockComment => Some(0),
        LexState::Normal => text.find(OPENER),
    };

    while let Some(range_start) = start {
        match text[range_start..].find(CLOSER) {
            Some(rel) => {
                let range_end = range_start + rel + CLOSER.len();
                scan.ranges.push((range_start, range_end));
                start = text[range_end..].find(OPENER).map(|rel| range_end + rel);
            }
            None => {
                scan.ranges.push((range_start, text.len()));
                scan.exit_state = LexState::InBlockComment;
                start = None;
            }
        }
    }

    for range in &mut scan.ranges {
        *range = (index.byte_to_char(range.0), index.byte_to_char(range.1));
    }

    scan
}
