//! Per-block highlighting
//!
//! Combines the rule table with block comment tracking. Rules are stamped
//! first, comment ranges last, so comments win wherever they overlap.

use super::comments::scan_block_comments;
use super::rules::{LexState, RuleTable, StyledRange};
use super::tokens::TokenCategory;
use crate::text::CharIndex;

/// Result of highlighting a single block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHighlight {
    /// Index of the block in the document
    pub block: usize,
    /// Styled ranges in application order (may overlap)
    pub ranges: Vec<StyledRange>,
    /// State at end of block (for next block)
    pub exit_state: LexState,
}

impl BlockHighlight {
    /// Final category of the character at `pos` (last applied range wins)
    pub fn category_at(&self, pos: usize) -> Option<TokenCategory> {
        self.ranges
            .iter()
            .rev()
            .find(|r| r.contains(pos))
            .map(|r| r.category)
    }

    /// Final category of every character of a block `len` characters long
    pub fn categories(&self, len: usize) -> Vec<Option<TokenCategory>> {
        let mut stamped = vec![None; len];
        for range in &self.ranges {
            let end = range.end().min(len);
            for slot in stamped.iter_mut().take(end).skip(range.start) {
                *slot = Some(range.category);
            }
        }
        stamped
    }

    /// Non-overlapping runs of the final categories, sorted by offset
    pub fn resolved(&self, len: usize) -> Vec<StyledRange> {
        let mut runs: Vec<StyledRange> = Vec::new();
        for (pos, category) in self.categories(len).into_iter().enumerate() {
            let Some(category) = category else {
                continue;
            };
            match runs.last_mut() {
                Some(run) if run.end() == pos && run.category == category => run.length += 1,
                _ => runs.push(StyledRange::new(pos, 1, category)),
            }
        }
        runs
    }
}

/// Highlight one block of text given the state it is entered in
pub fn highlight_block(
    rules: &RuleTable,
    block: usize,
    text: &str,
    entry: LexState,
) -> BlockHighlight {
    let index = CharIndex::new(text);
    let mut ranges = rules.apply(text, &index);

    let comments = scan_block_comments(text, entry, &index);
    ranges.extend(
        comments
            .ranges
            .iter()
            .filter(|(start, end)| end > start)
            .map(|&(start, end)| StyledRange::new(start, end - start, TokenCategory::BlockComment)),
    );

    BlockHighlight {
        block,
        ranges,
        exit_state: comments.exit_state,
    }
}
