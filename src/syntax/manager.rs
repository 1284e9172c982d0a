//! Incremental highlighting over a document
//!
//! The `Highlighter` re-highlights the blocks a document reports as
//! dirty. When a block's exit state changes, the blocks after it are
//! re-highlighted too, until one leaves its exit state unchanged.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use super::highlighter::{highlight_block, BlockHighlight};
use super::rules::RuleTable;
use crate::document::Document;

/// Highlighting engine
///
/// Holds only the rule table; all per-block state lives in the document.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    rules: RuleTable,
}

impl Highlighter {
    /// Create a highlighter with the Pawn rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a highlighter with a custom rule table
    pub fn with_rules(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// The rule table in use
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Highlight one block using the exit state currently stored before it
    ///
    /// Does not touch the document.
    pub fn highlight(&self, doc: &Document, idx: usize) -> Option<BlockHighlight> {
        let block = doc.block(idx)?;
        Some(highlight_block(&self.rules, idx, block.text(), doc.entry_state(idx)))
    }

    /// Re-highlight every block
    pub fn highlight_all(&self, doc: &mut Document) -> Vec<BlockHighlight> {
        doc.mark_all_dirty();
        self.refresh(doc)
    }

    /// Re-highlight dirty blocks, cascading forward while exit states change
    ///
    /// Returns the recomputed blocks in document order and stores their new
    /// exit states in the document.
    pub fn refresh(&self, doc: &mut Document) -> Vec<BlockHighlight> {
        let dirty = doc.take_dirty();
        let results = self.recompute(doc, &dirty);
        debug!(
            dirty = dirty.len(),
            recomputed = results.len(),
            "highlight refresh"
        );
        results
    }

    fn recompute(&self, doc: &mut Document, dirty: &BTreeSet<usize>) -> Vec<BlockHighlight> {
        let mut results = Vec::new();
        let mut done: Option<usize> = None;

        for &start in dirty {
            if done.is_some_and(|d| start <= d) {
                continue;
            }

            let mut idx = start;
            while let Some(block) = doc.block(idx) {
                let previous = block.exit_state();
                let result = highlight_block(&self.rules, idx, block.text(), doc.entry_state(idx));
                let changed = result.exit_state != previous;
                doc.set_exit_state(idx, result.exit_state);
                results.push(result);
                done = Some(idx);

                if !changed {
                    break;
                }
                trace!(block = idx, "exit state changed, cascading");
                idx += 1;
            }
        }

        results
    }
}
