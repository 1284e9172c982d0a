//! Document representation - an ordered sequence of blocks
//!
//! The document owns its blocks and is the only way to edit them. Every
//! edit marks the touched blocks dirty so the next highlight pass knows
//! where to start.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::block::Block;
use crate::error::Result;
use crate::search::Match;
use crate::syntax::LexState;

/// A block-structured text document
#[derive(Debug, Clone)]
pub struct Document {
    /// Blocks of text, always at least one
    blocks: Vec<Block>,
    /// Blocks edited since the last highlight pass
    dirty: BTreeSet<usize>,
    /// Cursor as a global character offset
    cursor: usize,
    /// Search highlights
    selections: Vec<Match>,
    /// Associated file path
    filename: Option<PathBuf>,
    /// Whether the document has unsaved changes
    modified: bool,
}

impl Document {
    /// Create a new document holding one empty block
    pub fn new() -> Self {
        Self::from_blocks(vec![Block::new()])
    }

    /// Create a document from text, one block per line
    ///
    /// A trailing newline yields a trailing empty block. Windows line
    /// endings are accepted.
    pub fn from_text(text: &str) -> Self {
        let blocks = text
            .split('\n')
            .map(|line| Block::from(line.strip_suffix('\r').unwrap_or(line)))
            .collect();
        Self::from_blocks(blocks)
    }

    fn from_blocks(blocks: Vec<Block>) -> Self {
        let dirty = (0..blocks.len()).collect();
        Self {
            blocks,
            dirty,
            cursor: 0,
            selections: Vec::new(),
            filename: None,
            modified: false,
        }
    }

    /// Load a document from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut doc = Self::from_text(&content);
        doc.filename = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Join blocks back into text
    pub fn to_text(&self) -> String {
        let texts: Vec<&str> = self.blocks.iter().map(Block::text).collect();
        texts.join("\n")
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Check if document is modified
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Get number of blocks
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get a block by index
    pub fn block(&self, idx: usize) -> Option<&Block> {
        self.blocks.get(idx)
    }

    /// Get all blocks
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Global character offset of the first character of a block
    ///
    /// Consecutive blocks are separated by one newline character.
    pub fn block_start(&self, idx: usize) -> usize {
        self.blocks
            .iter()
            .take(idx)
            .map(|block| block.char_len() + 1)
            .sum()
    }

    /// Total length in characters, separators included
    pub fn char_len(&self) -> usize {
        self.block_start(self.blocks.len()).saturating_sub(1)
    }

    /// Convert a global character offset into (block, column)
    ///
    /// Offsets past the end map to the end of the last block.
    pub fn offset_to_position(&self, offset: usize) -> (usize, usize) {
        let mut remaining = offset;
        for (idx, block) in self.blocks.iter().enumerate() {
            let len = block.char_len();
            if remaining <= len {
                return (idx, remaining);
            }
            remaining -= len + 1;
        }
        let last = self.blocks.len() - 1;
        (last, self.blocks[last].char_len())
    }

    /// Cursor position (global character offset)
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to the document
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.char_len());
    }

    /// Move the cursor to the start of a 1-based line
    ///
    /// Lines outside `[1, block_count]` leave the cursor where it is.
    pub fn go_to_line(&mut self, line: usize) -> Option<usize> {
        let idx = crate::search::go_to_line(self.block_count(), line)?;
        self.cursor = self.block_start(idx);
        Some(idx)
    }

    /// Current search highlights
    pub fn selections(&self) -> &[Match] {
        &self.selections
    }

    /// Replace the search highlights
    pub fn set_selections(&mut self, selections: Vec<Match>) {
        self.selections = selections;
    }

    /// Drop all search highlights
    pub fn clear_selections(&mut self) {
        self.selections.clear();
    }

    /// Replace the text of a block
    ///
    /// Newlines in `text` start new blocks after `idx`.
    pub fn set_block_text(&mut self, idx: usize, text: impl Into<String>) -> bool {
        let Some(block) = self.blocks.get_mut(idx) else {
            return false;
        };
        block.set_text(text.into());
        self.touch(idx);
        self.split_lines(idx);
        true
    }

    /// Replace `len` characters at column `start` of a block
    ///
    /// Newlines in `replacement` start new blocks after `idx`. Returns the
    /// removed text, or `None` if the block does not exist.
    pub fn replace_in_block(
        &mut self,
        idx: usize,
        start: usize,
        len: usize,
        replacement: &str,
    ) -> Option<String> {
        let removed = self.splice_block(idx, start, len, replacement)?;
        self.split_lines(idx);
        Some(removed)
    }

    /// Like `replace_in_block`, but leaves newlines inside the block
    ///
    /// Callers must follow up with `split_lines` before handing the
    /// document back.
    pub(crate) fn splice_block(
        &mut self,
        idx: usize,
        start: usize,
        len: usize,
        replacement: &str,
    ) -> Option<String> {
        let removed = self.blocks.get_mut(idx)?.replace_chars(start, len, replacement);
        self.touch(idx);
        Some(removed)
    }

    /// Break block `idx` at each newline it contains
    ///
    /// A `\r` before the newline is dropped, as when loading. Returns the
    /// number of blocks the text now spans (1 when there was no newline).
    pub(crate) fn split_lines(&mut self, idx: usize) -> usize {
        let mut current = idx;
        while let Some(column) = self
            .blocks
            .get(current)
            .and_then(|block| block.text().chars().position(|ch| ch == '\n'))
        {
            self.split_block(current, column);
            self.blocks[current + 1].replace_chars(0, 1, "");
            let block = &mut self.blocks[current];
            if block.text().ends_with('\r') {
                let len = block.char_len();
                block.replace_chars(len - 1, 1, "");
            }
            current += 1;
        }
        current - idx + 1
    }

    /// Insert a new block before `idx` (or at the end)
    pub fn insert_block(&mut self, idx: usize, text: impl Into<String>) {
        let idx = idx.min(self.blocks.len());
        self.blocks.insert(idx, Block::from_string(text.into()));
        self.shift_dirty_after_insert(idx);
        self.touch(idx);
    }

    /// Remove a block, returning its text
    ///
    /// The last remaining block cannot be removed.
    pub fn remove_block(&mut self, idx: usize) -> Option<String> {
        if idx >= self.blocks.len() || self.blocks.len() == 1 {
            return None;
        }
        let removed = self.blocks.remove(idx);
        self.shift_dirty_after_remove(idx);
        // The block now at `idx` has a new predecessor
        if idx < self.blocks.len() {
            self.touch(idx);
        } else {
            self.modified = true;
        }
        self.clamp_cursor();
        Some(removed.text().to_string())
    }

    /// Split a block at a column, moving the rest into a new block after it
    pub fn split_block(&mut self, idx: usize, column: usize) -> bool {
        let Some(block) = self.blocks.get_mut(idx) else {
            return false;
        };
        let rest = block.split_off(column);
        self.blocks.insert(idx + 1, rest);
        self.shift_dirty_after_insert(idx + 1);
        self.touch(idx);
        self.touch(idx + 1);
        true
    }

    /// Join a block with the one after it
    pub fn join_with_next(&mut self, idx: usize) -> bool {
        if idx + 1 >= self.blocks.len() {
            return false;
        }
        let next = self.blocks.remove(idx + 1);
        self.blocks[idx].append(next);
        self.shift_dirty_after_remove(idx + 1);
        self.touch(idx);
        true
    }

    /// Insert text at the cursor and move the cursor past it
    ///
    /// Each newline in `text` splits the current block.
    pub fn insert_at_cursor(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n");
        let (idx, column) = self.offset_to_position(self.cursor);
        self.splice_block(idx, column, 0, &text);
        self.split_lines(idx);
        self.cursor = self.block_start(idx) + column + text.chars().count();
    }

    /// Blocks edited since the last highlight pass, in order
    pub fn dirty_blocks(&self) -> impl Iterator<Item = usize> + '_ {
        self.dirty.iter().copied()
    }

    /// Mark every block for re-highlighting
    pub fn mark_all_dirty(&mut self) {
        self.dirty = (0..self.blocks.len()).collect();
    }

    /// Mark a block for re-highlighting without editing it
    pub fn mark_dirty(&mut self, idx: usize) {
        if idx < self.blocks.len() {
            self.dirty.insert(idx);
        }
    }

    pub(crate) fn take_dirty(&mut self) -> BTreeSet<usize> {
        std::mem::take(&mut self.dirty)
    }

    /// Entry state of a block: the exit state of the one before it
    pub fn entry_state(&self, idx: usize) -> LexState {
        match idx.checked_sub(1) {
            Some(prev) => self.blocks.get(prev).map(Block::exit_state).unwrap_or_default(),
            None => LexState::Normal,
        }
    }

    pub(crate) fn set_exit_state(&mut self, idx: usize, state: LexState) {
        if let Some(block) = self.blocks.get_mut(idx) {
            block.set_exit_state(state);
        }
    }

    fn touch(&mut self, idx: usize) {
        self.dirty.insert(idx);
        self.modified = true;
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.char_len());
    }

    fn shift_dirty_after_insert(&mut self, idx: usize) {
        self.dirty = self
            .dirty
            .iter()
            .map(|&i| if i >= idx { i + 1 } else { i })
            .collect();
    }

    fn shift_dirty_after_remove(&mut self, idx: usize) {
        self.dirty = self
            .dirty
            .iter()
            .filter(|&&i| i != idx)
            .map(|&i| if i > idx { i - 1 } else { i })
            .collect();
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(text: &str) -> Document {
        let mut doc = Document::from_text(text);
        doc.take_dirty();
        doc
    }

    #[test]
    fn test_from_text_and_back() {
        let doc = Document::from_text("a\r\nbc\n");
        assert_eq!(doc.block_count(), 3);
        assert_eq!(doc.block(1).map(Block::text), Some("bc"));
        assert_eq!(doc.to_text(), "a\nbc\n");
    }

    #[test]
    fn test_new_document_has_one_block() {
        let doc = Document::new();
        assert_eq!(doc.block_count(), 1);
        assert_eq!(doc.char_len(), 0);
    }

    #[test]
    fn test_all_blocks_dirty_after_load() {
        let doc = Document::from_text("a\nb\nc");
        assert_eq!(doc.dirty_blocks().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_block_start_offsets() {
        let doc = Document::from_text("ab\n\ncdé");
        assert_eq!(doc.block_start(0), 0);
        assert_eq!(doc.block_start(1), 3);
        assert_eq!(doc.block_start(2), 4);
        assert_eq!(doc.char_len(), 7);
    }

    #[test]
    fn test_offset_to_position() {
        let doc = Document::from_text("ab\ncd");
        assert_eq!(doc.offset_to_position(0), (0, 0));
        assert_eq!(doc.offset_to_position(2), (0, 2));
        assert_eq!(doc.offset_to_position(3), (1, 0));
        assert_eq!(doc.offset_to_position(99), (1, 2));
    }

    #[test]
    fn test_edit_marks_dirty_and_modified() {
        let mut doc = clean("a\nb");
        assert!(doc.set_block_text(1, "x"));
        assert!(!doc.set_block_text(5, "x"));
        assert!(doc.is_modified());
        assert_eq!(doc.dirty_blocks().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_insert_block_shifts_dirty() {
        let mut doc = clean("a\nb\nc");
        doc.mark_dirty(1);
        doc.insert_block(0, "new");
        assert_eq!(doc.dirty_blocks().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(doc.to_text(), "new\na\nb\nc");
    }

    #[test]
    fn test_remove_block_marks_successor() {
        let mut doc = clean("a\nb\nc");
        doc.mark_dirty(2);
        assert_eq!(doc.remove_block(1), Some("b".to_string()));
        assert_eq!(doc.dirty_blocks().collect::<Vec<_>>(), vec![1]);
        assert_eq!(doc.to_text(), "a\nc");
    }

    #[test]
    fn test_cannot_remove_last_block() {
        let mut doc = clean("only");
        assert_eq!(doc.remove_block(0), None);
    }

    #[test]
    fn test_split_and_join() {
        let mut doc = clean("hello world");
        assert!(doc.split_block(0, 5));
        assert_eq!(doc.to_text(), "hello\n world");
        assert!(doc.join_with_next(0));
        assert_eq!(doc.to_text(), "hello world");
        assert!(!doc.join_with_next(0));
    }

    #[test]
    fn test_go_to_line() {
        let mut doc = clean("ab\ncd\nef");
        assert_eq!(doc.go_to_line(3), Some(2));
        assert_eq!(doc.cursor(), 6);
        assert_eq!(doc.go_to_line(0), None);
        assert_eq!(doc.go_to_line(4), None);
        assert_eq!(doc.cursor(), 6);
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut doc = clean("new x;\nst");
        doc.set_cursor(9);
        doc.insert_at_cursor("ock");
        assert_eq!(doc.to_text(), "new x;\nstock");
        assert_eq!(doc.cursor(), 12);
    }

    #[test]
    fn test_newlines_become_block_boundaries() {
        let mut doc = clean("ab\nz");
        assert_eq!(doc.replace_in_block(0, 1, 0, "1\r\n2\n"), Some(String::new()));
        assert_eq!(doc.block_count(), 4);
        assert_eq!(doc.to_text(), "a1\n2\nb\nz");
        assert_eq!(doc.dirty_blocks().collect::<Vec<_>>(), vec![0, 1, 2]);

        assert!(doc.set_block_text(3, "x\ny"));
        assert_eq!(doc.block_count(), 5);
        assert_eq!(doc.block(4).map(Block::text), Some("y"));
    }

    #[test]
    fn test_insert_at_cursor_with_newline() {
        let mut doc = clean("new x;");
        doc.set_cursor(6);
        doc.insert_at_cursor("\nstock");
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.block(1).map(Block::text), Some("stock"));
        assert_eq!(doc.cursor(), 12);
        assert_eq!(doc.offset_to_position(doc.cursor()), (1, 5));
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut doc = clean("abc");
        doc.set_cursor(100);
        assert_eq!(doc.cursor(), 3);
    }
}
