//! Block representation and text operations

use crate::syntax::LexState;
use crate::text::CharIndex;

/// A single line of a document
///
/// Besides its text, a block remembers the lexer state it was left in the
/// last time it was highlighted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// The text content (without trailing newline)
    text: String,
    /// State at end of block, as of the last highlight pass
    exit_state: LexState,
}

impl Block {
    /// Create a new empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a block from a string
    pub fn from_string(s: String) -> Self {
        Self {
            text: s,
            exit_state: LexState::Normal,
        }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the whole text
    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    /// Get the length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the block is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Exit state recorded by the last highlight pass
    pub fn exit_state(&self) -> LexState {
        self.exit_state
    }

    pub(crate) fn set_exit_state(&mut self, state: LexState) {
        self.exit_state = state;
    }

    /// Replace `len` characters at character offset `start` with `replacement`
    ///
    /// Offsets past the end are clamped. Returns the removed text.
    pub fn replace_chars(&mut self, start: usize, len: usize, replacement: &str) -> String {
        let index = CharIndex::new(&self.text);
        let from = index.char_to_byte(start);
        let to = index.char_to_byte(start.saturating_add(len));
        let removed = self.text[from..to].to_string();
        self.text.replace_range(from..to, replacement);
        removed
    }

    /// Split the block at character offset, returning the remainder
    pub fn split_off(&mut self, char_pos: usize) -> Block {
        let byte_pos = CharIndex::new(&self.text).char_to_byte(char_pos);
        let remainder = self.text.split_off(byte_pos);
        Block::from_string(remainder)
    }

    /// Append another block's content to this block
    pub fn append(&mut self, other: Block) {
        self.text.push_str(other.text());
    }
}

impl From<&str> for Block {
    fn from(s: &str) -> Self {
        Self::from_string(s.to_string())
    }
}

impl From<String> for Block {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_chars() {
        let mut block = Block::from("a,a,a");
        let removed = block.replace_chars(2, 1, "bb");
        assert_eq!(removed, "a");
        assert_eq!(block.text(), "a,bb,a");
    }

    #[test]
    fn test_replace_chars_multibyte() {
        let mut block = Block::from("né x");
        block.replace_chars(1, 1, "e");
        assert_eq!(block.text(), "ne x");
        assert_eq!(block.char_len(), 4);
    }

    #[test]
    fn test_replace_chars_clamps() {
        let mut block = Block::from("abc");
        block.replace_chars(2, 10, "Z");
        assert_eq!(block.text(), "abZ");
        block.replace_chars(10, 1, "!");
        assert_eq!(block.text(), "abZ!");
    }

    #[test]
    fn test_split_and_append() {
        let mut block = Block::from("héllo world");
        let rest = block.split_off(5);
        assert_eq!(block.text(), "héllo");
        assert_eq!(rest.text(), " world");
        block.append(rest);
        assert_eq!(block.text(), "héllo world");
    }

    #[test]
    fn test_new_block_is_normal() {
        let block = Block::new();
        assert!(block.is_empty());
        assert_eq!(block.exit_state(), LexState::Normal);
    }
}
