//! Character offset helpers
//!
//! The regex engine reports byte offsets; everything public in this crate
//! speaks character offsets. `CharIndex` converts between the two for one
//! block of text.

/// Byte/character offset table for a single string
#[derive(Debug)]
pub struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    /// Build the table for `text`
    pub fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    /// Number of characters in the text
    pub fn char_count(&self) -> usize {
        self.char_to_byte.len().saturating_sub(1)
    }

    /// Byte offset of a character offset (clamped to the end of the text)
    pub fn char_to_byte(&self, char_offset: usize) -> usize {
        let clamped = char_offset.min(self.char_count());
        self.char_to_byte
            .get(clamped)
            .copied()
            .unwrap_or(self.text_len)
    }

    /// Character offset of a byte offset
    ///
    /// Offsets inside a multi-byte character round up to the next character.
    pub fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) | Err(idx) => idx,
        }
    }
}

/// Number of characters in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
