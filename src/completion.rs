//! Keyword completion
//!
//! Offers the Pawn keywords whose start matches what the user typed,
//! ignoring case, sorted case-insensitively.

use crate::document::Document;
use crate::syntax::KEYWORDS;

/// Keywords completing `prefix`
///
/// An empty prefix yields every keyword.
pub fn complete(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.to_lowercase();
    let mut candidates: Vec<&'static str> = KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| keyword.to_lowercase().starts_with(&prefix))
        .collect();
    candidates.sort_by_key(|keyword| keyword.to_lowercase());
    candidates
}

/// The word fragment directly before a column, for use as a prefix
///
/// Word characters are ASCII, matching the keyword rule.
pub fn word_before(text: &str, column: usize) -> &str {
    let end = text
        .char_indices()
        .nth(column)
        .map_or(text.len(), |(byte, _)| byte);
    let start = text[..end]
        .char_indices()
        .rev()
        .take_while(|(_, ch)| ch.is_ascii_alphanumeric() || *ch == '_')
        .last()
        .map_or(end, |(byte, _)| byte);
    &text[start..end]
}

/// Keywords completing the word typed before the document's cursor
pub fn complete_at(doc: &Document) -> Vec<&'static str> {
    let (idx, column) = doc.offset_to_position(doc.cursor());
    let text = doc.block(idx).map(|block| block.text()).unwrap_or_default();
    complete(word_before(text, column))
}

/// Replace the word typed before the cursor with `keyword`
///
/// The cursor ends up after the inserted keyword.
pub fn accept(doc: &mut Document, keyword: &str) {
    let (idx, column) = doc.offset_to_position(doc.cursor());
    let typed = doc
        .block(idx)
        .map_or(0, |block| word_before(block.text(), column).chars().count());
    let start = column - typed;
    doc.replace_in_block(idx, start, typed, "");
    doc.set_cursor(doc.block_start(idx) + start);
    doc.insert_at_cursor(keyword);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_prefix() {
        assert_eq!(complete("st"), vec!["static", "stock"]);
        assert_eq!(complete("ST"), vec!["static", "stock"]);
        assert_eq!(complete("de"), vec!["default", "defined"]);
    }

    #[test]
    fn test_complete_empty_prefix_is_sorted() {
        let all = complete("");
        assert_eq!(all.len(), KEYWORDS.len());
        assert_eq!(all.first(), Some(&"assert"));
        assert_eq!(all.last(), Some(&"while"));
    }

    #[test]
    fn test_complete_no_match() {
        assert!(complete("xyz").is_empty());
    }

    #[test]
    fn test_word_before() {
        assert_eq!(word_before("new st", 6), "st");
        assert_eq!(word_before("new st", 3), "new");
        assert_eq!(word_before("new ", 4), "");
        assert_eq!(word_before("a(bé", 99), "");
        assert_eq!(word_before("éif", 3), "if");
    }

    #[test]
    fn test_complete_at_cursor() {
        let mut doc = Document::from_text("main()\n{\n    new x;\n    ST");
        doc.set_cursor(doc.char_len());
        assert_eq!(complete_at(&doc), vec!["static", "stock"]);

        doc.go_to_line(3);
        assert_eq!(complete_at(&doc).len(), KEYWORDS.len());
    }

    #[test]
    fn test_accept_replaces_typed_fragment() {
        let mut doc = Document::from_text("x;\n    ST = 1;");
        doc.set_cursor(9);
        accept(&mut doc, "stock");
        assert_eq!(doc.to_text(), "x;\n    stock = 1;");
        assert_eq!(doc.cursor(), 12);
        assert_eq!(complete_at(&doc), vec!["stock"]);
    }
}
