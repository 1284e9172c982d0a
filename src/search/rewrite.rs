//! Replace
//!
//! Matches are located against a block's text before any substitution.
//! Each substitution that changes the block's length shifts the matches
//! after it, so a running delta is applied to their offsets. Newlines in
//! the replacement turn into block boundaries once the block is done, and
//! the scan resumes after the blocks they created.

use tracing::debug;

use super::pattern::Pattern;
use crate::document::Document;
use crate::error::Result;

/// How many matches a replace pass rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceScope {
    /// Only the first match in document order
    One,
    /// Every match
    #[default]
    All,
}

/// Replace matches of `pattern` with `replacement`
///
/// The replacement is inserted literally. Returns the number of
/// substitutions; when there was at least one, the cursor moves to the
/// start of the document and search highlights are dropped.
pub fn replace(
    doc: &mut Document,
    pattern: &Pattern,
    replacement: &str,
    scope: ReplaceScope,
) -> Result<usize> {
    let matcher = pattern.compile()?;
    let replacement_len = replacement.chars().count();
    let mut count = 0;

    let mut idx = 0;
    while let Some(block) = doc.block(idx) {
        let found = matcher.find_in(block.text());
        if found.is_empty() {
            idx += 1;
            continue;
        }

        let mut delta: isize = 0;
        let mut stop = false;
        for range in found {
            let start = range.start.saturating_add_signed(delta);
            doc.splice_block(idx, start, range.len(), replacement);
            delta += replacement_len as isize - range.len() as isize;
            count += 1;

            if scope == ReplaceScope::One {
                stop = true;
                break;
            }
        }

        idx += doc.split_lines(idx);
        if stop {
            break;
        }
    }

    if count > 0 {
        doc.set_cursor(0);
        doc.clear_selections();
    }
    debug!(pattern = %pattern.source, count, ?scope, "replace");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::search;

    fn replace_all(text: &str, pattern: &str, replacement: &str) -> (String, usize) {
        let mut doc = Document::from_text(text);
        let count = replace(&mut doc, &Pattern::new(pattern), replacement, ReplaceScope::All).unwrap();
        (doc.to_text(), count)
    }

    #[test]
    fn test_growing_replacement() {
        assert_eq!(replace_all("a,a,a", "a", "aa"), ("aa,aa,aa".to_string(), 3));
    }

    #[test]
    fn test_shrinking_replacement() {
        assert_eq!(replace_all("foo-foo-foo", "foo", "x"), ("x-x-x".to_string(), 3));
    }

    #[test]
    fn test_deleting_replacement() {
        assert_eq!(replace_all("a1b22c", r"\d", ""), ("abc".to_string(), 3));
    }

    #[test]
    fn test_multiple_blocks() {
        assert_eq!(
            replace_all("new a;\nnew b;\nx", "new", "static"),
            ("static a;\nstatic b;\nx".to_string(), 2)
        );
    }

    #[test]
    fn test_replacement_is_literal() {
        assert_eq!(replace_all("foo1", r"foo(\d)", "$1"), ("$1".to_string(), 1));
    }

    #[test]
    fn test_multibyte_delta() {
        assert_eq!(replace_all("é-é-é", "é", "ee"), ("ee-ee-ee".to_string(), 3));
    }

    #[test]
    fn test_scope_one() {
        let mut doc = Document::from_text("b\na a\na");
        let count = replace(&mut doc, &Pattern::new("a"), "X", ReplaceScope::One).unwrap();
        assert_eq!(count, 1);
        assert_eq!(doc.to_text(), "b\nX a\na");
    }

    #[test]
    fn test_cursor_resets_after_replace() {
        let mut doc = Document::from_text("abc\ndef");
        doc.set_cursor(5);
        replace(&mut doc, &Pattern::new("zzz"), "y", ReplaceScope::All).unwrap();
        assert_eq!(doc.cursor(), 5);
        replace(&mut doc, &Pattern::new("e"), "y", ReplaceScope::All).unwrap();
        assert_eq!(doc.cursor(), 0);
    }

    #[test]
    fn test_round_trip_leaves_no_matches() {
        let mut doc = Document::from_text("stock a;\nstock b; // stock");
        let pattern = Pattern::new("stock");
        replace(&mut doc, &pattern, "static", ReplaceScope::All).unwrap();
        assert!(search(&doc, &pattern).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_pattern_changes_nothing() {
        let mut doc = Document::from_text("abc");
        assert!(replace(&mut doc, &Pattern::new("("), "x", ReplaceScope::All).is_err());
        assert_eq!(doc.to_text(), "abc");
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_newline_replacement_splits_block() {
        let mut doc = Document::from_text("a b\nc");
        let count = replace(&mut doc, &Pattern::new(" "), "\n", ReplaceScope::All).unwrap();
        assert_eq!(count, 1);
        let texts: Vec<&str> = doc.blocks().iter().map(|b| b.text()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(Document::from_text(&doc.to_text()).block_count(), doc.block_count());
    }

    #[test]
    fn test_newline_replacement_skips_created_blocks() {
        assert_eq!(
            replace_all("x;y;z\nw;", ";", ";\n"),
            ("x;\ny;\nz\nw;\n".to_string(), 3)
        );
        let mut doc = Document::from_text("a a\na");
        replace(&mut doc, &Pattern::new("a"), "\na", ReplaceScope::One).unwrap();
        assert_eq!(doc.to_text(), "\na a\na");
        assert_eq!(doc.block_count(), 3);
    }

    #[test]
    fn test_replaced_blocks_are_dirty() {
        let mut doc = Document::from_text("a\nb\na");
        doc.take_dirty();
        replace(&mut doc, &Pattern::new("a"), "c", ReplaceScope::All).unwrap();
        assert_eq!(doc.dirty_blocks().collect::<Vec<_>>(), vec![0, 2]);
    }
}
