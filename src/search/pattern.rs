//! Search pattern compilation
//!
//! The search string is used as a regular expression as typed: no
//! escaping is applied, so `a.c` matches `abc`.

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::error::Result;
use crate::text::CharIndex;

/// User search configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    /// Regular expression source
    pub source: String,
    /// Match letter case exactly
    pub case_sensitive: bool,
    /// Whole-word search flag
    ///
    /// It adds no word boundaries. Whole-word searches fold case unless
    /// `case_sensitive` is set, which is also what happens without it.
    pub whole_word: bool,
}

impl Pattern {
    /// Create a case-insensitive pattern
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Builder: set case sensitivity
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Builder: set the whole-word flag
    pub fn with_whole_word(mut self, whole_word: bool) -> Self {
        self.whole_word = whole_word;
        self
    }

    /// Whether the compiled matcher ignores letter case
    ///
    /// `case_sensitive` always wins over the whole-word case default.
    pub fn folds_case(&self) -> bool {
        !self.case_sensitive
    }

    /// Compile into a matcher
    ///
    /// Fails with `InvalidPattern` when the source is not a valid regex.
    pub fn compile(&self) -> Result<Matcher> {
        if self.source.is_empty() {
            return Ok(Matcher { regex: None });
        }
        let regex = RegexBuilder::new(&self.source)
            .case_insensitive(self.folds_case())
            .build()?;
        Ok(Matcher { regex: Some(regex) })
    }
}

/// A compiled pattern
#[derive(Debug, Clone)]
pub struct Matcher {
    /// `None` for the empty pattern, which matches nothing
    regex: Option<Regex>,
}

impl Matcher {
    /// Find all non-overlapping, non-empty matches in `text`
    ///
    /// Ranges are character offsets into `text`.
    pub fn find_in(&self, text: &str) -> Vec<Range<usize>> {
        let Some(regex) = &self.regex else {
            return Vec::new();
        };
        let index = CharIndex::new(text);
        regex
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| index.byte_to_char(m.start())..index.byte_to_char(m.end()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PawnixError;

    fn find(pattern: Pattern, text: &str) -> Vec<Range<usize>> {
        pattern.compile().map(|m| m.find_in(text)).unwrap_or_default()
    }

    #[test]
    fn test_no_boundaries_and_case_folded_by_default() {
        assert_eq!(find(Pattern::new("if"), "If (x) iffy"), vec![0..2, 7..9]);
    }

    #[test]
    fn test_case_sensitive_wins_over_whole_word() {
        let pattern = Pattern::new("if").with_whole_word(true).with_case_sensitive(true);
        assert_eq!(find(pattern, "If (x) iffy"), vec![7..9]);
    }

    #[test]
    fn test_whole_word_folds_case_without_boundaries() {
        let pattern = Pattern::new("if").with_whole_word(true);
        assert!(pattern.folds_case());
        assert_eq!(find(pattern, "If (x) iffy"), vec![0..2, 7..9]);
    }

    #[test]
    fn test_source_is_a_regex() {
        assert_eq!(find(Pattern::new("a.c"), "abc a.c"), vec![0..3, 4..7]);
        assert_eq!(find(Pattern::new(r"\d+"), "x 12 y 345"), vec![2..4, 7..10]);
    }

    #[test]
    fn test_invalid_regex() {
        let err = Pattern::new("foo(").compile();
        assert!(matches!(err, Err(PawnixError::InvalidPattern(_))));
    }

    #[test]
    fn test_empty_pattern_matches_nothing() {
        assert!(find(Pattern::new(""), "anything").is_empty());
    }

    #[test]
    fn test_empty_matches_skipped() {
        assert_eq!(find(Pattern::new("x*"), "axxb"), vec![1..3]);
    }

    #[test]
    fn test_char_offsets() {
        assert_eq!(find(Pattern::new("b"), "ééb"), vec![2..3]);
    }
}
