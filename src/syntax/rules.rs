//! Pattern rules for syntax highlighting
//!
//! This module defines the rule table used to classify Pawn source text,
//! the styled ranges it produces and the per-block lexer state.

use regex::Regex;

use super::tokens::TokenCategory;
use crate::text::CharIndex;

/// Pawn keywords, matched as whole words, case-sensitively
pub const KEYWORDS: [&str; 26] = [
    "assert", "break", "case", "const", "continue", "default", "do", "else", "enum", "for",
    "forward", "functag", "goto", "if", "native", "new", "operator", "public", "return",
    "sizeof", "static", "stock", "switch", "tagof", "while", "defined",
];

/// A categorized span of a block, in character offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledRange {
    /// Character offset where this range starts
    pub start: usize,
    /// Length in characters
    pub length: usize,
    /// Category stamped over the range
    pub category: TokenCategory,
}

impl StyledRange {
    /// Create a new styled range
    pub fn new(start: usize, length: usize, category: TokenCategory) -> Self {
        Self { start, length, category }
    }

    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Check if this range covers a character offset
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end()
    }

    /// Check if range is empty
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Lexer state carried from one block into the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LexState {
    #[default]
    Normal,
    /// An unterminated `/*` is still open
    InBlockComment,
}

impl LexState {
    /// Check if we're inside a block comment
    pub fn is_in_comment(&self) -> bool {
        *self == LexState::InBlockComment
    }
}

/// A single rule of the table
///
/// Every occurrence of `pattern` in a block is stamped with `category`.
#[derive(Debug, Clone)]
pub struct TokenRule {
    /// Name for debugging
    pub name: &'static str,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Category assigned to matches
    pub category: TokenCategory,
}

impl TokenRule {
    /// Create a new rule
    pub fn new(name: &'static str, pattern: &str, category: TokenCategory) -> Option<Self> {
        Regex::new(pattern).ok().map(|regex| Self {
            name,
            pattern: regex,
            category,
        })
    }

    /// Stamp every non-overlapping match in `text` onto `out`
    fn stamp(&self, text: &str, index: &CharIndex, out: &mut Vec<StyledRange>) {
        for m in self.pattern.find_iter(text) {
            let start = index.byte_to_char(m.start());
            let end = index.byte_to_char(m.end());
            if end > start {
                out.push(StyledRange::new(start, end - start, self.category));
            }
        }
    }
}

/// Ordered, immutable list of rules
///
/// Order is significant: later rules overwrite earlier ones where they
/// overlap.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<TokenRule>,
}

impl RuleTable {
    /// Build a table from rules in application order
    pub fn new(rules: Vec<TokenRule>) -> Self {
        Self { rules }
    }

    /// The Pawn rule set
    pub fn pawn() -> Self {
        let mut rules = Vec::new();

        // Word characters, digits and boundaries are ASCII-only
        let keywords = format!(r"(?-u:\b)(?:{})(?-u:\b)", KEYWORDS.join("|"));
        if let Some(rule) = TokenRule::new("keyword", &keywords, TokenCategory::Keyword) {
            rules.push(rule);
        }

        // Preprocessor directives
        if let Some(rule) =
            TokenRule::new("preprocessor", r"#[0-9A-Za-z_]+", TokenCategory::Preprocessor)
        {
            rules.push(rule);
        }

        // No escape handling: runs to the nearest quote
        if let Some(rule) = TokenRule::new("string", r#"".*?""#, TokenCategory::StringLiteral) {
            rules.push(rule);
        }

        let number = r"(?-u:\b)[0-9]+(?-u:\b)";
        if let Some(rule) = TokenRule::new("number", number, TokenCategory::NumberLiteral) {
            rules.push(rule);
        }

        if let Some(rule) = TokenRule::new("line_comment", r"//[^\n]*", TokenCategory::LineComment) {
            rules.push(rule);
        }

        Self::new(rules)
    }

    /// Rules in application order
    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }

    /// Run every rule over `text`, in table order
    pub fn apply(&self, text: &str, index: &CharIndex) -> Vec<StyledRange> {
        let mut ranges = Vec::new();
        for rule in &self.rules {
            rule.stamp(text, index, &mut ranges);
        }
        ranges
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::pawn()
    }
}
