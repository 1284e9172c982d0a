//! Token categories for syntax highlighting
//!
//! This module defines the categories the rule table can assign
//! and their default visual styles.

use super::style::{Color, Style};

/// Semantic token categories for Pawn highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    /// Language keywords (if, stock, native, etc.)
    Keyword,
    /// Preprocessor directives (#include, #define)
    Preprocessor,
    /// String literals ("...")
    StringLiteral,
    /// Integer literals
    NumberLiteral,
    /// `//` comments running to the end of the block
    LineComment,
    /// `/* */` comments, possibly spanning several blocks
    BlockComment,
}

impl TokenCategory {
    /// All categories, in rule-table order
    pub const ALL: [TokenCategory; 6] = [
        TokenCategory::Keyword,
        TokenCategory::Preprocessor,
        TokenCategory::StringLiteral,
        TokenCategory::NumberLiteral,
        TokenCategory::LineComment,
        TokenCategory::BlockComment,
    ];

    /// Get the default style for this category
    pub fn default_style(&self) -> Style {
        match self {
            TokenCategory::Keyword => Style::fg(Color::Blue).with_bold(),
            TokenCategory::Preprocessor => Style::fg(Color::Magenta),
            TokenCategory::StringLiteral => Style::fg(Color::Yellow),
            TokenCategory::NumberLiteral => Style::fg(Color::BrightGreen),
            TokenCategory::LineComment => Style::fg(Color::Green),
            TokenCategory::BlockComment => Style::fg(Color::Green),
        }
    }

    /// Get a human-readable name for this category
    pub fn name(&self) -> &'static str {
        match self {
            TokenCategory::Keyword => "Keyword",
            TokenCategory::Preprocessor => "Preprocessor",
            TokenCategory::StringLiteral => "String",
            TokenCategory::NumberLiteral => "Number",
            TokenCategory::LineComment => "LineComment",
            TokenCategory::BlockComment => "BlockComment",
        }
    }

    /// Parse a category from a config key (`[theme]` table)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "keyword" => Some(TokenCategory::Keyword),
            "preprocessor" => Some(TokenCategory::Preprocessor),
            "string" => Some(TokenCategory::StringLiteral),
            "number" => Some(TokenCategory::NumberLiteral),
            "line-comment" | "linecomment" => Some(TokenCategory::LineComment),
            "block-comment" | "blockcomment" => Some(TokenCategory::BlockComment),
            _ => None,
        }
    }
}
