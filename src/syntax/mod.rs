//! Syntax highlighting
//!
//! This module provides the Pawn rule table, block comment state tracking
//! and the incremental highlighting pass over a document.

mod comments;
mod highlighter;
mod manager;
mod rules;
mod style;
mod tokens;

pub use comments::{scan_block_comments, CommentScan};
pub use highlighter::{highlight_block, BlockHighlight};
pub use manager::Highlighter;
pub use rules::{LexState, RuleTable, StyledRange, TokenRule, KEYWORDS};
pub use style::{Color, Style};
pub use tokens::TokenCategory;
