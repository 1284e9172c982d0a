//! pawnix - incremental Pawn highlighting and regex search/replace
//!
//! A document is an ordered sequence of blocks (lines). The [`Highlighter`]
//! classifies each block with a fixed regex rule table and tracks block
//! comments across blocks, re-highlighting only what an edit affects. The
//! [`search`] module finds and replaces regex matches over the same blocks.

pub mod block;
pub mod completion;
pub mod config;
pub mod document;
pub mod error;
pub mod render;
pub mod search;
pub mod syntax;
pub mod text;

pub use block::Block;
pub use config::Config;
pub use document::Document;
pub use error::{PawnixError, Result};
pub use search::{go_to_line, highlight_matches, replace, Match, Pattern, ReplaceScope};
pub use syntax::{BlockHighlight, Highlighter, LexState, StyledRange, TokenCategory};
