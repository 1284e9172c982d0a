//! Terminal rendering of highlighted blocks
//!
//! Writes block text with category styles and search highlights using
//! crossterm commands. With colors disabled the text is written as is.

use std::io::Write;
use std::ops::Range;

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::error::Result;
use crate::syntax::{Color, Style, StyledRange};

/// Map a palette color to crossterm's naming
fn to_crossterm(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::White => TermColor::Grey,
        Color::BrightBlack => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::BrightWhite => TermColor::White,
    }
}

fn write_styled<W: Write>(out: &mut W, text: &str, style: Style) -> Result<()> {
    if style.is_default() {
        queue!(out, Print(text))?;
        return Ok(());
    }
    if style.fg != Color::Default {
        queue!(out, SetForegroundColor(to_crossterm(style.fg)))?;
    }
    if style.bg != Color::Default {
        queue!(out, SetBackgroundColor(to_crossterm(style.bg)))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.reverse {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    queue!(out, Print(text), SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Write one block followed by a newline
///
/// `runs` are resolved (non-overlapping) ranges; `selections` are
/// block-local character ranges drawn in reverse video.
pub fn render_block<W: Write>(
    out: &mut W,
    text: &str,
    runs: &[StyledRange],
    selections: &[Range<usize>],
    config: &Config,
) -> Result<()> {
    if !config.color {
        queue!(out, Print(text), Print("\n"))?;
        return Ok(());
    }

    let mut segment = String::new();
    let mut segment_style = Style::default();
    for (pos, ch) in text.chars().enumerate() {
        let mut style = runs
            .iter()
            .find(|r| r.contains(pos))
            .map(|r| config.style_for(r.category))
            .unwrap_or_default();
        if selections.iter().any(|s| s.contains(&pos)) {
            style.reverse = true;
        }

        if style != segment_style && !segment.is_empty() {
            write_styled(out, &segment, segment_style)?;
            segment.clear();
        }
        segment_style = style;
        segment.push(ch);
    }
    if !segment.is_empty() {
        write_styled(out, &segment, segment_style)?;
    }
    queue!(out, Print("\n"))?;
    Ok(())
}

/// A line of carets underlining `range` of `text`, aligned by display width
pub fn caret_line(text: &str, range: Range<usize>) -> String {
    let before: String = text.chars().take(range.start).collect();
    let matched: String = text.chars().skip(range.start).take(range.len()).collect();
    format!(
        "{}{}",
        " ".repeat(before.width()),
        "^".repeat(matched.width().max(1))
    )
}
