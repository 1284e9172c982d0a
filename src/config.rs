//! Configuration file support
//!
//! Loads settings from ~/.pawnix.toml (or %USERPROFILE%\.pawnix.toml on Windows)
//!
//! Example:
//! ```text
//! [search]
//! case-sensitive = false
//! whole-word = false
//!
//! [display]
//! color = true
//!
//! [theme]
//! keyword = "bright-blue"
//! block-comment = "grey"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::error::Result;
use crate::syntax::{Color, Style, TokenCategory};

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default case sensitivity for searches
    pub case_sensitive: bool,
    /// Default whole-word flag for searches
    pub whole_word: bool,
    /// Whether to emit colors
    pub color: bool,
    /// Foreground color overrides per category
    pub theme: HashMap<TokenCategory, Color>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            whole_word: false,
            color: true,
            theme: HashMap::new(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".pawnix.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".pawnix.toml"))
        }
    }

    /// Load configuration from file, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        let Ok(contents) = fs::read_to_string(&path) else {
            return Config::default();
        };

        match Self::from_toml_str(&contents) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                config
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring malformed config");
                Config::default()
            }
        }
    }

    /// Parse configuration from TOML text
    ///
    /// Unknown keys and values of the wrong type are ignored.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Config::default();
        config.apply(&table);
        Ok(config)
    }

    /// Apply settings from a parsed table
    fn apply(&mut self, table: &Table) {
        if let Some(search) = table.get("search").and_then(Value::as_table) {
            if let Some(value) = search.get("case-sensitive").and_then(Value::as_bool) {
                self.case_sensitive = value;
            }
            if let Some(value) = search.get("whole-word").and_then(Value::as_bool) {
                self.whole_word = value;
            }
        }

        if let Some(display) = table.get("display").and_then(Value::as_table) {
            if let Some(value) = display.get("color").and_then(Value::as_bool) {
                self.color = value;
            }
        }

        if let Some(theme) = table.get("theme").and_then(Value::as_table) {
            for (key, value) in theme {
                let category = TokenCategory::from_name(key);
                let color = value.as_str().and_then(Color::from_name);
                match (category, color) {
                    (Some(category), Some(color)) => {
                        self.theme.insert(category, color);
                    }
                    _ => warn!(key = %key, "ignoring theme entry"),
                }
            }
        }
    }

    /// Display style for a category, theme overrides applied
    pub fn style_for(&self, category: TokenCategory) -> Style {
        let style = category.default_style();
        match self.theme.get(&category) {
            Some(&color) => style.with_fg(color),
            None => style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PawnixError;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
[search]
case-sensitive = true
whole-word = true

[display]
color = false

[theme]
keyword = "bright-red"
"#;

        let config = Config::from_toml_str(contents).unwrap();
        assert!(config.case_sensitive);
        assert!(config.whole_word);
        assert!(!config.color);
        assert_eq!(config.theme.get(&TokenCategory::Keyword), Some(&Color::BrightRed));
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_wrong_types_ignored() {
        let contents = r#"
[search]
case-sensitive = "yes"

[theme]
keyword = "mauve"
operator = "red"
"#;
        let config = Config::from_toml_str(contents).unwrap();
        assert!(!config.case_sensitive);
        assert!(config.theme.is_empty());
    }

    #[test]
    fn test_malformed_toml() {
        let result = Config::from_toml_str("[search\ncase-sensitive = ");
        assert!(matches!(result, Err(PawnixError::Config(_))));
    }

    #[test]
    fn test_style_for_applies_theme() {
        let mut config = Config::default();
        assert_eq!(
            config.style_for(TokenCategory::Keyword),
            TokenCategory::Keyword.default_style()
        );
        config.theme.insert(TokenCategory::Keyword, Color::Cyan);
        let style = config.style_for(TokenCategory::Keyword);
        assert_eq!(style.fg, Color::Cyan);
        assert!(style.bold);
    }
}
