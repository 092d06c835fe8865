//! Syntax highlighting of pane contents.
//!
//! Highlighting is line oriented: the output always has exactly one entry
//! per `'\n'`-separated line of the input, so diff lines can index into it by
//! line number. Styles are kept independent of any rendering crate.

use crate::diff::DiffError;
use crate::language::Language;
use serde::Deserialize;
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Colour scheme for highlighted content.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark background.
    #[default]
    Dark,
    /// Light background.
    Light,
}

impl Theme {
    /// Name of the bundled syntect theme backing this scheme.
    #[must_use]
    pub const fn syntect_name(self) -> &'static str {
        match self {
            Self::Dark => "base16-ocean.dark",
            Self::Light => "InspiredGitHub",
        }
    }
}

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Style of a highlighted fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanStyle {
    /// Foreground colour, `None` for the terminal default.
    pub fg: Option<Rgb>,
    /// Bold text.
    pub bold: bool,
    /// Italic text.
    pub italic: bool,
    /// Underlined text.
    pub underline: bool,
}

/// A fragment of a line with a single style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    /// Fragment text, never containing a newline.
    pub text: String,
    /// Fragment style.
    pub style: SpanStyle,
}

/// All fragments of one line, in order.
pub type HighlightedLine = Vec<StyledSpan>;

pub(crate) fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

fn syntax_for(language: &Language) -> &'static SyntaxReference {
    let syntax_set = syntax_set();
    syntax_set
        .find_syntax_by_extension(language.extension)
        .or_else(|| syntax_set.find_syntax_by_token(language.id))
        .unwrap_or_else(|| syntax_set.find_syntax_plain_text())
}

/// Highlights text for a language and theme.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    theme: Theme,
}

impl Highlighter {
    /// Creates a highlighter for a theme.
    #[must_use]
    pub const fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Returns the theme in use.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Highlights `content` line by line.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::Highlight`] if the theme is missing or the
    /// syntax definition fails on the input.
    pub fn highlight(
        &self,
        language: &Language,
        content: &str,
    ) -> Result<Vec<HighlightedLine>, DiffError> {
        let theme = theme_set()
            .themes
            .get(self.theme.syntect_name())
            .ok_or_else(|| {
                DiffError::Highlight(format!("theme {} not bundled", self.theme.syntect_name()))
            })?;

        let syntax_set = syntax_set();
        let mut highlighter = HighlightLines::new(syntax_for(language), theme);
        let mut buf = String::new();
        let mut lines = Vec::new();

        for line in content.split('\n') {
            buf.clear();
            buf.push_str(line);
            buf.push('\n');

            let ranges = highlighter
                .highlight_line(&buf, syntax_set)
                .map_err(|e| DiffError::Highlight(e.to_string()))?;

            let spans = ranges
                .into_iter()
                .filter_map(|(style, text)| {
                    let text = text.trim_end_matches(['\n', '\r']);
                    (!text.is_empty()).then(|| StyledSpan {
                        text: text.to_string(),
                        style: convert_style(style),
                    })
                })
                .collect();
            lines.push(spans);
        }

        Ok(lines)
    }
}

fn convert_style(style: Style) -> SpanStyle {
    let fg = (style.foreground.a != 0)
        .then(|| Rgb(style.foreground.r, style.foreground.g, style.foreground.b));
    SpanStyle {
        fg,
        bold: style.font_style.contains(FontStyle::BOLD),
        italic: style.font_style.contains(FontStyle::ITALIC),
        underline: style.font_style.contains(FontStyle::UNDERLINE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(line: &HighlightedLine) -> String {
        line.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_one_entry_per_line() {
        let lang = Language::from_id("rust").unwrap();
        let lines = Highlighter::new(Theme::Dark)
            .highlight(lang, "fn main() {\n    let x = 1;\n}\n")
            .unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(joined(&lines[0]), "fn main() {");
        assert_eq!(joined(&lines[1]), "    let x = 1;");
        assert!(lines[3].is_empty());
    }

    #[test]
    fn test_keywords_are_coloured() {
        let lang = Language::from_id("rust").unwrap();
        let lines = Highlighter::new(Theme::Dark)
            .highlight(lang, "fn main() {}")
            .unwrap();
        let styles: Vec<_> = lines[0].iter().map(|s| s.style.fg).collect();
        assert!(styles.iter().all(Option::is_some));
        // more than one distinct colour on a line of rust
        assert!(styles.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_plain_text_round_trips() {
        let lang = Language::from_id("plaintext").unwrap();
        let lines = Highlighter::new(Theme::Light)
            .highlight(lang, "hello\nworld")
            .unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(joined(&lines[1]), "world");
    }

    #[test]
    fn test_themes_are_bundled() {
        for theme in [Theme::Dark, Theme::Light] {
            assert!(theme_set().themes.contains_key(theme.syntect_name()));
        }
    }
}
