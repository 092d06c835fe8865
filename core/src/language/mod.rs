//! Language catalog and selector.
//!
//! The catalog is fixed at compile time. Each entry pairs a human readable
//! label with a canonical id (used for highlighting and configuration) and
//! the file extension used to name the compared sides.

pub mod detect;

pub use detect::detect;

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Label shown in the selector.
    pub label: &'static str,
    /// Canonical identifier.
    pub id: &'static str,
    /// File extension without the dot.
    pub extension: &'static str,
}

const fn lang(label: &'static str, id: &'static str, extension: &'static str) -> Language {
    Language {
        label,
        id,
        extension,
    }
}

const PLAIN: Language = lang("Plain Text", "plaintext", "txt");

/// Every selectable language, in menu order.
pub const CATALOG: &[Language] = &[
    PLAIN,
    lang("Bash", "bash", "sh"),
    lang("C", "c", "c"),
    lang("C++", "cpp", "cpp"),
    lang("C#", "csharp", "cs"),
    lang("CSS", "css", "css"),
    lang("Go", "go", "go"),
    lang("HTML", "html", "html"),
    lang("Java", "java", "java"),
    lang("JavaScript", "javascript", "js"),
    lang("JSON", "json", "json"),
    lang("Markdown", "markdown", "md"),
    lang("PHP", "php", "php"),
    lang("Python", "python", "py"),
    lang("Ruby", "ruby", "rb"),
    lang("Rust", "rust", "rs"),
    lang("SQL", "sql", "sql"),
    lang("TypeScript", "typescript", "ts"),
    lang("XML", "xml", "xml"),
    lang("YAML", "yaml", "yaml"),
];

impl Language {
    /// The plain text entry, used as the fallback.
    pub const PLAIN_TEXT: &'static Language = &PLAIN;

    /// Looks up an entry by canonical id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<&'static Language> {
        CATALOG.iter().find(|l| l.id.eq_ignore_ascii_case(id))
    }

    /// Looks up an entry by file extension.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<&'static Language> {
        let extension = extension.trim_start_matches('.');
        CATALOG
            .iter()
            .find(|l| l.extension.eq_ignore_ascii_case(extension))
            .or_else(|| match extension.to_ascii_lowercase().as_str() {
                "bash" | "zsh" => Language::from_id("bash"),
                "h" => Language::from_id("c"),
                "cc" | "cxx" | "hpp" | "hh" => Language::from_id("cpp"),
                "htm" => Language::from_id("html"),
                "mjs" | "cjs" | "jsx" => Language::from_id("javascript"),
                "tsx" => Language::from_id("typescript"),
                "yml" => Language::from_id("yaml"),
                "markdown" => Language::from_id("markdown"),
                "text" => Some(Language::PLAIN_TEXT),
                _ => None,
            })
    }

    /// Builds the synthetic file name `<base>.<extension>`.
    #[must_use]
    pub fn file_name(&self, base: &str) -> String {
        format!("{base}.{}", self.extension)
    }
}

/// Errors raised by language selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageError {
    /// The id is not in the catalog
    #[error("Unknown Language: {0}")]
    Unknown(String),
}

/// Dismissible menu over [`CATALOG`] holding the current selection.
#[derive(Debug, Clone, Default)]
pub struct LanguageSelector {
    selected: usize,
    highlighted: usize,
    open: bool,
    explicit: bool,
}

impl LanguageSelector {
    /// Creates a selector starting on `id` without counting as a user pick.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageError::Unknown`] if `id` is not in the catalog.
    pub fn with_default(id: &str) -> Result<Self, LanguageError> {
        let selected = index_of(id)?;
        Ok(Self {
            selected,
            highlighted: selected,
            ..Self::default()
        })
    }

    /// Currently selected language.
    #[must_use]
    pub fn selected(&self) -> &'static Language {
        &CATALOG[self.selected]
    }

    /// Label shown on the selector button.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.selected().label
    }

    /// `true` once the user has picked a language.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Selects `id` and closes the menu.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageError::Unknown`] if `id` is not in the catalog; the
    /// selection and menu state are then left untouched.
    pub fn select(&mut self, id: &str) -> Result<(), LanguageError> {
        let index = index_of(id)?;
        self.selected = index;
        self.highlighted = index;
        self.explicit = true;
        self.open = false;
        Ok(())
    }

    /// `true` while the menu is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Shows the menu with the current selection highlighted.
    pub fn open(&mut self) {
        self.highlighted = self.selected;
        self.open = true;
    }

    /// Hides the menu without changing the selection.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Opens a closed menu, closes an open one.
    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Index of the highlighted menu row.
    #[must_use]
    pub const fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Moves the highlight down, wrapping at the end.
    pub fn highlight_next(&mut self) {
        self.highlighted = (self.highlighted + 1) % CATALOG.len();
    }

    /// Moves the highlight up, wrapping at the start.
    pub fn highlight_previous(&mut self) {
        self.highlighted = self
            .highlighted
            .checked_sub(1)
            .unwrap_or(CATALOG.len() - 1);
    }

    /// Selects the highlighted row and closes the menu.
    pub fn confirm(&mut self) -> &'static Language {
        self.selected = self.highlighted;
        self.explicit = true;
        self.open = false;
        self.selected()
    }
}

fn index_of(id: &str) -> Result<usize, LanguageError> {
    CATALOG
        .iter()
        .position(|l| l.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| LanguageError::Unknown(id.to_string()))
}
