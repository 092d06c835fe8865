//! Language selection configuration.

use serde::Deserialize;

/// Language settings.
#[derive(Debug, Deserialize, Clone)]
pub struct LanguageSettings {
    /// Catalog id selected at startup (default: "plaintext")
    #[serde(default = "default_language")]
    pub default: String,

    /// Guess the language from content until one is picked (default: false)
    #[serde(default)]
    pub auto_detect: bool,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            default: default_language(),
            auto_detect: false,
        }
    }
}

fn default_language() -> String {
    "plaintext".to_string()
}
