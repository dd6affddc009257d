//! Language type: validated language representation.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use serde::{Serialize, Serializer};
use std::fmt;

/// A language validated against the registry.
///
/// Only supported codes can be turned into a `Language`, so any value of this
/// type is safe to use as a cache key or a locale directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "pt", "es")
    code: &'static str,
}

impl Language {
    pub const PORTUGUESE: Language = Language { code: "pt" };

    pub const SPANISH: Language = Language { code: "es" };

    /// Create a Language from an exact, supported language code.
    ///
    /// Returns `None` for unknown codes; no case or region normalization is
    /// applied.
    pub fn from_code(code: &str) -> Option<Language> {
        LanguageRegistry::get()
            .get_by_code(code)
            .map(|config| Language { code: config.code })
    }

    /// The default language (Portuguese).
    pub fn default_language() -> Language {
        Language {
            code: LanguageRegistry::get().default_language().code,
        }
    }

    /// All supported languages, in registration order.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .codes()
            .into_iter()
            .map(|code| Language { code })
            .collect()
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not registered, which cannot happen for a value
    /// built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::default_language()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
