//! Language registry: Single source of truth for all supported languages.
//!
//! The set of supported languages is fixed at compile time. It is exposed
//! through a lazily initialized `OnceLock` singleton because it never changes;
//! all mutable translation state lives in [`crate::i18n::TranslationCache`].

use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "pt", "es")
    pub code: &'static str,

    /// English name of the language (e.g., "Portuguese", "Spanish")
    pub name: &'static str,

    /// Native name of the language (e.g., "Português", "Español")
    pub native_name: &'static str,

    /// Whether this is the default language (exactly one must be true)
    pub is_default: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its exact code.
    ///
    /// Matching is case-sensitive: `"PT"` and `"pt-BR"` are not supported codes.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All supported languages, in registration order.
    pub fn list(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Supported language codes, in registration order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.languages.iter().map(|lang| lang.code).collect()
    }

    /// Get the default language configuration.
    ///
    /// # Panics
    /// Panics if zero or several default languages are registered. The table
    /// is static, so this is a programming error caught by the unit tests.
    pub fn default_language(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default languages found in registry"),
        }
    }

    /// Check if a language code is supported.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

/// Portuguese is the default; Spanish is the only other bundle shipped.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "pt",
            name: "Portuguese",
            native_name: "Português",
            is_default: true,
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_default: false,
        },
    ]
}
