//! Per-request translation view.
//!
//! A [`Translator`] is built once per request from the resolved language and
//! the shared cache. Every lookup returns a usable string: missing keys yield
//! the caller's default and an unloadable default language switches the
//! translator into degraded mode backed by [`DEGRADED_STRINGS`].

use crate::i18n::strings::DEGRADED_STRINGS;
use crate::i18n::{
    Language, MessageTree, MotivationalTexts, SystemPrompts, TranslationBundle, TranslationCache,
};
use rand::Rng;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use tracing::{error, warn};

/// Key of the fallback text used when a topic has none of its own.
pub const API_CONNECTION_ERROR_TOPIC: &str = "apiConnectionError";

static DEGRADED_BUNDLE: OnceLock<Arc<TranslationBundle>> = OnceLock::new();

/// Bundle assembled from the hardcoded degraded strings.
fn degraded_bundle() -> Arc<TranslationBundle> {
    let bundle = DEGRADED_BUNDLE.get_or_init(|| {
        let fallback = BTreeMap::from([(
            API_CONNECTION_ERROR_TOPIC.to_string(),
            MessageTree::Text(DEGRADED_STRINGS.fallback_response.to_string()),
        )]);

        Arc::new(TranslationBundle {
            system: SystemPrompts {
                chatbot_prompt: DEGRADED_STRINGS.system_prompt.to_string(),
                code_analysis_prompt: DEGRADED_STRINGS.code_analysis_prompt.to_string(),
                code_analysis_instruction: DEGRADED_STRINGS.code_analysis_instruction.to_string(),
                signature: DEGRADED_STRINGS.signature.to_string(),
            },
            messages: MessageTree::Map(BTreeMap::from([(
                "fallback".to_string(),
                MessageTree::Map(fallback),
            )])),
            motivational: MotivationalTexts {
                texts: vec![DEGRADED_STRINGS.motivational_text.to_string()],
            },
        })
    });
    Arc::clone(bundle)
}

/// Typed, infallible access to one language's translations.
#[derive(Debug, Clone)]
pub struct Translator {
    language: Language,
    bundle: Arc<TranslationBundle>,
    degraded: bool,
}

impl Translator {
    /// Build the translator for `language`.
    ///
    /// Never fails: if the cache cannot produce any bundle (the default
    /// language itself failed to load) the translator is degraded.
    pub async fn build(language: Language, cache: &TranslationCache) -> Self {
        match cache.get(language).await {
            Ok(bundle) => Self::new(language, bundle),
            Err(e) => {
                error!(
                    "No translations available for {}, serving degraded content: {}",
                    language, e
                );
                Self::degraded(language)
            }
        }
    }

    pub fn new(language: Language, bundle: Arc<TranslationBundle>) -> Self {
        Self {
            language,
            bundle,
            degraded: false,
        }
    }

    /// Translator backed only by the hardcoded strings.
    pub fn degraded(language: Language) -> Self {
        Self {
            language,
            bundle: degraded_bundle(),
            degraded: true,
        }
    }

    /// The language resolved for this request.
    ///
    /// This stays the requested language even when the content came from the
    /// default language's bundle.
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_default_language(&self) -> bool {
        self.language.is_default()
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Look up a message by dot-separated key path.
    ///
    /// Returns `default` when any segment is missing, the path ends on a
    /// nested map, or the message is empty.
    pub fn get_message(&self, key_path: &str, default: &str) -> String {
        match self
            .bundle
            .messages
            .lookup(key_path)
            .and_then(MessageTree::as_text)
        {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => {
                warn!(
                    "Translation key '{}' not found for language '{}'",
                    key_path, self.language
                );
                default.to_string()
            }
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.bundle.system.chatbot_prompt
    }

    pub fn code_analysis_prompt(&self) -> &str {
        &self.bundle.system.code_analysis_prompt
    }

    pub fn code_analysis_instruction(&self) -> &str {
        &self.bundle.system.code_analysis_instruction
    }

    pub fn signature(&self) -> &str {
        &self.bundle.system.signature
    }

    /// A uniformly chosen motivational text.
    pub fn random_motivational_text(&self) -> &str {
        let texts = &self.bundle.motivational.texts;
        if texts.is_empty() {
            warn!("No motivational texts for language '{}'", self.language);
            return DEGRADED_STRINGS.motivational_text;
        }
        let index = rand::thread_rng().gen_range(0..texts.len());
        &texts[index]
    }

    /// Fallback text for `topic`, or the generic connection error text.
    pub fn fallback_response(&self, topic: &str) -> &str {
        self.bundle
            .fallback_text(topic)
            .or_else(|| self.bundle.fallback_text(API_CONNECTION_ERROR_TOPIC))
            .unwrap_or(DEGRADED_STRINGS.fallback_response)
    }

    /// The whole bundle backing this translator.
    pub fn all(&self) -> Arc<TranslationBundle> {
        Arc::clone(&self.bundle)
    }
}
