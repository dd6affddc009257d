//! Internationalization (i18n) engine.
//!
//! Decides which language a request is served in and loads translated content
//! at most once per language, with a fallback to the default language.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported languages (`pt`, `es`)
//! - `language`: Validated `Language` value type
//! - `resolver`: Request language resolution from headers
//! - `bundle`: Typed translation bundle
//! - `store`: Reads bundles from disk, no caching
//! - `cache`: Deduplicated lazy loading with fallback
//! - `facade`: Per-request `Translator` that never fails
//! - `strings`: Hardcoded degraded-mode strings
//! - `metrics`: Cache counters
//!
//! # Example
//!
//! ```rust,ignore
//! use edu_i18n::i18n::{FsBundleStore, TranslationCache, CacheOptions, Translator, Language};
//!
//! let cache = TranslationCache::init(
//!     Arc::new(FsBundleStore::new("locales")),
//!     CacheOptions::default(),
//!     true,
//! )
//! .await;
//!
//! let translator = Translator::build(Language::SPANISH, &cache).await;
//! let prompt = translator.system_prompt();
//! ```

mod bundle;
mod cache;
mod error;
mod facade;
mod language;
mod metrics;
mod registry;
pub mod resolver;
mod store;
mod strings;

#[cfg(test)]
pub(crate) mod test_support;

pub use bundle::{MessageTree, MotivationalTexts, SystemPrompts, TranslationBundle};
pub use cache::{CacheOptions, CacheStats, TranslationCache};
pub use error::{BundleError, BundleResult};
pub use facade::{Translator, API_CONNECTION_ERROR_TOPIC};
pub use language::Language;
pub use metrics::{CacheMetrics, MetricsReport};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use resolver::resolve_from_headers;
pub use store::{BundleStore, FsBundleStore};
pub use strings::{DegradedStrings, DEGRADED_STRINGS};
