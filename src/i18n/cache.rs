//! Translation cache: lazy, deduplicated, fallback-aware bundle loading.
//!
//! Each language is in one of three states: absent, in flight (a shared
//! [`LoadTicket`] in `pending`), or cached. The transition absent → in flight
//! happens inside one critical section, so at most one store load runs per
//! language. Loads run on their own task and commit their result themselves,
//! which means a caller that stops waiting never cancels a load other callers
//! depend on.

use crate::i18n::{
    BundleError, BundleResult, BundleStore, CacheMetrics, Language, MetricsReport,
    TranslationBundle,
};
use crate::retry::{with_retry_if, RetryConfig};
use chrono::{DateTime, Utc};
use futures::future::{join_all, BoxFuture, Shared};
use futures::FutureExt;
use serde::Serialize;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, error, info, warn};

type LoadResult = BundleResult<Arc<TranslationBundle>>;

/// Pending load shared by every requester of one language.
#[derive(Clone)]
struct LoadTicket {
    /// Distinguishes a load from a newer one started after a `clear`
    id: u64,
    result: Shared<BoxFuture<'static, LoadResult>>,
}

struct CacheEntry {
    bundle: Arc<TranslationBundle>,
    loaded_at: DateTime<Utc>,
}

#[derive(Default)]
struct CacheState {
    cached: HashMap<&'static str, CacheEntry>,
    pending: HashMap<&'static str, LoadTicket>,
    next_ticket: u64,
}

/// Tuning for bundle loads.
#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// Upper bound for a single load attempt
    pub load_timeout: Duration,
    /// Retry policy applied before falling back to the default language
    pub retry: RetryConfig,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            load_timeout: Duration::from_secs(30),
            retry: RetryConfig::none(),
        }
    }
}

/// Read-only snapshot of the cache.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub cached_languages: Vec<&'static str>,
    pub loading_languages: Vec<&'static str>,
    pub supported_languages: Vec<&'static str>,
    pub default_language: &'static str,
    pub loaded_at: HashMap<&'static str, DateTime<Utc>>,
    pub metrics: MetricsReport,
}

struct Inner {
    store: Arc<dyn BundleStore>,
    options: CacheOptions,
    default_language: Language,
    supported: Vec<Language>,
    state: Mutex<CacheState>,
    metrics: CacheMetrics,
}

/// Process-wide bundle cache. Cloning yields another handle to the same cache.
#[derive(Clone)]
pub struct TranslationCache {
    inner: Arc<Inner>,
}

impl TranslationCache {
    pub fn new(store: Arc<dyn BundleStore>, options: CacheOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                options,
                default_language: Language::default_language(),
                supported: Language::all(),
                state: Mutex::new(CacheState::default()),
                metrics: CacheMetrics::new(),
            }),
        }
    }

    /// Create the cache and, if requested, warm it with every supported language.
    pub async fn init(store: Arc<dyn BundleStore>, options: CacheOptions, preload: bool) -> Self {
        let cache = Self::new(store, options);
        if preload {
            cache.preload_all().await;
        }
        cache
    }

    /// Get the bundle for `language`, loading it on first use.
    ///
    /// If a non-default language fails to load, the default language's bundle
    /// is returned instead. Only a failure of the default language itself is
    /// reported as an error.
    pub async fn get(&self, language: Language) -> BundleResult<Arc<TranslationBundle>> {
        match self.get_exact(language).await {
            Ok(bundle) => Ok(bundle),
            Err(e) if language != self.inner.default_language => {
                warn!(
                    "Falling back to {} for language {}: {}",
                    self.inner.default_language, language, e
                );
                self.inner.metrics.record_fallback();
                self.get_exact(self.inner.default_language).await
            }
            Err(e) => {
                error!(
                    "Default language {} could not be loaded: {}",
                    language, e
                );
                Err(e)
            }
        }
    }

    /// Get the bundle for exactly `language`, without fallback.
    async fn get_exact(&self, language: Language) -> LoadResult {
        let ticket = {
            let mut state = self.inner.lock_state();

            if let Some(entry) = state.cached.get(language.code()) {
                self.inner.metrics.record_cache_hit();
                return Ok(Arc::clone(&entry.bundle));
            }

            match state.pending.get(language.code()) {
                Some(ticket) => {
                    debug!("Joining in-flight load for {}", language);
                    self.inner.metrics.record_load_join();
                    ticket.clone()
                }
                None => self.start_load(&mut state, language),
            }
        };

        ticket.result.await
    }

    /// Register a ticket for `language` and spawn its load.
    ///
    /// Must be called with the state lock held so registration is atomic.
    fn start_load(&self, state: &mut CacheState, language: Language) -> LoadTicket {
        state.next_ticket += 1;
        let id = state.next_ticket;
        self.inner.metrics.record_load_started();
        info!("Loading translations for {}", language);

        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            let result = AssertUnwindSafe(inner.load(language))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    Err(BundleError::TaskFailed {
                        language: language.code().to_string(),
                        reason: "bundle load panicked".to_string(),
                    })
                });
            inner.commit(language, id, &result);
            result
        });

        let result = handle
            .map(move |joined| {
                joined.unwrap_or_else(|e| {
                    Err(BundleError::TaskFailed {
                        language: language.code().to_string(),
                        reason: e.to_string(),
                    })
                })
            })
            .boxed()
            .shared();

        let ticket = LoadTicket { id, result };
        state.pending.insert(language.code(), ticket.clone());
        ticket
    }

    /// Evict the cached bundle and any in-flight load for one language, or
    /// for all languages when `language` is `None`.
    ///
    /// Callers already waiting on an evicted load still receive its result,
    /// but that result is not stored.
    pub fn clear(&self, language: Option<Language>) {
        let mut state = self.inner.lock_state();
        match language {
            Some(language) => {
                state.cached.remove(language.code());
                state.pending.remove(language.code());
                info!("Cache cleared for language: {}", language);
            }
            None => {
                state.cached.clear();
                state.pending.clear();
                info!("All translation cache cleared");
            }
        }
    }

    /// Load every supported language concurrently.
    ///
    /// Each language goes through [`get`](Self::get), so a failing language
    /// falls back like any request would and does not prevent the others
    /// from loading. Returns the languages whose own bundle is now cached.
    pub async fn preload_all(&self) -> Vec<Language> {
        info!("Preloading translations for all supported languages...");

        let results = join_all(self.inner.supported.iter().map(|&language| async move {
            (language, self.get(language).await)
        }))
        .await;

        for (language, result) in &results {
            if let Err(e) = result {
                error!("Failed to preload language {}: {}", language, e);
            }
        }

        let loaded: Vec<Language> = {
            let state = self.inner.lock_state();
            let cached: Vec<Language> = self
                .inner
                .supported
                .iter()
                .copied()
                .filter(|language| state.cached.contains_key(language.code()))
                .collect();
            cached
        };

        info!(
            "Preloading complete. Cached languages: {}",
            loaded
                .iter()
                .map(Language::code)
                .collect::<Vec<_>>()
                .join(", ")
        );
        loaded
    }

    /// Snapshot of cached and in-flight languages plus counters.
    pub fn stats(&self) -> CacheStats {
        let state = self.inner.lock_state();

        // Report in registry order rather than hash order
        let in_order = |present: &dyn Fn(&str) -> bool| -> Vec<&'static str> {
            self.inner
                .supported
                .iter()
                .map(Language::code)
                .filter(|&code| present(code))
                .collect()
        };

        CacheStats {
            cached_languages: in_order(&|code| state.cached.contains_key(code)),
            loading_languages: in_order(&|code| state.pending.contains_key(code)),
            supported_languages: self.supported_codes(),
            default_language: self.inner.default_language.code(),
            loaded_at: state
                .cached
                .iter()
                .map(|(code, entry)| (*code, entry.loaded_at))
                .collect(),
            metrics: self.inner.metrics.report(),
        }
    }

    pub fn default_language(&self) -> Language {
        self.inner.default_language
    }

    pub fn supported_languages(&self) -> &[Language] {
        &self.inner.supported
    }

    pub fn supported_codes(&self) -> Vec<&'static str> {
        self.inner.supported.iter().map(Language::code).collect()
    }

    pub fn is_language_supported(&self, code: &str) -> bool {
        self.inner.supported.iter().any(|language| language.code() == code)
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.inner.metrics
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        // State is only mutated in small, non-panicking sections
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// One logical load: store call under a timeout, with the configured retries.
    async fn load(&self, language: Language) -> LoadResult {
        let timeout = self.options.load_timeout;
        let operation_name = format!("Loading translations for {}", language);

        with_retry_if(
            &self.options.retry,
            &operation_name,
            || {
                let load = self.store.load(language.code());
                async move {
                    tokio::time::timeout(timeout, load)
                        .await
                        .unwrap_or_else(|_| {
                            Err(BundleError::Timeout {
                                language: language.code().to_string(),
                                after: timeout,
                            })
                        })
                }
            },
            BundleError::is_retryable,
        )
        .await
        .map(Arc::new)
    }

    /// Move a finished load out of `pending`, caching it on success.
    ///
    /// A load whose ticket was evicted by `clear` is discarded.
    fn commit(&self, language: Language, id: u64, result: &LoadResult) {
        if let Err(e) = result {
            self.metrics.record_load_failure();
            error!("Error loading translations for {}: {}", language, e);
        }

        let mut state = self.lock_state();
        let is_current = state
            .pending
            .get(language.code())
            .is_some_and(|ticket| ticket.id == id);
        if !is_current {
            debug!("Discarding result of cleared load for {}", language);
            return;
        }

        state.pending.remove(language.code());
        if let Ok(bundle) = result {
            state.cached.insert(
                language.code(),
                CacheEntry {
                    bundle: Arc::clone(bundle),
                    loaded_at: Utc::now(),
                },
            );
            info!("Translations cached for {}", language);
        }
    }
}
