//! Translation cache metrics.
//!
//! Counters are owned by a single cache instance and only ever observed;
//! they have no effect on caching behavior.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Atomic counters describing cache activity.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    /// Lookups answered from the cache without I/O
    cache_hits: AtomicUsize,

    /// Lookups that attached to a load already in flight
    load_joins: AtomicUsize,

    /// Loads started against the bundle store
    loads_started: AtomicUsize,

    /// Loads that ended in an error (including timeouts)
    load_failures: AtomicUsize,

    /// Requests served with the default language after a failed load
    fallbacks: AtomicUsize,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_join(&self) {
        self.load_joins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_started(&self) {
        self.loads_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn load_joins(&self) -> usize {
        self.load_joins.load(Ordering::Relaxed)
    }

    pub fn loads_started(&self) -> usize {
        self.loads_started.load(Ordering::Relaxed)
    }

    pub fn load_failures(&self) -> usize {
        self.load_failures.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let joins = self.load_joins();
        let loads = self.loads_started();
        let lookups = hits + joins + loads;
        let cache_hit_rate = if lookups > 0 {
            (hits as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            load_joins: joins,
            loads_started: loads,
            load_failures: self.load_failures(),
            fallbacks: self.fallbacks(),
            cache_hit_rate,
        }
    }
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub load_joins: usize,
    pub loads_started: usize,
    pub load_failures: usize,
    pub fallbacks: usize,

    /// Share of lookups answered from the cache, as a percentage (0-100)
    pub cache_hit_rate: f64,
}
