//! Shared fixtures for the i18n unit tests.

use crate::i18n::{
    BundleError, BundleResult, BundleStore, MessageTree, MotivationalTexts, SystemPrompts,
    TranslationBundle,
};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

/// A small but complete bundle whose strings are tagged with `code`.
pub fn sample_bundle(code: &str) -> TranslationBundle {
    let messages = serde_json::json!({
        "errors": {
            "invalidMessage": format!("[{code}] invalid message"),
            "unauthorized": format!("[{code}] unauthorized"),
        },
        "success": { "cacheCleared": format!("[{code}] cache cleared") },
        "fallback": {
            "html": format!("[{code}] html fallback"),
            "apiConnectionError": format!("[{code}] connection error"),
        },
    });

    TranslationBundle {
        system: SystemPrompts {
            chatbot_prompt: format!("[{code}] chatbot prompt"),
            code_analysis_prompt: format!("[{code}] code analysis prompt"),
            code_analysis_instruction: format!("[{code}] analyze:"),
            signature: format!("[{code}] signature"),
        },
        messages: serde_json::from_value::<MessageTree>(messages)
            .expect("fixture messages are valid"),
        motivational: MotivationalTexts {
            texts: vec![
                format!("[{code}] keep going"),
                format!("[{code}] great work"),
                format!("[{code}] almost there"),
            ],
        },
    }
}

/// In-memory store that counts loads per language and can fail, stall, or
/// hold loads behind a gate.
#[derive(Default)]
pub struct CountingStore {
    calls: Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
    failing: Mutex<HashSet<String>>,
    transient: bool,
    delay: Option<Duration>,
    gate: Option<Arc<Semaphore>>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(codes: &[&str]) -> Self {
        let store = Self::new();
        store.set_failing(codes);
        store
    }

    /// Failures look like transient read errors that may be retried.
    pub fn with_transient_failures(mut self) -> Self {
        self.transient = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Loads wait for a permit on `gate` before completing.
    pub fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn set_failing(&self, codes: &[&str]) {
        let mut failing = self.failing.lock().unwrap();
        failing.clear();
        failing.extend(codes.iter().map(|code| code.to_string()));
    }

    pub fn calls(&self, code: &str) -> usize {
        self.calls.lock().unwrap().get(code).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

impl BundleStore for CountingStore {
    fn load(&self, code: &str) -> BoxFuture<'static, BundleResult<TranslationBundle>> {
        *self.calls.lock().unwrap().entry(code.to_string()).or_insert(0) += 1;
        self.total.fetch_add(1, Ordering::SeqCst);

        let code = code.to_string();
        let fails = self.failing.lock().unwrap().contains(&code);
        let transient = self.transient;
        let delay = self.delay;
        let gate = self.gate.clone();

        async move {
            if let Some(gate) = gate {
                // Permits are not returned so each load consumes one
                gate.acquire().await.expect("gate closed").forget();
            }
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if fails {
                return Err(BundleError::Read {
                    path: format!("locales/{code}/messages.json"),
                    reason: if transient {
                        "Resource temporarily unavailable".to_string()
                    } else {
                        "No such file or directory".to_string()
                    },
                    transient,
                });
            }
            Ok(sample_bundle(&code))
        }
        .boxed()
    }
}
