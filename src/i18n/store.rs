//! Bundle storage: reads the three JSON documents of one language.
//!
//! A store performs no caching and no retries. Every call is fresh I/O;
//! deduplication and fallback are the cache's job.

use crate::i18n::{
    BundleError, BundleResult, MessageTree, MotivationalTexts, SystemPrompts, TranslationBundle,
};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

pub const SYSTEM_FILE: &str = "system.json";
pub const MESSAGES_FILE: &str = "messages.json";
pub const MOTIVATIONAL_FILE: &str = "motivational.json";

/// Source of translation bundles.
///
/// The returned future owns everything it needs so it can be driven by a
/// background task independent of the caller.
pub trait BundleStore: Send + Sync {
    fn load(&self, code: &str) -> BoxFuture<'static, BundleResult<TranslationBundle>>;
}

/// Reads bundles from `<root>/<code>/{system,messages,motivational}.json`.
#[derive(Debug, Clone)]
pub struct FsBundleStore {
    root: PathBuf,
}

impl FsBundleStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl BundleStore for FsBundleStore {
    fn load(&self, code: &str) -> BoxFuture<'static, BundleResult<TranslationBundle>> {
        let dir = self.root.join(code);
        let code = code.to_string();

        async move {
            debug!("Reading translation files for '{}' from {}", code, dir.display());

            // All three files are read concurrently; the first failure wins
            let (system, messages, motivational) = tokio::try_join!(
                load_json::<SystemPrompts>(dir.join(SYSTEM_FILE)),
                load_json::<MessageTree>(dir.join(MESSAGES_FILE)),
                load_json::<MotivationalTexts>(dir.join(MOTIVATIONAL_FILE)),
            )?;

            Ok(TranslationBundle {
                system,
                messages,
                motivational,
            })
        }
        .boxed()
    }
}

/// Load and parse a single JSON document.
async fn load_json<T: DeserializeOwned>(path: PathBuf) -> BundleResult<T> {
    let path_str = path.display().to_string();

    let data = tokio::fs::read_to_string(&path).await.map_err(|e| {
        error!("Error loading file {}: {}", path_str, e);
        BundleError::Read {
            path: path_str.clone(),
            reason: e.to_string(),
            transient: e.kind() != ErrorKind::NotFound,
        }
    })?;

    serde_json::from_str(&data).map_err(|e| {
        error!("Error parsing file {}: {}", path_str, e);
        BundleError::Parse {
            path: path_str,
            reason: e.to_string(),
        }
    })
}
