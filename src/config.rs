use crate::i18n::CacheOptions;
use crate::retry::RetryConfig;
use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Translations
    pub locales_dir: String,
    pub preload_translations: bool,
    pub load_timeout_secs: u64,
    pub load_attempts: u32,

    // Admin endpoints; open when unset
    pub admin_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            port: parse_var("PORT", 3001)?,

            // Translations
            locales_dir: std::env::var("LOCALES_DIR").unwrap_or_else(|_| "locales".to_string()),
            preload_translations: parse_var("I18N_PRELOAD", true)?,
            load_timeout_secs: parse_var("I18N_LOAD_TIMEOUT_SECS", 30)?,
            // 1 = fall back immediately without retrying
            load_attempts: parse_var("I18N_LOAD_ATTEMPTS", 1)?,

            admin_api_key: std::env::var("ADMIN_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
        })
    }

    /// Cache tuning derived from this configuration.
    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions {
            load_timeout: Duration::from_secs(self.load_timeout_secs),
            retry: RetryConfig::bundle_load(self.load_attempts),
        }
    }
}

/// Parse an optional environment variable, using `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", name, value)),
        Err(_) => Ok(default),
    }
}
