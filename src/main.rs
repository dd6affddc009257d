use anyhow::{Context, Result};
use edu_i18n::config::Config;
use edu_i18n::i18n::{FsBundleStore, TranslationCache};
use edu_i18n::server::{router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("edu_i18n=info".parse()?)
                .add_directive("edu_i18n_server=info".parse()?),
        )
        .init();

    info!("Starting i18n server");

    let config = Config::from_env()?;
    info!(
        "Translations from '{}' (preload: {}, timeout: {}s, attempts: {})",
        config.locales_dir,
        config.preload_translations,
        config.load_timeout_secs,
        config.load_attempts
    );
    if config.admin_api_key.is_none() {
        info!("ADMIN_API_KEY not set, cache admin endpoints are open");
    }

    let store = Arc::new(FsBundleStore::new(&config.locales_dir));
    let cache =
        TranslationCache::init(store, config.cache_options(), config.preload_translations).await;

    let addr = format!("0.0.0.0:{}", config.port);
    let app = router(AppState::new(cache, config));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
