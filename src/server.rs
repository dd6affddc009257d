//! HTTP surface: i18n middleware, public lookups and cache administration.

use crate::config::Config;
use crate::i18n::{resolve_from_headers, Language, LanguageRegistry, TranslationCache, Translator};
use crate::responses::{i18n_error, i18n_success, unsupported_language};
use crate::security::admin_key_matches;
use axum::extract::{Path, Request, State};
use axum::http::header::CONTENT_LANGUAGE;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Extension, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Response header listing every supported language code.
pub const SUPPORTED_LANGUAGES_HEADER: HeaderName = HeaderName::from_static("x-supported-languages");

/// Request header carrying the admin API key.
pub const ADMIN_KEY_HEADER: &str = "x-api-key";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub cache: TranslationCache,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(cache: TranslationCache, config: Config) -> Self {
        Self {
            cache,
            config: Arc::new(config),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/api/i18n/cache", get(cache_stats).delete(clear_all_cache))
        .route("/api/i18n/cache/:language", delete(clear_language_cache))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_key,
        ));

    // Routes added after the i18n layer never touch the translation cache
    Router::new()
        .route("/api/languages", get(languages))
        .route("/api/motivational-text", get(motivational_text))
        .route("/api/fallback/:topic", get(fallback_response))
        .route("/api/translations/:language", get(translations))
        .merge(admin)
        .layer(middleware::from_fn_with_state(state.clone(), i18n_middleware))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolve the request language, attach a [`Translator`] and advertise the
/// language choice on the response.
pub async fn i18n_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let language = resolve_from_headers(request.headers());
    let translator = Translator::build(language, &state.cache).await;
    request.extensions_mut().insert(translator);

    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(CONTENT_LANGUAGE, HeaderValue::from_static(language.code()));
    if let Ok(value) = HeaderValue::from_str(&state.cache.supported_codes().join(",")) {
        headers.insert(SUPPORTED_LANGUAGES_HEADER, value);
    }
    response
}

async fn require_admin_key(
    State(state): State<AppState>,
    Extension(translator): Extension<Translator>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if !admin_key_matches(state.config.admin_api_key.as_deref(), presented) {
        warn!("Rejected admin request to {}", request.uri().path());
        return i18n_error(
            &translator,
            StatusCode::UNAUTHORIZED,
            "errors.unauthorized",
            None,
            Value::Null,
        );
    }

    next.run(request).await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn languages(Extension(translator): Extension<Translator>) -> Response {
    let registry = LanguageRegistry::get();
    let languages: Vec<Value> = registry
        .list()
        .into_iter()
        .map(|lang| {
            json!({
                "code": lang.code,
                "name": lang.name,
                "nativeName": lang.native_name,
            })
        })
        .collect();

    i18n_success(
        &translator,
        json!({
            "supportedLanguages": registry.codes(),
            "defaultLanguage": registry.default_language().code,
            "isDefaultLanguage": translator.is_default_language(),
            "languages": languages,
        }),
        None,
    )
}

async fn motivational_text(Extension(translator): Extension<Translator>) -> Response {
    let text = translator.random_motivational_text().to_string();
    i18n_success(&translator, json!({ "text": text }), None)
}

async fn fallback_response(
    Extension(translator): Extension<Translator>,
    Path(topic): Path<String>,
) -> Response {
    let message = translator.fallback_response(&topic).to_string();
    i18n_success(&translator, json!({ "topic": topic, "message": message }), None)
}

/// Full bundle for the language named in the path.
async fn translations(
    State(state): State<AppState>,
    Extension(translator): Extension<Translator>,
    Path(code): Path<String>,
) -> Response {
    let Some(language) = Language::from_code(&code) else {
        return unsupported_language(&code, &state.cache.supported_codes());
    };

    let requested = Translator::build(language, &state.cache).await;
    if requested.is_degraded() {
        return i18n_error(
            &translator,
            StatusCode::SERVICE_UNAVAILABLE,
            "errors.translationsUnavailable",
            None,
            json!({ "requestedLanguage": language.code() }),
        );
    }

    Json(&*requested.all()).into_response()
}

async fn cache_stats(State(state): State<AppState>) -> Response {
    Json(state.cache.stats()).into_response()
}

async fn clear_all_cache(
    State(state): State<AppState>,
    Extension(translator): Extension<Translator>,
) -> Response {
    state.cache.clear(None);
    info!("Translation cache cleared via admin endpoint");
    i18n_success(
        &translator,
        json!({ "cleared": state.cache.supported_codes() }),
        Some("success.cacheCleared"),
    )
}

async fn clear_language_cache(
    State(state): State<AppState>,
    Extension(translator): Extension<Translator>,
    Path(code): Path<String>,
) -> Response {
    let Some(language) = Language::from_code(&code) else {
        return unsupported_language(&code, &state.cache.supported_codes());
    };

    state.cache.clear(Some(language));
    info!("Translation cache cleared for {} via admin endpoint", language);
    i18n_success(
        &translator,
        json!({ "cleared": [language.code()] }),
        Some("success.cacheCleared"),
    )
}
