//! JSON response helpers that localize their messages.
//!
//! Every body carries the resolved `language` so clients can tell which
//! translation they received.

use crate::i18n::Translator;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};

const DEFAULT_ERROR: &str = "An error occurred";
const DEFAULT_SUCCESS: &str = "Success";

/// Localized error response: `{error, language, ...extra, details?}`.
///
/// `extra` is merged when it is a JSON object and ignored otherwise.
pub fn i18n_error(
    translator: &Translator,
    status: StatusCode,
    error_key: &str,
    details_key: Option<&str>,
    extra: Value,
) -> Response {
    let mut body = Map::new();
    body.insert(
        "error".to_string(),
        Value::String(translator.get_message(error_key, DEFAULT_ERROR)),
    );
    body.insert(
        "language".to_string(),
        Value::String(translator.language().code().to_string()),
    );
    merge_object(&mut body, extra);

    if let Some(key) = details_key {
        let details = translator.get_message(key, "");
        if !details.is_empty() {
            body.insert("details".to_string(), Value::String(details));
        }
    }

    (status, Json(Value::Object(body))).into_response()
}

/// Localized success response: `{...data, language, message?}`.
pub fn i18n_success(translator: &Translator, data: Value, message_key: Option<&str>) -> Response {
    let mut body = Map::new();
    merge_object(&mut body, data);
    body.insert(
        "language".to_string(),
        Value::String(translator.language().code().to_string()),
    );

    if let Some(key) = message_key {
        body.insert(
            "message".to_string(),
            Value::String(translator.get_message(key, DEFAULT_SUCCESS)),
        );
    }

    Json(Value::Object(body)).into_response()
}

/// 400 response for a language path parameter outside the supported set.
pub fn unsupported_language(requested: &str, supported: &[&str]) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "Unsupported language",
            "message": format!(
                "Language '{}' is not supported. Supported languages: {}",
                requested,
                supported.join(", ")
            ),
            "supportedLanguages": supported,
        })),
    )
        .into_response()
}

fn merge_object(body: &mut Map<String, Value>, value: Value) {
    if let Value::Object(map) = value {
        body.extend(map);
    }
}
