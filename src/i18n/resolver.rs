//! Request language resolution.
//!
//! Priority: explicit `x-language` override > weighted `Accept-Language`
//! negotiation > default language. Resolution never fails; anything that
//! cannot be matched resolves to the default.

use crate::i18n::{Language, LanguageRegistry};
use axum::http::HeaderMap;
use std::cmp::Ordering;

/// Header carrying an explicit language choice from the client.
pub const LANGUAGE_OVERRIDE_HEADER: &str = "x-language";

/// Standard weighted language preference header.
pub const ACCEPT_LANGUAGE_HEADER: &str = "accept-language";

/// One entry of an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    /// Base language subtag, lower-cased (`"en"` for `"en-US"`)
    pub base: String,
    /// Quality factor; `1.0` when absent or unparseable
    pub quality: f32,
}

/// Parse an `Accept-Language` header into preferences ordered by descending
/// quality. Entries with equal quality keep their header order.
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    let mut preferences: Vec<LanguagePreference> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.trim().split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() {
                return None;
            }

            let quality = parts
                .filter_map(|param| param.trim().strip_prefix("q="))
                .next()
                .and_then(|value| value.trim().parse::<f32>().ok())
                .filter(|q| q.is_finite())
                .unwrap_or(1.0);

            let base = tag.split('-').next().unwrap_or(tag).to_lowercase();
            Some(LanguagePreference { base, quality })
        })
        .collect();

    // Vec::sort_by is stable, so ties keep header order
    preferences.sort_by(|a, b| {
        b.quality
            .partial_cmp(&a.quality)
            .unwrap_or(Ordering::Equal)
    });
    preferences
}

/// Resolve the effective language code for a request.
///
/// # Arguments
/// * `override_value` - Value of the explicit override header, if any
/// * `accept_language` - Value of the `Accept-Language` header, if any
/// * `supported` - Supported language codes
/// * `default` - Code returned when nothing matches
pub fn resolve<'a>(
    override_value: Option<&str>,
    accept_language: Option<&str>,
    supported: &[&'a str],
    default: &'a str,
) -> &'a str {
    // Exact match only, no normalization
    if let Some(value) = override_value {
        if let Some(code) = supported.iter().copied().find(|code| *code == value) {
            return code;
        }
    }

    if let Some(header) = accept_language {
        for preference in parse_accept_language(header) {
            if let Some(code) = supported.iter().copied().find(|code| *code == preference.base) {
                return code;
            }
        }
    }

    default
}

/// Resolve the language of a request from its headers against the registry.
pub fn resolve_from_headers(headers: &HeaderMap) -> Language {
    let registry = LanguageRegistry::get();
    let supported = registry.codes();
    let default = registry.default_language().code;

    let header_str = |name: &str| headers.get(name).and_then(|value| value.to_str().ok());

    let code = resolve(
        header_str(LANGUAGE_OVERRIDE_HEADER),
        header_str(ACCEPT_LANGUAGE_HEADER),
        &supported,
        default,
    );

    Language::from_code(code).unwrap_or_default()
}
