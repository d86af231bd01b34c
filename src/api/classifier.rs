//! Endpoint classification for free-text input.
//!
//! Input that names a constitutional article (`Article 21A`, `art 14`, `a 19`)
//! or the preamble is routed to the per-document lookup endpoint; anything
//! else goes to the general simplification endpoint. Matching is
//! case-insensitive, respects word boundaries and runs on the trimmed text.
//!
//! # Example
//!
//! ```rust
//! use saral::api::classifier::{classify, route, Route};
//! use saral::HttpMethod;
//!
//! assert_eq!(route("Article 21A"), Route::ArticleLookup { id: "21A".to_string() });
//!
//! let request = classify("https://api.example.com", "What is the basic structure doctrine?");
//! assert_eq!(request.method(), HttpMethod::Post);
//! ```

use crate::domain::RequestDescriptor;
use regex::Regex;
use std::sync::OnceLock;

/// Path of the general simplification endpoint.
pub const SIMPLIFY_PATH: &str = "/api/simplify";

/// Path prefix of the per-document lookup endpoint.
pub const ARTICLE_PATH: &str = "/api/get_article";

/// Identifier used for the preamble lookup.
pub const PREAMBLE_ID: &str = "preamble";

fn article_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b(article|art|a|preamble)\b(?:\s*([0-9]+[a-z]*))?")
            .expect("article pattern is a valid regex literal")
    })
}

/// Where a piece of input should be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Free text for the simplification endpoint.
    GeneralQuery,
    /// Lookup of a single document by identifier. `id` may be empty when a
    /// keyword matched without a following number.
    ArticleLookup { id: String },
}

/// Decides which endpoint serves `text`. Pure and deterministic.
#[must_use]
pub fn route(text: &str) -> Route {
    let Some(captures) = article_pattern().captures(text.trim()) else {
        return Route::GeneralQuery;
    };

    let keyword = captures.get(1).map_or("", |m| m.as_str());
    if keyword.eq_ignore_ascii_case(PREAMBLE_ID) {
        return Route::ArticleLookup {
            id: PREAMBLE_ID.to_string(),
        };
    }

    Route::ArticleLookup {
        id: captures
            .get(2)
            .map_or_else(String::new, |m| m.as_str().to_string()),
    }
}

/// Joins `path` onto `base_url`, tolerating a trailing slash on the base.
#[must_use]
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

impl Route {
    /// Builds the request descriptor for this route.
    ///
    /// `text` is the raw input; it becomes the simplify payload untouched.
    #[must_use]
    pub fn descriptor(&self, base_url: &str, text: &str) -> RequestDescriptor {
        match self {
            Self::GeneralQuery => {
                let body = serde_json::json!({ "text": text }).to_string();
                RequestDescriptor::post(endpoint(base_url, SIMPLIFY_PATH), body)
            }
            Self::ArticleLookup { id } => {
                RequestDescriptor::get(endpoint(base_url, &format!("{ARTICLE_PATH}/{id}")))
            }
        }
    }
}

/// Classifies `text` and returns the request to make against `base_url`.
#[must_use]
pub fn classify(base_url: &str, text: &str) -> RequestDescriptor {
    let route = route(text);
    tracing::debug!(route = ?route, "input classified");
    route.descriptor(base_url, text)
}
