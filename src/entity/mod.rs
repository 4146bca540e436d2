//
//  confluence-client
//  entity/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Domain Entities
//!
//! Every type returned by a resource operation implements [`Hydratable`]:
//! it is built from a decoded JSON object, validating required fields on
//! the way, or not built at all.
//!
//! | Entity | Endpoint |
//! |--------|----------|
//! | [`ContentItem`] | `content/{id}`, create, update |
//! | [`ContentSearchResult`] | `content`, `child`, `descendant` |
//! | [`ContentHistory`] | `content/{id}/history` |
//! | [`ContentBody`] | `contentbody/convert/{to}` |
//! | [`User`] | nested in history |
//! | [`AttachmentList`] | `content/{id}/child/attachment` |

mod attachment;
mod body;
mod content;
mod history;
mod search;
mod user;

pub use attachment::*;
pub use body::*;
pub use content::*;
pub use history::*;
pub use search::*;
pub use user::*;

use serde_json::{Map, Value};
use thiserror::Error;

/// Why a response could not be turned into an entity.
#[derive(Error, Debug)]
pub enum HydrationError {
    /// The response is not JSON.
    #[error("cannot hydrate response with Content-Type: {0}")]
    UnsupportedContentType(String),

    /// The body decoded, but not to a JSON object.
    #[error("response body is not a JSON object")]
    NotAnObject,

    /// A required field is absent.
    #[error("missing field '{0}'")]
    MissingField(String),

    /// A field is present with the wrong shape.
    #[error("field '{field}' is invalid: expected {expected}")]
    InvalidField {
        /// Dotted path of the field.
        field: String,
        /// What was expected, e.g. "integer".
        expected: &'static str,
    },

    /// The `type` discriminant names no known content variant.
    #[error("invalid content type: {0}")]
    InvalidContentType(String),

    /// A timestamp does not match `YYYY-MM-DDTHH:mm:ss.sssZ`.
    #[error("invalid date string: {0}")]
    InvalidDate(String),

    /// The body is not valid JSON.
    #[error("malformed JSON")]
    Json(#[from] serde_json::Error),
}

/// Types that can be built from a decoded JSON object.
pub trait Hydratable: Sized {
    /// Builds the entity, failing on any missing or malformed required field.
    fn load(data: &Map<String, Value>) -> Result<Self, HydrationError>;
}

/// Follows a dotted path (`"_links.self"`) through nested objects.
pub(crate) fn lookup<'a>(data: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    segments.try_fold(data.get(first)?, |value, segment| value.get(segment))
}

pub(crate) fn require<'a>(
    data: &'a Map<String, Value>,
    path: &str,
) -> Result<&'a Value, HydrationError> {
    match lookup(data, path) {
        Some(Value::Null) | None => Err(HydrationError::MissingField(path.to_string())),
        Some(value) => Ok(value),
    }
}

pub(crate) fn require_str<'a>(
    data: &'a Map<String, Value>,
    path: &str,
) -> Result<&'a str, HydrationError> {
    require(data, path)?
        .as_str()
        .ok_or_else(|| invalid(path, "string"))
}

pub(crate) fn require_bool(data: &Map<String, Value>, path: &str) -> Result<bool, HydrationError> {
    require(data, path)?
        .as_bool()
        .ok_or_else(|| invalid(path, "boolean"))
}

pub(crate) fn require_object<'a>(
    data: &'a Map<String, Value>,
    path: &str,
) -> Result<&'a Map<String, Value>, HydrationError> {
    require(data, path)?
        .as_object()
        .ok_or_else(|| invalid(path, "object"))
}

/// Integer field; numeric strings are accepted since Confluence sends ids as strings.
pub(crate) fn require_u64(data: &Map<String, Value>, path: &str) -> Result<u64, HydrationError> {
    as_u64(require(data, path)?).ok_or_else(|| invalid(path, "integer"))
}

/// Like [`require_u64`], but an absent field is `Ok(None)`.
pub(crate) fn optional_u64(
    data: &Map<String, Value>,
    path: &str,
) -> Result<Option<u64>, HydrationError> {
    match lookup(data, path) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => as_u64(value).map(Some).ok_or_else(|| invalid(path, "integer")),
    }
}

pub(crate) fn optional_str<'a>(data: &'a Map<String, Value>, path: &str) -> Option<&'a str> {
    lookup(data, path).and_then(Value::as_str)
}

pub(crate) fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub(crate) fn invalid(field: &str, expected: &'static str) -> HydrationError {
    HydrationError::InvalidField {
        field: field.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_lookup_nested_path() {
        let data = object(json!({"_links": {"self": "https://x"}, "a": 1}));
        assert_eq!(lookup(&data, "_links.self"), Some(&json!("https://x")));
        assert!(lookup(&data, "_links.next").is_none());
        assert!(lookup(&data, "a.b").is_none());
    }

    #[test]
    fn test_ids_accept_numeric_strings() {
        let data = object(json!({"id": "1234556", "n": 7, "bad": "x"}));
        assert_eq!(require_u64(&data, "id").unwrap(), 1234556);
        assert_eq!(require_u64(&data, "n").unwrap(), 7);
        assert!(matches!(require_u64(&data, "bad"), Err(HydrationError::InvalidField { .. })));
        assert!(matches!(require_u64(&data, "none"), Err(HydrationError::MissingField(_))));
    }

    #[test]
    fn test_null_counts_as_missing() {
        let data = object(json!({"title": null}));
        assert!(matches!(require_str(&data, "title"), Err(HydrationError::MissingField(_))));
        assert_eq!(optional_u64(&data, "title").unwrap(), None);
    }
}
