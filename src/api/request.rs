//
//  confluence-client
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request construction helpers.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::{Map, Value};
use url::form_urlencoded;

use super::ApiError;

/// Prefix of every REST resource path.
pub const URI_PREFIX: &str = "/rest/api/";

/// Builds `/rest/api/{path}?{query}`.
///
/// Parameters whose value is `None` are dropped entirely. The `?` is only
/// appended when at least one parameter survives.
///
/// # Example
///
/// ```rust
/// use confluence_client::api::request::build_uri;
///
/// let uri = build_uri("content", &[("spaceKey", Some("DOCS".into())), ("limit", None)]);
/// assert_eq!(uri, "/rest/api/content?spaceKey=DOCS");
/// ```
pub fn build_uri(path: &str, params: &[(&str, Option<String>)]) -> String {
    let mut uri = format!("{URI_PREFIX}{}", path.trim_start_matches('/'));

    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in params {
        if let Some(value) = value {
            query.append_pair(key, value);
            any = true;
        }
    }

    if any {
        uri.push('?');
        uri.push_str(&query.finish());
    }
    uri
}

/// Encodes a JSON body. An empty mapping means "no body" and yields `None`.
///
/// # Errors
///
/// Returns [`ApiError::Construction`] if serialization fails.
pub fn build_json_body(params: &Map<String, Value>) -> Result<Option<String>, ApiError> {
    if params.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(params)
        .map(Some)
        .map_err(|e| ApiError::Construction(format!("cannot encode request body: {e}")))
}

/// Sets `Content-Type: application/json` unless the caller already chose one.
pub fn add_json_content_type(headers: &mut HeaderMap) {
    headers
        .entry(CONTENT_TYPE)
        .or_insert_with(|| HeaderValue::from_static("application/json"));
}
