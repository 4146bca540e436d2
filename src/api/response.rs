//
//  confluence-client
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Response classification and hydration.
//!
//! Every response passes through [`classify`] first. Successful ones are
//! then decoded by [`hydrate_response`] into the requested entity.

use reqwest::StatusCode;
use serde_json::Value;

use super::{ApiError, ClientErrorKind};
use crate::entity::{HydrationError, Hydratable};
use crate::http::HttpResponse;

const SUCCESS: [StatusCode; 4] = [
    StatusCode::OK,
    StatusCode::CREATED,
    StatusCode::ACCEPTED,
    StatusCode::NO_CONTENT,
];

/// Maps a status to `Ok(())` or the matching [`ApiError`].
///
/// | Status | Result |
/// |--------|--------|
/// | 200, 201, 202, 204 | `Ok(())` |
/// | 400, 401, 402, 403, 404, 409, 413, 429 | [`ApiError::Client`] |
/// | 500-599 | [`ApiError::Server`] |
/// | anything else | [`ApiError::Generic`] with the raw body |
///
/// [`ApiError::Server`] is the specialisation of the generic error class for
/// the 5xx range, 501 included; [`ApiError::status`] reports the code for
/// both alike.
pub fn classify(status: StatusCode, body: &str, content_type: &str) -> Result<(), ApiError> {
    if SUCCESS.contains(&status) {
        return Ok(());
    }

    let error = if let Some(kind) = ClientErrorKind::from_status(status) {
        ApiError::Client {
            kind,
            status,
            message: client_message(kind, body, content_type),
        }
    } else if status.is_server_error() {
        ApiError::Server {
            status,
            message: "An unexpected error occurred. Try again later.".to_string(),
        }
    } else {
        ApiError::Generic {
            status,
            body: body.to_string(),
        }
    };

    tracing::warn!("Request failed with {}: {}", status, error);
    Err(error)
}

fn client_message(kind: ClientErrorKind, body: &str, content_type: &str) -> String {
    match kind {
        ClientErrorKind::BadRequest => format!(
            "The parameters passed to the API were invalid. Check your inputs!\n\n{}",
            extract_validation_message(body, content_type)
        ),
        ClientErrorKind::Unauthorized => "Your credentials are incorrect.".to_string(),
        ClientErrorKind::RequestFailed => {
            "Parameters were valid but request failed. Try again.".to_string()
        }
        ClientErrorKind::Forbidden => format!(
            "Forbidden!\n\n{}",
            extract_validation_message(body, content_type)
        ),
        ClientErrorKind::NotFound => {
            "The endpoint you have tried to access does not exist.".to_string()
        }
        ClientErrorKind::Conflict => {
            "Request conflicts with current state of the target resource.".to_string()
        }
        ClientErrorKind::PayloadTooLarge => {
            "Payload too large, your total attachment size is too big.".to_string()
        }
        ClientErrorKind::TooManyRequests => "Too many requests.".to_string(),
    }
}

/// Pulls the `message` field out of a JSON error body.
///
/// Never fails: anything unexpected degrades to the raw body.
pub fn extract_validation_message(body: &str, content_type: &str) -> String {
    if !content_type.starts_with("application/json") {
        return body.to_string();
    }

    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Classifies the response, then decodes its JSON object body into `T`.
///
/// # Errors
///
/// - the classified [`ApiError`] for any non-success status
/// - [`HydrationError::UnsupportedContentType`] when the body is not JSON
/// - [`HydrationError::NotAnObject`] when the JSON is not an object
/// - whatever `T::load` rejects
pub fn hydrate_response<T: Hydratable>(response: HttpResponse) -> Result<T, ApiError> {
    let content_type = response.content_type();
    classify(response.status, &response.body, content_type)?;

    if !content_type.starts_with("application/json") {
        return Err(HydrationError::UnsupportedContentType(content_type.to_string()).into());
    }

    let data: Value = serde_json::from_str(&response.body).map_err(HydrationError::from)?;
    let object = data.as_object().ok_or(HydrationError::NotAnObject)?;
    Ok(T::load(object)?)
}
