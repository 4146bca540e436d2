//
//  confluence-client
//  api/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Error taxonomy for every library operation.
//!
//! | Variant | Raised when | Retryable |
//! |---------|-------------|-----------|
//! | `Construction` | Input is invalid before any request is sent | no |
//! | `Client` | 400, 401, 402, 403, 404, 409, 413, 429 | 402, 429 |
//! | `Server` | 500-599 | yes |
//! | `Generic` | Any other non-success status | no |
//! | `Hydration` | Response shape does not match the entity | no |
//! | `Transport` | The injected transport failed | caller decides |
//!
//! # Example
//!
//! ```rust,ignore
//! use confluence_client::api::{ApiError, ClientErrorKind};
//!
//! match client.content().get(42, None).await {
//!     Ok(page) => println!("{}", page.title.unwrap_or_default()),
//!     Err(ApiError::Client { kind: ClientErrorKind::NotFound, .. }) => eprintln!("no such page"),
//!     Err(e) if e.is_retryable() => eprintln!("try again: {e}"),
//!     Err(e) => eprintln!("error: {e}"),
//! }
//! ```

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

use crate::entity::HydrationError;
use crate::http::TransportError;

/// Unified error type for the client library.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid input detected before any network call.
    ///
    /// Examples: creating an item that already has an id, converting to an
    /// unsupported representation, an empty token.
    #[error("{0}")]
    Construction(String),

    /// A classified 4xx response.
    #[error("{message}")]
    Client {
        /// Which client error this is.
        kind: ClientErrorKind,
        /// Response status.
        status: StatusCode,
        /// Human readable message, including the server's validation
        /// message for 400 and 403.
        message: String,
    },

    /// A 5xx response.
    #[error("{message}")]
    Server {
        /// Response status.
        status: StatusCode,
        /// Human readable message.
        message: String,
    },

    /// Any other non-success status. The raw body is the message.
    #[error("unexpected response ({status}): {body}")]
    Generic {
        /// Response status.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// The response could not be decoded into the requested entity.
    #[error("invalid response")]
    Hydration(#[from] HydrationError),

    /// The transport failed before a response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Client { status, .. }
            | Self::Server { status, .. }
            | Self::Generic { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether a caller may reasonably retry the same request.
    ///
    /// The library never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Client { kind, .. } => {
                matches!(kind, ClientErrorKind::RequestFailed | ClientErrorKind::TooManyRequests)
            }
            Self::Server { .. } => true,
            _ => false,
        }
    }
}

/// The enumerated 4xx responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 402, used by Confluence for "valid parameters but the request failed".
    RequestFailed,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 409
    Conflict,
    /// 413
    PayloadTooLarge,
    /// 429
    TooManyRequests,
}

impl ClientErrorKind {
    /// Maps a status code to its kind, `None` for unclassified codes.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        Some(match status.as_u16() {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            402 => Self::RequestFailed,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            413 => Self::PayloadTooLarge,
            429 => Self::TooManyRequests,
            _ => return None,
        })
    }

    /// The status code this kind is raised for.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::RequestFailed => StatusCode::PAYMENT_REQUIRED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl fmt::Display for ClientErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BadRequest => "bad request",
            Self::Unauthorized => "unauthorized",
            Self::RequestFailed => "request failed",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::Conflict => "conflict",
            Self::PayloadTooLarge => "payload too large",
            Self::TooManyRequests => "too many requests",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Renders the error and its sources the way the binary reports them.
    fn chain(err: ApiError) -> String {
        format!("{:#}", anyhow::Error::from(err))
    }

    #[test]
    fn test_wrapped_messages_print_once() {
        let source = reqwest::Client::new().get("not a url").build().unwrap_err();
        let inner = source.to_string();
        let rendered = chain(TransportError::from(source).into());
        assert_eq!(rendered.matches(inner.as_str()).count(), 1, "{rendered}");

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let inner = source.to_string();
        let rendered = chain(HydrationError::from(source).into());
        assert!(rendered.starts_with("invalid response: malformed JSON: "), "{rendered}");
        assert_eq!(rendered.matches(inner.as_str()).count(), 1, "{rendered}");
    }

    #[test]
    fn test_kind_status_round_trips() {
        for code in [400u16, 401, 402, 403, 404, 409, 413, 429] {
            let status = StatusCode::from_u16(code).unwrap();
            let kind = ClientErrorKind::from_status(status).unwrap();
            assert_eq!(kind.status(), status);
        }
        assert!(ClientErrorKind::from_status(StatusCode::IM_A_TEAPOT).is_none());
    }

    #[test]
    fn test_retryable() {
        let limited = ApiError::Client {
            kind: ClientErrorKind::TooManyRequests,
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "Too many requests.".to_string(),
        };
        let missing = ApiError::Client {
            kind: ClientErrorKind::NotFound,
            status: StatusCode::NOT_FOUND,
            message: String::new(),
        };
        let server = ApiError::Server {
            status: StatusCode::BAD_GATEWAY,
            message: String::new(),
        };

        assert!(limited.is_retryable());
        assert!(!missing.is_retryable());
        assert!(server.is_retryable());
        assert!(!ApiError::Construction("x".to_string()).is_retryable());
    }

    #[test]
    fn test_status_only_for_responses() {
        assert_eq!(
            ApiError::Generic {
                status: StatusCode::IM_A_TEAPOT,
                body: "short and stout".to_string(),
            }
            .status(),
            Some(StatusCode::IM_A_TEAPOT)
        );
        assert!(ApiError::Transport(TransportError::MissingHost).status().is_none());
    }
}
