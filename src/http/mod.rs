//
//  confluence-client
//  http/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport Layer
//!
//! This module owns everything between a resource operation and the wire:
//!
//! - [`HttpRequest`] / [`HttpResponse`]: plain request and response values
//! - [`HttpClient`]: the injectable transport trait (`send(request) -> response`)
//! - [`ReqwestTransport`]: the default transport backed by `reqwest`
//! - [`plugin`]: request-transforming middlewares (auth, host, default headers)
//! - [`Builder`]: the ordered plugin list and the cached composed client
//! - [`uri`]: connection-string parsing (`user:pass@host/path`)
//!
//! ## Architecture
//!
//! ```text
//! Content API ──► HttpMethodsClient ──► plugin 1 ──► ... ──► HttpClient::send
//! ```
//!
//! The library never retries, times out or cancels requests on its own.
//! Those concerns belong to whichever [`HttpClient`] is injected.

pub mod builder;
pub mod plugin;
pub mod uri;

pub use builder::{Builder, HttpMethodsClient, PluginClient};
pub use plugin::{
    AddHost, AddPath, BasicAuthentication, HeaderDefaults, Next, Plugin, PluginKind,
    TokenAuthentication,
};
pub use uri::{ConnectionUri, DefaultUriFactory, UriFactory};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, StatusCode};
use thiserror::Error;

/// Errors surfaced by the transport itself, before any status code exists.
///
/// These are opaque to the rest of the library: connectivity failures,
/// TLS problems, or a request that was never given a host.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The underlying `reqwest` client failed to send or read.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The request reached the transport without a scheme and host.
    ///
    /// This happens when no host plugin is registered in the chain.
    #[error("request has no host, configure a Confluence URL first")]
    MissingHost,

    /// Failure reported by a custom transport implementation.
    #[error("{0}")]
    Other(String),
}

/// An outbound request as it travels through the plugin chain.
///
/// `path` holds the path and query string (e.g. `/rest/api/content/12?expand=space`).
/// `host` stays `None` until a host plugin fills in the scheme and authority.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP verb.
    pub method: Method,
    /// Scheme and authority, e.g. `https://example.atlassian.net`.
    pub host: Option<String>,
    /// Path plus optional query string.
    pub path: String,
    /// Request headers.
    pub headers: HeaderMap,
    /// Encoded request body. `None` means no body is sent.
    pub body: Option<String>,
    /// Files sent as `multipart/form-data`. When non-empty they replace `body`.
    pub files: Vec<FilePart>,
}

impl HttpRequest {
    /// Creates a request with no host, no headers and no body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            host: None,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
            files: Vec::new(),
        }
    }

    /// Replaces the request headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Replaces the request body.
    pub fn with_body(mut self, body: Option<String>) -> Self {
        self.body = body;
        self
    }

    /// Replaces the multipart file parts.
    pub fn with_files(mut self, files: Vec<FilePart>) -> Self {
        self.files = files;
        self
    }

    /// Returns the absolute URL, or `None` if no host has been applied yet.
    pub fn url(&self) -> Option<String> {
        self.host
            .as_deref()
            .map(|host| format!("{}{}", host.trim_end_matches('/'), self.path))
    }
}

/// One file in a `multipart/form-data` upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name, `file` for attachments.
    pub field: String,
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type, if known.
    pub mime: Option<String>,
    /// File contents.
    pub data: Vec<u8>,
}

impl FilePart {
    /// A part in the `file` field with no explicit MIME type.
    pub fn file(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            field: "file".to_string(),
            file_name: file_name.into(),
            mime: None,
            data,
        }
    }

    fn into_part(self) -> Result<(String, Part), TransportError> {
        let mut part = Part::bytes(self.data).file_name(self.file_name);
        if let Some(mime) = &self.mime {
            part = part.mime_str(mime)?;
        }
        Ok((self.field, part))
    }
}

/// A fully read response.
///
/// Bodies are read eagerly as text because every payload this client
/// understands is JSON, and error classification needs the raw text anyway.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body as text (may be empty).
    pub body: String,
}

impl HttpResponse {
    /// Creates a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Returns the `Content-Type` header, or an empty string when absent or not ASCII.
    pub fn content_type(&self) -> &str {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }
}

/// The injected transport abstraction.
///
/// Implementations send exactly one request and return the raw response,
/// whatever its status. Status classification happens later, in the API layer.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use confluence_client::http::{HttpClient, HttpRequest, HttpResponse, TransportError};
///
/// struct Offline;
///
/// #[async_trait]
/// impl HttpClient for Offline {
///     async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
///         Err(TransportError::Other("offline".to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a request and returns the response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Default transport built on a shared `reqwest::Client`.
///
/// No User-Agent is configured here; the default-headers plugin supplies it.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a fresh `reqwest` client.
    pub fn new() -> Result<Self, TransportError> {
        Ok(Self {
            http: Client::builder().build()?,
        })
    }

    /// Wraps an existing `reqwest` client, e.g. one configured with timeouts or a proxy.
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpClient for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url().ok_or(TransportError::MissingHost)?;

        let mut builder = self
            .http
            .request(request.method, &url)
            .headers(request.headers);

        if !request.files.is_empty() {
            let mut form = Form::new();
            for file in request.files {
                let (field, part) = file.into_part()?;
                form = form.part(field, part);
            }
            builder = builder.multipart(form);
        } else if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(HttpResponse::new(status, headers, body))
    }
}

/// In-memory transport for unit tests: replays canned responses and
/// records every request it receives.
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
    use reqwest::StatusCode;

    use super::{HttpClient, HttpRequest, HttpResponse, TransportError};

    #[derive(Default)]
    pub(crate) struct RecordingTransport {
        responses: Mutex<VecDeque<HttpResponse>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn push(&self, response: HttpResponse) {
            self.responses.lock().push_back(response);
        }

        pub(crate) fn push_json(&self, status: u16, body: &str) {
            self.push(response(status, "application/json", body));
        }

        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().clone()
        }
    }

    pub(crate) fn response(status: u16, content_type: &str, body: &str) -> HttpResponse {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(content_type).expect("valid content type"),
        );
        HttpResponse::new(
            StatusCode::from_u16(status).expect("valid status"),
            headers,
            body,
        )
    }

    #[async_trait]
    impl HttpClient for RecordingTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.lock().push(request);
            self.responses
                .lock()
                .pop_front()
                .ok_or_else(|| TransportError::Other("no canned response left".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_requires_host() {
        let request = HttpRequest::new(Method::GET, "/rest/api/content");
        assert!(request.url().is_none());
    }

    #[test]
    fn test_url_joins_host_and_path() {
        let mut request = HttpRequest::new(Method::GET, "/rest/api/content?limit=5");
        request.host = Some("https://example.com/".to_string());
        assert_eq!(
            request.url().as_deref(),
            Some("https://example.com/rest/api/content?limit=5")
        );
    }

    #[test]
    fn test_file_part_mime_is_validated() {
        let part = FilePart::file("a.png", vec![1, 2, 3]);
        assert_eq!(part.field, "file");
        assert!(part.clone().into_part().is_ok());

        let bad = FilePart {
            mime: Some("not a mime".to_string()),
            ..part
        };
        assert!(matches!(bad.into_part(), Err(TransportError::Request(_))));
    }

    #[test]
    fn test_content_type_defaults_to_empty() {
        let response = HttpResponse::new(StatusCode::OK, HeaderMap::new(), "");
        assert_eq!(response.content_type(), "");
    }
}
