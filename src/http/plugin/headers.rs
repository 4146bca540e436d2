//
//  confluence-client
//  http/plugin/headers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Default-header and host/path prefixing plugins.

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use super::{Next, Plugin};
use crate::http::{HttpRequest, HttpResponse, TransportError};

/// Adds headers the caller has not set. Caller-supplied headers always win.
#[derive(Debug, Clone, Default)]
pub struct HeaderDefaults {
    headers: HeaderMap,
}

impl HeaderDefaults {
    /// Creates the plugin from a fixed header set.
    pub fn new(headers: HeaderMap) -> Self {
        Self { headers }
    }
}

#[async_trait]
impl Plugin for HeaderDefaults {
    async fn handle_request(
        &self,
        mut request: HttpRequest,
        next: Next<'_>,
    ) -> Result<HttpResponse, TransportError> {
        for (name, value) in &self.headers {
            if !request.headers.contains_key(name) {
                request.headers.insert(name.clone(), value.clone());
            }
        }
        next.run(request).await
    }
}

/// Sets scheme and authority on requests that do not carry a host yet.
#[derive(Debug, Clone)]
pub struct AddHost {
    origin: String,
}

impl AddHost {
    /// Creates the plugin from an origin such as `https://example.com:8443`.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    /// The origin this plugin applies.
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

#[async_trait]
impl Plugin for AddHost {
    async fn handle_request(
        &self,
        mut request: HttpRequest,
        next: Next<'_>,
    ) -> Result<HttpResponse, TransportError> {
        if request.host.is_none() {
            request.host = Some(self.origin.clone());
        }
        next.run(request).await
    }
}

/// Prefixes the request path with the instance base path (e.g. `/wiki`).
///
/// Paths already carrying the prefix are left untouched.
#[derive(Debug, Clone)]
pub struct AddPath {
    prefix: String,
}

impl AddPath {
    /// Creates the plugin. Leading slash is enforced, trailing slashes are dropped.
    pub fn new(prefix: &str) -> Self {
        let trimmed = prefix.trim_matches('/');
        Self {
            prefix: format!("/{trimmed}"),
        }
    }

    /// The normalised prefix, e.g. `/wiki`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[async_trait]
impl Plugin for AddPath {
    async fn handle_request(
        &self,
        mut request: HttpRequest,
        next: Next<'_>,
    ) -> Result<HttpResponse, TransportError> {
        let already_prefixed = request
            .path
            .strip_prefix(self.prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?']));

        if !already_prefixed {
            request.path = format!("{}{}", self.prefix, request.path);
        }
        next.run(request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::header::{HeaderValue, USER_AGENT};
    use reqwest::Method;

    use super::*;
    use crate::http::testing::RecordingTransport;

    async fn run_through(plugin: Arc<dyn Plugin>, request: HttpRequest) -> HttpRequest {
        let transport = RecordingTransport::new();
        transport.push_json(200, "{}");
        let chain = [plugin];
        Next::new(&chain, &transport).run(request).await.unwrap();
        transport.requests().remove(0)
    }

    #[tokio::test]
    async fn test_header_defaults_do_not_override_caller() {
        let mut defaults = HeaderMap::new();
        defaults.insert(USER_AGENT, HeaderValue::from_static("default-agent"));
        defaults.insert("x-extra", HeaderValue::from_static("1"));

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("caller-agent"));
        let request = HttpRequest::new(Method::GET, "/").with_headers(headers);

        let sent = run_through(Arc::new(HeaderDefaults::new(defaults)), request).await;
        assert_eq!(sent.headers[USER_AGENT], "caller-agent");
        assert_eq!(sent.headers["x-extra"], "1");
    }

    #[tokio::test]
    async fn test_add_host_keeps_existing_host() {
        let mut request = HttpRequest::new(Method::GET, "/rest/api/content");
        request.host = Some("https://other.example".to_string());

        let sent = run_through(Arc::new(AddHost::new("https://example.com")), request).await;
        assert_eq!(sent.host.as_deref(), Some("https://other.example"));
    }

    #[tokio::test]
    async fn test_add_path_prefixes_once() {
        let plugin: Arc<dyn Plugin> = Arc::new(AddPath::new("wiki/"));

        let sent = run_through(
            plugin.clone(),
            HttpRequest::new(Method::GET, "/rest/api/content"),
        )
        .await;
        assert_eq!(sent.path, "/wiki/rest/api/content");

        let already_prefixed = HttpRequest::new(Method::GET, "/wiki/rest/api/content");
        let sent = run_through(plugin, already_prefixed).await;
        assert_eq!(sent.path, "/wiki/rest/api/content");
    }

    #[test]
    fn test_add_path_normalises_prefix() {
        assert_eq!(AddPath::new("/wiki/").prefix(), "/wiki");
        assert_eq!(AddPath::new("confluence").prefix(), "/confluence");
    }
}
