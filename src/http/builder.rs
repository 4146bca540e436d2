//
//  confluence-client
//  http/builder.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Transport Builder
//!
//! [`Builder`] owns the injected transport, the URI factory and the ordered
//! plugin list. [`Builder::http_client`] composes them into an
//! [`HttpMethodsClient`] and caches the result until the plugin list changes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use confluence_client::http::{AddHost, Builder, PluginKind};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = Builder::new()?;
//! builder.add_plugin(PluginKind::AddHost, Arc::new(AddHost::new("https://example.com")));
//!
//! let response = builder
//!     .http_client()
//!     .get("/rest/api/content", Default::default())
//!     .await?;
//! println!("{}", response.status);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use reqwest::Method;

use super::plugin::{Next, Plugin, PluginKind};
use super::uri::{DefaultUriFactory, UriFactory};
use super::{FilePart, HttpClient, HttpRequest, HttpResponse, ReqwestTransport, TransportError};

/// Ordered plugin list plus the lazily composed client.
pub struct Builder {
    transport: Arc<dyn HttpClient>,
    uri_factory: Arc<dyn UriFactory>,
    plugins: Vec<(PluginKind, Arc<dyn Plugin>)>,
    cached: Mutex<Option<Arc<HttpMethodsClient>>>,
}

impl Builder {
    /// Creates a builder over the default reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the reqwest client cannot be initialised
    /// (e.g. the TLS backend fails to load).
    pub fn new() -> Result<Self, TransportError> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new()?)))
    }

    /// Creates a builder over an injected transport.
    pub fn with_transport(transport: Arc<dyn HttpClient>) -> Self {
        Self {
            transport,
            uri_factory: Arc::new(DefaultUriFactory),
            plugins: Vec::new(),
            cached: Mutex::new(None),
        }
    }

    /// Replaces the URI factory used to parse connection strings.
    pub fn with_uri_factory(mut self, uri_factory: Arc<dyn UriFactory>) -> Self {
        self.uri_factory = uri_factory;
        self
    }

    /// Appends a plugin to the end of the chain.
    pub fn add_plugin(&mut self, kind: PluginKind, plugin: Arc<dyn Plugin>) {
        self.plugins.push((kind, plugin));
        self.invalidate();
    }

    /// Removes every plugin registered under `kind`.
    pub fn remove_plugin(&mut self, kind: PluginKind) {
        self.plugins.retain(|(registered, _)| *registered != kind);
        self.invalidate();
    }

    /// Removes any plugin of `kind`, then appends `plugin`.
    pub fn replace_plugin(&mut self, kind: PluginKind, plugin: Arc<dyn Plugin>) {
        self.remove_plugin(kind);
        self.add_plugin(kind, plugin);
    }

    /// Kinds of the registered plugins, in chain order.
    pub fn plugin_kinds(&self) -> Vec<PluginKind> {
        self.plugins.iter().map(|(kind, _)| *kind).collect()
    }

    /// Returns `true` if a plugin of `kind` is registered.
    pub fn has_plugin(&self, kind: PluginKind) -> bool {
        self.plugins.iter().any(|(registered, _)| *registered == kind)
    }

    /// Returns the composed client, rebuilding it if the chain changed.
    ///
    /// The returned `Arc` is a frozen snapshot: later plugin changes do not
    /// affect a request already in flight.
    pub fn http_client(&self) -> Arc<HttpMethodsClient> {
        let mut cached = self.cached.lock();
        if let Some(client) = cached.as_ref() {
            return Arc::clone(client);
        }

        tracing::debug!("Composing HTTP client with plugins {:?}", self.plugin_kinds());
        let client = Arc::new(HttpMethodsClient::new(PluginClient::new(
            self.plugins.iter().map(|(_, plugin)| Arc::clone(plugin)).collect(),
            Arc::clone(&self.transport),
        )));
        *cached = Some(Arc::clone(&client));
        client
    }

    /// The URI factory used to parse connection strings.
    pub fn uri_factory(&self) -> &dyn UriFactory {
        self.uri_factory.as_ref()
    }

    fn invalidate(&mut self) {
        *self.cached.get_mut() = None;
    }
}

/// The composed middleware chain in front of a transport.
pub struct PluginClient {
    plugins: Vec<Arc<dyn Plugin>>,
    transport: Arc<dyn HttpClient>,
}

impl PluginClient {
    /// Creates a chain that applies `plugins` in order before `transport`.
    pub fn new(plugins: Vec<Arc<dyn Plugin>>, transport: Arc<dyn HttpClient>) -> Self {
        Self { plugins, transport }
    }
}

#[async_trait::async_trait]
impl HttpClient for PluginClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Next::new(&self.plugins, self.transport.as_ref())
            .run(request)
            .await
    }
}

/// Verb helpers over the plugin-wrapped transport.
pub struct HttpMethodsClient {
    inner: PluginClient,
}

impl HttpMethodsClient {
    /// Wraps a composed plugin chain.
    pub fn new(inner: PluginClient) -> Self {
        Self { inner }
    }

    /// Sends a `GET` request.
    pub async fn get(&self, uri: &str, headers: HeaderMap) -> Result<HttpResponse, TransportError> {
        self.send(Method::GET, uri, headers, None).await
    }

    /// Sends a `PUT` request.
    pub async fn put(
        &self,
        uri: &str,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<HttpResponse, TransportError> {
        self.send(Method::PUT, uri, headers, body).await
    }

    /// Sends a `POST` request.
    pub async fn post(
        &self,
        uri: &str,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<HttpResponse, TransportError> {
        self.send(Method::POST, uri, headers, body).await
    }

    /// Sends a `DELETE` request.
    pub async fn delete(
        &self,
        uri: &str,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<HttpResponse, TransportError> {
        self.send(Method::DELETE, uri, headers, body).await
    }

    /// Sends a request with an arbitrary verb.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<HttpResponse, TransportError> {
        tracing::debug!("{} {}", method, uri);
        let request = HttpRequest::new(method, uri)
            .with_headers(headers)
            .with_body(body);
        self.inner.send(request).await
    }

    /// Sends a `POST` request whose body is `multipart/form-data` built
    /// from `files`. The transport sets the content type and boundary.
    pub async fn upload(
        &self,
        uri: &str,
        headers: HeaderMap,
        files: Vec<FilePart>,
    ) -> Result<HttpResponse, TransportError> {
        tracing::debug!("POST {} ({} file part(s))", uri, files.len());
        let request = HttpRequest::new(Method::POST, uri)
            .with_headers(headers)
            .with_files(files);
        self.inner.send(request).await
    }
}
