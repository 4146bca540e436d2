//
//  confluence-client
//  http/plugin/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Plugins
//!
//! A plugin is a middleware that receives the outbound [`HttpRequest`] and a
//! [`Next`] continuation. It may rewrite the request and then hands it on by
//! calling [`Next::run`]. Every plugin shipped here is a pass-through
//! transformer: it always continues the chain.
//!
//! Plugins are registered in a [`Builder`](super::Builder) under a
//! [`PluginKind`], which is how they are later found and removed.
//!
//! | Kind | Plugin | Effect |
//! |------|--------|--------|
//! | `HeaderDefaults` | [`HeaderDefaults`] | Adds headers the caller did not set |
//! | `AddHost` | [`AddHost`] | Sets scheme + authority |
//! | `AddPath` | [`AddPath`] | Prefixes the path (e.g. `/wiki`) |
//! | `BasicAuthentication` | [`BasicAuthentication`] | `Authorization: Basic ...` |
//! | `TokenAuthentication` | [`TokenAuthentication`] | `Authorization: Bearer ...` |

mod auth;
mod headers;

pub use auth::*;
pub use headers::*;

use std::sync::Arc;

use async_trait::async_trait;

use super::{HttpClient, HttpRequest, HttpResponse, TransportError};

/// Identifies a registered plugin for removal.
///
/// At most one plugin of each built-in kind is meant to be active; callers
/// remove the previous instance of a kind before adding a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
    /// Default request headers (User-Agent).
    HeaderDefaults,
    /// Scheme and host of the Confluence instance.
    AddHost,
    /// Path prefix of the Confluence instance (e.g. `/wiki`).
    AddPath,
    /// HTTP Basic authentication.
    BasicAuthentication,
    /// Bearer token authentication.
    TokenAuthentication,
    /// A caller-defined plugin.
    Custom(&'static str),
}

impl PluginKind {
    /// Returns `true` for the two authentication kinds.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::BasicAuthentication | Self::TokenAuthentication)
    }
}

/// A request-transforming middleware.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use confluence_client::http::{HttpRequest, HttpResponse, Next, Plugin, TransportError};
///
/// struct TraceId(String);
///
/// #[async_trait]
/// impl Plugin for TraceId {
///     async fn handle_request(
///         &self,
///         mut request: HttpRequest,
///         next: Next<'_>,
///     ) -> Result<HttpResponse, TransportError> {
///         request.headers.insert("x-trace-id", self.0.parse().unwrap());
///         next.run(request).await
///     }
/// }
/// ```
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Handles the request and continues the chain through `next`.
    async fn handle_request(
        &self,
        request: HttpRequest,
        next: Next<'_>,
    ) -> Result<HttpResponse, TransportError>;
}

/// Continuation handed to each plugin: the rest of the chain plus the
/// terminal transport.
pub struct Next<'a> {
    chain: &'a [Arc<dyn Plugin>],
    transport: &'a dyn HttpClient,
}

impl<'a> Next<'a> {
    pub(crate) fn new(chain: &'a [Arc<dyn Plugin>], transport: &'a dyn HttpClient) -> Self {
        Self { chain, transport }
    }

    /// Passes the request to the next plugin, or to the transport once the
    /// chain is exhausted.
    pub async fn run(self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        match self.chain.split_first() {
            Some((plugin, rest)) => {
                plugin
                    .handle_request(request, Next::new(rest, self.transport))
                    .await
            }
            None => self.transport.send(request).await,
        }
    }
}
