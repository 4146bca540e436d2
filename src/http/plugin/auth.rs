//
//  confluence-client
//  http/plugin/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication plugins.
//!
//! Both plugins pre-compute their `Authorization` header value at
//! construction, so a malformed credential fails there and never mid-chain.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::header::{HeaderValue, AUTHORIZATION};

use super::{Next, Plugin};
use crate::api::ApiError;
use crate::http::{HttpRequest, HttpResponse, TransportError};

/// Injects `Authorization: Basic base64(username:password)`.
#[derive(Debug, Clone)]
pub struct BasicAuthentication {
    header: HeaderValue,
}

impl BasicAuthentication {
    /// Creates the plugin.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Construction`] when the username is empty.
    pub fn new(username: &str, password: &str) -> Result<Self, ApiError> {
        if username.is_empty() {
            return Err(ApiError::Construction(
                "basic authentication requires a username".to_string(),
            ));
        }

        let encoded = STANDARD.encode(format!("{username}:{password}"));
        let mut header = HeaderValue::from_str(&format!("Basic {encoded}"))
            .map_err(|e| ApiError::Construction(format!("invalid basic credentials: {e}")))?;
        header.set_sensitive(true);

        Ok(Self { header })
    }
}

#[async_trait]
impl Plugin for BasicAuthentication {
    async fn handle_request(
        &self,
        mut request: HttpRequest,
        next: Next<'_>,
    ) -> Result<HttpResponse, TransportError> {
        request.headers.insert(AUTHORIZATION, self.header.clone());
        next.run(request).await
    }
}

/// Injects `Authorization: Bearer <token>` (Confluence personal access tokens).
#[derive(Debug, Clone)]
pub struct TokenAuthentication {
    header: HeaderValue,
}

impl TokenAuthentication {
    /// Creates the plugin.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Construction`] when the token is empty or cannot
    /// be carried in a header (e.g. contains a newline).
    pub fn new(token: &str) -> Result<Self, ApiError> {
        if token.trim().is_empty() {
            return Err(ApiError::Construction(
                "token authentication requires a token".to_string(),
            ));
        }

        let mut header = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| ApiError::Construction(format!("invalid token: {e}")))?;
        header.set_sensitive(true);

        Ok(Self { header })
    }
}

#[async_trait]
impl Plugin for TokenAuthentication {
    async fn handle_request(
        &self,
        mut request: HttpRequest,
        next: Next<'_>,
    ) -> Result<HttpResponse, TransportError> {
        request.headers.insert(AUTHORIZATION, self.header.clone());
        next.run(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_header_is_base64_of_credentials() {
        let plugin = BasicAuthentication::new("user", "pass").unwrap();
        assert_eq!(plugin.header.to_str().unwrap(), "Basic dXNlcjpwYXNz");
        assert!(plugin.header.is_sensitive());
    }

    #[test]
    fn test_basic_requires_username() {
        let result = BasicAuthentication::new("", "pass");
        assert!(matches!(result, Err(ApiError::Construction(_))));
    }

    #[test]
    fn test_token_header() {
        let plugin = TokenAuthentication::new("abc123").unwrap();
        assert_eq!(plugin.header.to_str().unwrap(), "Bearer abc123");
    }

    #[test]
    fn test_token_rejects_empty_and_newline() {
        assert!(TokenAuthentication::new("").is_err());
        assert!(TokenAuthentication::new("   ").is_err());
        assert!(TokenAuthentication::new("abc\ndef").is_err());
    }
}
