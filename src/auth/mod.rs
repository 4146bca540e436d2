//
//  confluence-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credential values and their persistent storage.
//!
//! ## Supported Methods
//!
//! | Method | Header | Typical use |
//! |--------|--------|-------------|
//! | Basic | `Authorization: Basic ...` | Cloud (email + API token), Server (user + password) |
//! | Token | `Authorization: Bearer ...` | Server/Data Center personal access tokens |
//!
//! Credentials are turned into request plugins by
//! [`ConfluenceClient::with_credential`](crate::ConfluenceClient::with_credential).
//! The CLI persists them in the system keyring through [`KeyringStore`],
//! serialized as JSON.

mod keyring;

pub use keyring::*;

use std::io::{self, BufRead};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A credential for one Confluence host.
///
/// # Example
///
/// ```rust
/// use confluence_client::auth::AuthCredential;
///
/// let credential = AuthCredential::token("pat-value");
/// let stored = credential.to_json().unwrap();
/// assert_eq!(AuthCredential::from_json(&stored).unwrap(), credential);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthCredential {
    /// HTTP Basic authentication.
    Basic {
        /// Username or email.
        username: String,
        /// Password or API token.
        password: String,
    },
    /// Bearer token authentication.
    Token {
        /// The token.
        token: String,
    },
}

impl AuthCredential {
    /// Creates a Basic credential.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates a bearer token credential.
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token {
            token: token.into(),
        }
    }

    /// Short label for status output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::Token { .. } => "token",
        }
    }

    /// Serializes the credential for storage.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a stored credential.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Reads a single token line from stdin, trimmed.
pub fn read_token_from_stdin() -> Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Returns `true` if the token is non-empty and has no whitespace.
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_json_is_tagged() {
        let credential = AuthCredential::basic("me@example.com", "secret");
        let json = credential.to_json().unwrap();
        assert!(json.contains(r#""type":"basic""#));
        assert_eq!(AuthCredential::from_json(&json).unwrap(), credential);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(AuthCredential::from_json("not json").is_err());
        assert!(AuthCredential::from_json(r#"{"type":"oauth"}"#).is_err());
    }

    #[test]
    fn test_validate_token() {
        assert!(validate_token("abc123"));
        assert!(!validate_token(""));
        assert!(!validate_token("abc 123"));
        assert!(!validate_token("abc\n"));
    }
}
