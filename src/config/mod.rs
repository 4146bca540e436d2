//
//  confluence-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Connection settings for the `cfl` command-line tool.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/cfl/config.toml`
//! - **macOS**: `~/Library/Application Support/cfl/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\cfl\config\config.toml`
//!
//! ## Example Configuration
//!
//! ```toml
//! url = "https://example.atlassian.net/wiki"
//! username = "me@example.com"
//! default_space = "DOCS"
//! expand = "space,version,body.storage"
//! ```
//!
//! ## Precedence
//!
//! Explicit command-line flags, then `CONFLUENCE_URL` / `CONFLUENCE_USER` /
//! `CONFLUENCE_TOKEN` / `CONFLUENCE_PASSWORD`, then the file, then the
//! system keyring (credentials only).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::auth::{AuthCredential, KeyringStore};
use crate::ConfluenceClient;

/// Environment variable overriding [`Config::url`].
pub const ENV_URL: &str = "CONFLUENCE_URL";
/// Environment variable overriding [`Config::username`].
pub const ENV_USER: &str = "CONFLUENCE_USER";
/// Environment variable overriding [`Config::token`].
pub const ENV_TOKEN: &str = "CONFLUENCE_TOKEN";
/// Environment variable overriding [`Config::password`].
pub const ENV_PASSWORD: &str = "CONFLUENCE_PASSWORD";

/// Persistent `cfl` settings.
///
/// Every field is optional so a partial file still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Instance URL, e.g. `https://example.atlassian.net/wiki`.
    pub url: Option<String>,
    /// Username (or email on Cloud) for Basic authentication.
    pub username: Option<String>,
    /// Bearer token. Takes precedence over username/password.
    pub token: Option<String>,
    /// Password or API token for Basic authentication.
    pub password: Option<String>,
    /// Space used by `find` when none is given.
    pub default_space: Option<String>,
    /// Expansion override for reads.
    pub expand: Option<String>,
}

impl Config {
    /// Loads the file from the default location, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the file at `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Saves to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "cfl")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlays the `CONFLUENCE_*` environment variables.
    pub fn with_env(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Overlays values from `lookup`; empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());
        if let Some(url) = get(ENV_URL) {
            self.url = Some(url);
        }
        if let Some(username) = get(ENV_USER) {
            self.username = Some(username);
        }
        if let Some(token) = get(ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Some(password) = get(ENV_PASSWORD) {
            self.password = Some(password);
        }
        self
    }

    /// Credential from the configured values: token first, then
    /// username + password.
    pub fn credential(&self) -> Option<AuthCredential> {
        if let Some(token) = &self.token {
            return Some(AuthCredential::token(token));
        }
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(AuthCredential::basic(username, password)),
            _ => None,
        }
    }

    /// Builds an authenticated client.
    ///
    /// Falls back to the keyring when no credential is configured. Credentials
    /// embedded in the URL are honoured by the client itself.
    pub fn connect(&self) -> Result<ConfluenceClient> {
        let url = self
            .url
            .as_deref()
            .context("No Confluence URL configured. Use --url or set CONFLUENCE_URL")?;

        let mut client = ConfluenceClient::new(url)?;

        let credential = match self.credential() {
            Some(credential) => Some(credential),
            None if client.is_authenticated() => None,
            None => {
                let host = client.builder().uri_factory().create_uri(url)?.host().to_string();
                KeyringStore::new().get(&host).unwrap_or_else(|e| {
                    tracing::warn!("Keyring unavailable: {}", e);
                    None
                })
            }
        };

        if let Some(credential) = credential {
            client.with_credential(&credential)?;
        }
        Ok(client)
    }

    /// Reads a key by name.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "url" => self.url.clone(),
            "username" => self.username.clone(),
            "default_space" => self.default_space.clone(),
            "expand" => self.expand.clone(),
            _ => None,
        }
    }

    /// Sets a key by name. Returns `false` for unknown or secret keys.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        let slot = match key {
            "url" => &mut self.url,
            "username" => &mut self.username,
            "default_space" => &mut self.default_space,
            "expand" => &mut self.expand,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            url: Some("https://example.com/wiki".to_string()),
            default_space: Some("DOCS".to_string()),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "url = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_URL, "https://env.example.com"),
            (ENV_TOKEN, "env-token"),
            (ENV_USER, ""),
        ]);
        let config = Config {
            url: Some("https://file.example.com".to_string()),
            username: Some("file-user".to_string()),
            ..Config::default()
        }
        .with_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.url.as_deref(), Some("https://env.example.com"));
        assert_eq!(config.username.as_deref(), Some("file-user"));
        assert_eq!(config.credential(), Some(AuthCredential::token("env-token")));
    }

    #[test]
    fn test_credential_needs_both_basic_parts() {
        let mut config = Config {
            username: Some("me".to_string()),
            ..Config::default()
        };
        assert!(config.credential().is_none());

        config.password = Some("secret".to_string());
        assert_eq!(config.credential(), Some(AuthCredential::basic("me", "secret")));
    }

    #[test]
    fn test_connect_requires_url() {
        assert!(Config::default().connect().is_err());
    }

    #[test]
    fn test_connect_with_token() {
        let config = Config {
            url: Some("https://example.com".to_string()),
            token: Some("abc".to_string()),
            ..Config::default()
        };
        assert!(config.connect().unwrap().is_authenticated());
    }

    #[test]
    fn test_get_and_set() {
        let mut config = Config::default();
        assert!(config.set("default_space", "DOCS".to_string()));
        assert!(!config.set("token", "nope".to_string()));
        assert_eq!(config.get("default_space").as_deref(), Some("DOCS"));
        assert!(config.get("password").is_none());
    }
}
