//
//  confluence-client
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Secure Credential Storage
//!
//! Stores one [`AuthCredential`] per Confluence host in the platform keyring
//! (Keychain on macOS, Secret Service on Linux, Credential Manager on
//! Windows).
//!
//! - **Service**: `confluence-client`
//! - **Key**: the host name, e.g. `example.atlassian.net`
//! - **Value**: the credential as JSON
//!
//! ## Example
//!
//! ```rust,no_run
//! use confluence_client::auth::{AuthCredential, KeyringStore};
//!
//! fn remember() -> anyhow::Result<()> {
//!     let store = KeyringStore::new();
//!     store.store("example.atlassian.net", &AuthCredential::token("pat"))?;
//!
//!     if let Some(credential) = store.get("example.atlassian.net")? {
//!         println!("stored {} credential", credential.kind());
//!     }
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use keyring::Entry;

use super::AuthCredential;

/// Keyring service name for every entry written by this crate.
const SERVICE_NAME: &str = "confluence-client";

/// Credential storage in the system keyring.
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    /// Creates a store using the default service name.
    ///
    /// No keyring access happens until a method is called.
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Stores (or overwrites) the credential for `host`.
    ///
    /// # Errors
    ///
    /// Fails if the keyring is unavailable or access is denied.
    pub fn store(&self, host: &str, credential: &AuthCredential) -> Result<()> {
        let entry = Entry::new(&self.service, host)?;
        entry
            .set_password(&credential.to_json()?)
            .with_context(|| format!("Failed to store credential for {host}"))?;
        tracing::debug!("Stored {} credential for {}", credential.kind(), host);
        Ok(())
    }

    /// Retrieves the credential for `host`.
    ///
    /// Returns `Ok(None)` when nothing is stored; a missing entry is not an error.
    pub fn get(&self, host: &str) -> Result<Option<AuthCredential>> {
        let entry = Entry::new(&self.service, host)?;
        match entry.get_password() {
            Ok(raw) => AuthCredential::from_json(&raw)
                .with_context(|| format!("Stored credential for {host} is corrupt"))
                .map(Some),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the credential for `host`. Deleting a missing entry succeeds.
    pub fn delete(&self, host: &str) -> Result<()> {
        let entry = Entry::new(&self.service, host)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
