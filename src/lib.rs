//
//  confluence-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Confluence Client Library
//!
//! A typed client for the Confluence REST API, and the `cfl` command-line
//! tool built on it.
//!
//! ## Overview
//!
//! Requests flow through an ordered chain of plugins (default headers,
//! host, path prefix, authentication) before reaching the transport.
//! Responses are classified by status into typed errors and, on success,
//! hydrated into domain entities.
//!
//! ```text
//! Content::get ─► HttpMethodsClient ─► HeaderDefaults ─► AddHost ─► AddPath
//!              ─► auth ─► transport ─► classify ─► hydrate
//! ```
//!
//! ## Module Structure
//!
//! - [`http`]: Plugin chain, builder, URI parsing and the transport seam
//! - [`api`]: Resource operations, request helpers and error classification
//! - [`entity`]: Domain entities and JSON hydration
//! - [`client`]: The [`ConfluenceClient`] facade
//! - [`auth`]: Credentials and keyring storage
//! - [`config`]: Configuration file and environment
//! - [`output`]: Table and JSON rendering
//! - [`cli`]: Command-line interface definitions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use confluence_client::ConfluenceClient;
//!
//! # async fn run() -> Result<(), confluence_client::api::ApiError> {
//! let mut client = ConfluenceClient::new("https://example.atlassian.net/wiki")?;
//! client.authenticate_basic_auth("me@example.com", "api-token")?;
//!
//! let page = client.content().get(1234556, None).await?;
//! println!("{} (v{})", page.title.unwrap_or_default(), page.version);
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
pub mod cli;

/// Resource operations and error classification.
pub mod api;

/// Credential types and keyring storage.
pub mod auth;

/// The client facade.
pub mod client;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/cfl/config.toml`
/// - macOS: `~/Library/Application Support/cfl/config.toml`
/// - Windows: `%APPDATA%\cfl\config\config.toml`
pub mod config;

/// Domain entities.
pub mod entity;

/// HTTP plumbing: plugins, builder, URIs and transport.
pub mod http;

/// Output formatting for tables and JSON.
pub mod output;

pub use cli::Cli;
pub use client::ConfluenceClient;
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
pub const APP_NAME: &str = "cfl";

/// Application version constant.
///
/// # Example
///
/// ```rust
/// use confluence_client::VERSION;
///
/// println!("cfl version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments, including input rejected before any
    /// request was sent.
    pub const USAGE: i32 = 2;

    /// Authentication required or failed (401 and 403).
    ///
    /// Run `cfl auth login` to authenticate.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found (404).
    pub const NOT_FOUND: i32 = 8;

    /// API rate limit exceeded (429).
    pub const RATE_LIMIT: i32 = 32;
}
