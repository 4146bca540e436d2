//
//  confluence-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Layer
//!
//! Resource operations and the request/response plumbing they share.
//!
//! ## Architecture
//!
//! - [`request`]: URI and JSON body construction
//! - [`response`]: status classification and hydration
//! - [`content`]: the `content` resource (pages and comments)
//! - [`ApiError`]: the error taxonomy every operation returns
//!
//! ## Usage
//!
//! ```rust,no_run
//! use confluence_client::ConfluenceClient;
//!
//! # async fn run() -> Result<(), confluence_client::api::ApiError> {
//! let mut client = ConfluenceClient::new("https://example.atlassian.net/wiki")?;
//! client.authenticate("personal-access-token")?;
//!
//! let page = client.content().get(1234556, None).await?;
//! println!("{:?} v{}", page.title, page.version);
//! # Ok(())
//! # }
//! ```

pub mod content;
mod error;
pub mod request;
pub mod response;

pub use content::Content;
pub use error::{ApiError, ClientErrorKind};
