//
//  confluence-client
//  api/content.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Content Resource
//!
//! Operations on `/rest/api/content`: reading, searching, creating,
//! updating and deleting pages and comments, plus body conversion, history,
//! labels and attachments.
//!
//! ## Example
//!
//! ```rust,no_run
//! use confluence_client::entity::ContentItem;
//! use confluence_client::ConfluenceClient;
//!
//! # async fn run() -> Result<(), confluence_client::api::ApiError> {
//! let mut client = ConfluenceClient::new("https://example.atlassian.net/wiki")?;
//! client.authenticate_basic_auth("me@example.com", "api-token")?;
//!
//! let mut page = ContentItem::page("Release notes", "DOCS");
//! page.body = Some("<p>First draft</p>".to_string());
//! let mut page = client.content().create(&page).await?;
//!
//! page.body = Some("<p>Second draft</p>".to_string());
//! let page = client.content().update(&page).await?;
//! assert_eq!(page.version, 2);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::{json, Map, Value};
use tracing::info;

use super::request::{add_json_content_type, build_json_body, build_uri};
use super::response::{classify, hydrate_response};
use super::ApiError;
use crate::client::ConfluenceClient;
use crate::entity::{
    AttachmentList, ContentBody, ContentHistory, ContentItem, ContentSearchResult, ContentType,
    Representation,
};
use crate::http::{FilePart, HttpResponse};

/// Expansion requested by default for reads and searches.
pub const DEFAULT_EXPAND: &str = "space,version,body.storage,container";

/// Expansion requested when reading a specific version.
pub const VERSION_EXPAND: &str = "space,version,body.storage,container,ancestors,history";

/// Filters accepted by [`Content::find`]. Others are silently dropped.
pub const ALLOWED_FILTERS: [&str; 4] = ["title", "spaceKey", "type", "id"];

/// Header Confluence requires on attachment uploads to skip its XSRF check.
pub const NO_CHECK_HEADER: &str = "x-atlassian-token";

/// Handle to the `content` resource, borrowed from a [`ConfluenceClient`].
pub struct Content<'a> {
    client: &'a ConfluenceClient,
    expand: String,
}

impl<'a> Content<'a> {
    pub(crate) fn new(client: &'a ConfluenceClient) -> Self {
        Self {
            client,
            expand: DEFAULT_EXPAND.to_string(),
        }
    }

    /// Overrides the default expansion for reads issued through this handle.
    pub fn with_expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = expand.into();
        self
    }

    /// Fetches a content item, optionally at a given version.
    ///
    /// # Parameters
    ///
    /// * `id` - Content id
    /// * `version` - Historical version number, `None` for the current one
    pub async fn get(&self, id: u64, version: Option<u64>) -> Result<ContentItem, ApiError> {
        let uri = match version {
            Some(version) => build_uri(
                &format!("content/{id}/version/{version}"),
                &[("expand", Some(VERSION_EXPAND.to_string()))],
            ),
            None => build_uri(&format!("content/{id}"), &[("expand", Some(self.expand.clone()))]),
        };
        hydrate_response(self.http_get(&uri).await?)
    }

    /// Searches content.
    ///
    /// Only `title`, `spaceKey`, `type` and `id` filters are forwarded. An
    /// `expand` entry replaces the default expansion.
    pub async fn find(
        &self,
        filters: &[(&str, &str)],
        limit: Option<u64>,
        start: Option<u64>,
    ) -> Result<ContentSearchResult, ApiError> {
        let mut params: Vec<(&str, Option<String>)> = filters
            .iter()
            .filter(|(key, _)| ALLOWED_FILTERS.contains(key))
            .map(|(key, value)| (*key, Some((*value).to_string())))
            .collect();

        let expand = filters
            .iter()
            .find(|(key, _)| *key == "expand")
            .map_or_else(|| self.expand.clone(), |(_, value)| (*value).to_string());
        params.push(("expand", Some(expand)));
        params.push(("limit", limit.map(|n| n.to_string())));
        params.push(("start", start.map(|n| n.to_string())));

        hydrate_response(self.http_get(&build_uri("content", &params)).await?)
    }

    /// First result of [`find`](Self::find), or `None`.
    pub async fn find_one_by(
        &self,
        filters: &[(&str, &str)],
    ) -> Result<Option<ContentItem>, ApiError> {
        Ok(self
            .find(filters, None, None)
            .await?
            .into_results()
            .into_iter()
            .next())
    }

    /// Creates an unsaved item.
    ///
    /// # Errors
    ///
    /// [`ApiError::Construction`] if the item already has an id. No request
    /// is sent in that case.
    pub async fn create(&self, item: &ContentItem) -> Result<ContentItem, ApiError> {
        if item.id.is_some() {
            return Err(ApiError::Construction(
                "only unsaved items can be created".to_string(),
            ));
        }

        info!("Creating {} '{}'", item.content_type, item.title.as_deref().unwrap_or_default());
        let body = build_json_body(&create_payload(item))?;
        let response = self
            .send_json(Method::POST, &build_uri("content", &[]), body)
            .await?;
        hydrate_response(response)
    }

    /// Saves a new version of an item. The version number sent is
    /// `item.version + 1`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Construction`] if the item has no id.
    pub async fn update(&self, item: &ContentItem) -> Result<ContentItem, ApiError> {
        let id = saved_id(item, "updated")?;

        info!("Updating content {} to version {}", id, item.version + 1);
        let body = build_json_body(&update_payload(item, id))?;
        let response = self
            .send_json(Method::PUT, &build_uri(&format!("content/{id}"), &[]), body)
            .await?;
        hydrate_response(response)
    }

    /// Deletes an item and returns the raw acknowledgement.
    ///
    /// Error statuses are still classified.
    pub async fn delete(&self, item: &ContentItem) -> Result<HttpResponse, ApiError> {
        let id = saved_id(item, "deleted")?;

        info!("Deleting content {}", id);
        let response = self
            .send_json(Method::DELETE, &build_uri(&format!("content/{id}"), &[]), None)
            .await?;
        classify(response.status, &response.body, response.content_type())?;
        Ok(response)
    }

    /// Direct children of an item, optionally of one type.
    pub async fn children(
        &self,
        item: &ContentItem,
        content_type: Option<ContentType>,
    ) -> Result<ContentSearchResult, ApiError> {
        let uri = build_uri(
            &relation_path(item, "child", content_type)?,
            &[("expand", Some(self.expand.clone()))],
        );
        hydrate_response(self.http_get(&uri).await?)
    }

    /// All descendants of an item, optionally of one type.
    pub async fn descendants(
        &self,
        item: &ContentItem,
        content_type: Option<ContentType>,
    ) -> Result<ContentSearchResult, ApiError> {
        let uri = build_uri(&relation_path(item, "descendant", content_type)?, &[]);
        hydrate_response(self.http_get(&uri).await?)
    }

    /// Converts a storage-format body into another representation.
    ///
    /// # Parameters
    ///
    /// * `body` - Storage-format value
    /// * `to` - Target representation name, e.g. `"view"`
    /// * `context` - Item whose space and id resolve relative links and macros
    ///
    /// # Errors
    ///
    /// [`ApiError::Construction`] for an unsupported target, before any
    /// request is sent.
    pub async fn convert(
        &self,
        body: &str,
        to: &str,
        context: Option<&ContentItem>,
    ) -> Result<ContentBody, ApiError> {
        let to: Representation = to.parse()?;

        let uri = build_uri(
            &format!("contentbody/convert/{to}"),
            &[
                ("spaceKeyContext", context.and_then(|c| c.space.clone())),
                ("contentIdContext", context.and_then(|c| c.id).map(|id| id.to_string())),
            ],
        );

        let mut payload = Map::new();
        payload.insert("value".to_string(), Value::String(body.to_string()));
        payload.insert("representation".to_string(), json!("storage"));

        info!("Converting body to {}", to);
        let response = self
            .send_json(Method::POST, &uri, build_json_body(&payload)?)
            .await?;
        hydrate_response(response)
    }

    /// History of an item.
    pub async fn history(&self, id: u64) -> Result<ContentHistory, ApiError> {
        let uri = build_uri(&format!("content/{id}/history"), &[]);
        hydrate_response(self.http_get(&uri).await?)
    }

    /// Adds global labels to a saved item and returns the raw acknowledgement.
    pub async fn add_labels(
        &self,
        item: &ContentItem,
        labels: &[&str],
    ) -> Result<HttpResponse, ApiError> {
        let id = saved_id(item, "labelled")?;
        if labels.is_empty() {
            return Err(ApiError::Construction("no labels given".to_string()));
        }

        let payload: Vec<Value> = labels
            .iter()
            .map(|name| json!({"prefix": "global", "name": name}))
            .collect();
        let body = serde_json::to_string(&payload)
            .map_err(|e| ApiError::Construction(format!("cannot encode labels: {e}")))?;

        info!("Adding {} label(s) to content {}", labels.len(), id);
        let response = self
            .send_json(Method::POST, &build_uri(&format!("content/{id}/label"), &[]), Some(body))
            .await?;
        classify(response.status, &response.body, response.content_type())?;
        Ok(response)
    }

    /// Lists the attachments of a saved item.
    pub async fn attachments(&self, item: &ContentItem) -> Result<AttachmentList, ApiError> {
        let id = saved_id(item, "listed")?;
        let uri = build_uri(
            &format!("content/{id}/child/attachment"),
            &[("expand", Some("version".to_string()))],
        );
        hydrate_response(self.http_get(&uri).await?)
    }

    /// Uploads a local file as an attachment of a saved item and returns the
    /// raw acknowledgement.
    ///
    /// The file name sent is the last component of `path`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Construction`] if the item has no id or the file cannot be
    /// read. No request is sent in either case.
    pub async fn upload_attachment(
        &self,
        item: &ContentItem,
        path: &Path,
    ) -> Result<HttpResponse, ApiError> {
        saved_id(item, "attached to")?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ApiError::Construction(format!("not a file path: {}", path.display())))?;
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Construction(format!("cannot read {}: {e}", path.display())))?;
        self.upload_attachment_bytes(item, file_name, data).await
    }

    /// Uploads in-memory data as an attachment named `file_name`.
    pub async fn upload_attachment_bytes(
        &self,
        item: &ContentItem,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<HttpResponse, ApiError> {
        let id = saved_id(item, "attached to")?;
        if file_name.is_empty() {
            return Err(ApiError::Construction("attachment name is empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(NO_CHECK_HEADER),
            HeaderValue::from_static("no-check"),
        );

        info!("Uploading '{}' ({} bytes) to content {}", file_name, data.len(), id);
        let response = self
            .client
            .http_client()
            .upload(
                &build_uri(&format!("content/{id}/child/attachment"), &[]),
                headers,
                vec![FilePart::file(file_name, data)],
            )
            .await?;
        classify(response.status, &response.body, response.content_type())?;
        Ok(response)
    }

    async fn http_get(&self, uri: &str) -> Result<HttpResponse, ApiError> {
        Ok(self.client.http_client().get(uri, HeaderMap::new()).await?)
    }

    async fn send_json(
        &self,
        method: Method,
        uri: &str,
        body: Option<String>,
    ) -> Result<HttpResponse, ApiError> {
        let mut headers = HeaderMap::new();
        if body.is_some() {
            add_json_content_type(&mut headers);
        }
        Ok(self
            .client
            .http_client()
            .send(method, uri, headers, body)
            .await?)
    }
}

fn saved_id(item: &ContentItem, action: &str) -> Result<u64, ApiError> {
    item.id
        .ok_or_else(|| ApiError::Construction(format!("only saved items can be {action}")))
}

fn relation_path(
    item: &ContentItem,
    relation: &str,
    content_type: Option<ContentType>,
) -> Result<String, ApiError> {
    let id = saved_id(item, "traversed")?;
    Ok(match content_type {
        Some(content_type) => format!("content/{id}/{relation}/{content_type}"),
        None => format!("content/{id}/{relation}"),
    })
}

fn base_payload(item: &ContentItem) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("type".to_string(), json!(item.content_type));
    payload.insert("title".to_string(), json!(item.title));
    payload.insert("space".to_string(), json!({"key": item.space}));
    payload.insert(
        "body".to_string(),
        json!({"storage": {"value": item.body, "representation": "storage"}}),
    );
    if !item.ancestors.is_empty() {
        let ancestors: Vec<Value> = item.ancestors.iter().map(|id| json!({"id": id})).collect();
        payload.insert("ancestors".to_string(), Value::Array(ancestors));
    }
    payload
}

pub(crate) fn create_payload(item: &ContentItem) -> Map<String, Value> {
    let mut payload = base_payload(item);
    if let Some(container) = item.container {
        payload.insert(
            "container".to_string(),
            json!({"id": container.id, "type": container.content_type}),
        );
    }
    payload
}

pub(crate) fn update_payload(item: &ContentItem, id: u64) -> Map<String, Value> {
    let mut payload = base_payload(item);
    payload.insert("id".to_string(), json!(id));
    payload.insert("version".to_string(), json!({"number": item.version + 1}));
    payload
}
