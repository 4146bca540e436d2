//
//  confluence-client
//  entity/attachment.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Files attached to a page or comment.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{
    invalid, optional_str, optional_u64, require, require_str, HydrationError, Hydratable,
};

/// One attachment. Attachments are content of type `attachment` but carry
/// file metadata instead of a storage body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// Attachment id. Confluence prefixes it with `att` on the wire.
    pub id: String,
    /// File name.
    pub title: String,
    /// MIME type reported by the server.
    pub media_type: Option<String>,
    /// Size in bytes.
    pub file_size: Option<u64>,
    /// Version number, 0 when not expanded.
    pub version: u64,
    /// Download path relative to the instance base URL.
    pub download_link: Option<String>,
}

impl Hydratable for Attachment {
    fn load(data: &Map<String, Value>) -> Result<Self, HydrationError> {
        let id = match require(data, "id")? {
            Value::String(id) => id.clone(),
            Value::Number(n) => n.to_string(),
            _ => return Err(invalid("id", "string")),
        };

        Ok(Self {
            id,
            title: require_str(data, "title")?.to_string(),
            media_type: optional_str(data, "extensions.mediaType").map(str::to_string),
            file_size: optional_u64(data, "extensions.fileSize")?,
            version: optional_u64(data, "version.number")?.unwrap_or(0),
            download_link: optional_str(data, "_links.download").map(str::to_string),
        })
    }
}

/// Attachments of one item, as listed or as acknowledged after an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttachmentList {
    size: u64,
    results: Vec<Attachment>,
    next_link: Option<String>,
}

impl AttachmentList {
    /// Declared number of results on this page.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Hydrated attachments, in server order.
    pub fn results(&self) -> &[Attachment] {
        &self.results
    }

    /// The attachment with the given file name, if listed.
    pub fn by_title(&self, title: &str) -> Option<&Attachment> {
        self.results.iter().find(|a| a.title == title)
    }

    /// `true` unless the server sent a continuation link.
    pub fn is_last_page(&self) -> bool {
        self.next_link.is_none()
    }

    /// Number of hydrated attachments.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns `true` if no attachments were hydrated.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterates over the hydrated attachments.
    pub fn iter(&self) -> std::slice::Iter<'_, Attachment> {
        self.results.iter()
    }
}

impl<'a> IntoIterator for &'a AttachmentList {
    type Item = &'a Attachment;
    type IntoIter = std::slice::Iter<'a, Attachment>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl Hydratable for AttachmentList {
    fn load(data: &Map<String, Value>) -> Result<Self, HydrationError> {
        let entries = require(data, "results")?
            .as_array()
            .ok_or_else(|| invalid("results", "array"))?;

        let results = entries
            .iter()
            .map(|entry| {
                entry
                    .as_object()
                    .ok_or_else(|| invalid("results", "array of objects"))
                    .and_then(Attachment::load)
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Upload acknowledgements omit `size`.
        let size = match optional_u64(data, "size")? {
            Some(size) => size,
            None => results.len() as u64,
        };

        Ok(Self {
            size,
            results,
            next_link: optional_str(data, "_links.next").map(str::to_string),
        })
    }
}
