//
//  confluence-client
//  entity/search.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Paginated content listings.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{
    invalid, optional_str, optional_u64, require, require_u64, ContentItem, HydrationError,
    Hydratable,
};

/// One page of content results.
///
/// The server signals more results with a `_links.next` continuation; when it
/// is absent this is the last page.
///
/// # Example
///
/// ```rust,ignore
/// let mut start = 0;
/// loop {
///     let page = client.content().find(&filters, Some(25), Some(start)).await?;
///     for item in &page {
///         println!("{:?}", item.title);
///     }
///     if page.is_last_page() {
///         break;
///     }
///     start += page.size();
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentSearchResult {
    size: u64,
    start: Option<u64>,
    limit: Option<u64>,
    results: Vec<ContentItem>,
    next_link: Option<String>,
}

impl Default for ContentSearchResult {
    fn default() -> Self {
        Self {
            size: 0,
            start: None,
            limit: None,
            results: Vec::new(),
            next_link: None,
        }
    }
}

impl ContentSearchResult {
    /// Declared number of results on this page.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Offset of this page, when the server reported it.
    pub fn start(&self) -> Option<u64> {
        self.start
    }

    /// Page size limit, when the server reported it.
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Hydrated items, in server order.
    pub fn results(&self) -> &[ContentItem] {
        &self.results
    }

    /// The item at `position`, if any.
    pub fn result_at(&self, position: usize) -> Option<&ContentItem> {
        self.results.get(position)
    }

    /// Consumes the result set, yielding its items.
    pub fn into_results(self) -> Vec<ContentItem> {
        self.results
    }

    /// Raw `_links.next` continuation.
    pub fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref()
    }

    /// `true` unless the server sent a continuation link.
    pub fn is_last_page(&self) -> bool {
        self.next_link.is_none()
    }

    /// Number of hydrated items.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns `true` if no items were hydrated.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterates over the hydrated items.
    pub fn iter(&self) -> std::slice::Iter<'_, ContentItem> {
        self.results.iter()
    }
}

impl<'a> IntoIterator for &'a ContentSearchResult {
    type Item = &'a ContentItem;
    type IntoIter = std::slice::Iter<'a, ContentItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl Hydratable for ContentSearchResult {
    fn load(data: &Map<String, Value>) -> Result<Self, HydrationError> {
        let entries = require(data, "results")?
            .as_array()
            .ok_or_else(|| invalid("results", "array"))?;
        let size = require_u64(data, "size")?;

        let mut results = Vec::new();
        if size >= 1 {
            results.reserve(entries.len());
            for entry in entries {
                let entry = entry
                    .as_object()
                    .ok_or_else(|| invalid("results", "array of objects"))?;
                results.push(ContentItem::load(entry)?);
            }
        }

        let (start, limit) = match (optional_u64(data, "start")?, optional_u64(data, "limit")?) {
            (Some(start), Some(limit)) => (Some(start), Some(limit)),
            _ => (None, None),
        };

        Ok(Self {
            size,
            start,
            limit,
            results,
            next_link: optional_str(data, "_links.next").map(str::to_string),
        })
    }
}
