//
//  confluence-client
//  entity/content.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Content items: pages and comments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    as_u64, invalid, lookup, optional_str, optional_u64, require_str, require_u64, HydrationError,
    Hydratable,
};

/// The `type` discriminant of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// A page.
    Page,
    /// A comment attached to a container.
    Comment,
    /// The untyped default of a freshly constructed item.
    #[default]
    Global,
    /// A file attachment.
    Attachment,
}

impl ContentType {
    /// The wire name, e.g. `"page"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Comment => "comment",
            Self::Global => "global",
            Self::Attachment => "attachment",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = HydrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page" => Ok(Self::Page),
            "comment" => Ok(Self::Comment),
            "global" => Ok(Self::Global),
            "attachment" => Ok(Self::Attachment),
            other => Err(HydrationError::InvalidContentType(other.to_string())),
        }
    }
}

/// The resource a comment or child item hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRef {
    /// Container id.
    pub id: u64,
    /// Container type.
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

/// A page or comment.
///
/// `id == None` means the item has not been saved yet: only such items can
/// be created, and only items with an id can be updated or deleted.
///
/// # Example
///
/// ```rust
/// use confluence_client::entity::{ContentItem, ContentType};
///
/// let mut page = ContentItem::page("Release notes", "DOCS");
/// page.body = Some("<p>v1.0</p>".to_string());
/// assert_eq!(page.content_type, ContentType::Page);
/// assert_eq!(page.version, 1);
/// assert!(page.id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Server id, `None` until persisted.
    pub id: Option<u64>,
    /// Variant discriminant.
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Title. Comments usually have none.
    pub title: Option<String>,
    /// Owning space key.
    pub space: Option<String>,
    /// Body in storage representation.
    pub body: Option<String>,
    /// Version number. Starts at 1; the server increments on update.
    pub version: u64,
    /// Ancestor ids, root first, immediate parent last.
    pub ancestors: Vec<u64>,
    /// Container this item is attached to.
    pub container: Option<ContainerRef>,
    /// Canonical self URL.
    pub url: Option<String>,
}

impl Default for ContentItem {
    fn default() -> Self {
        Self {
            id: None,
            content_type: ContentType::Global,
            title: None,
            space: None,
            body: None,
            version: 1,
            ancestors: Vec::new(),
            container: None,
            url: None,
        }
    }
}

impl ContentItem {
    /// A new, unsaved page.
    pub fn page(title: impl Into<String>, space: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::Page,
            title: Some(title.into()),
            space: Some(space.into()),
            ..Self::default()
        }
    }

    /// A new, unsaved comment with a storage-format body.
    pub fn comment(body: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::Comment,
            body: Some(body.into()),
            ..Self::default()
        }
    }

    /// Returns `true` for the page variant.
    pub fn is_page(&self) -> bool {
        self.content_type == ContentType::Page
    }

    /// Returns `true` for the comment variant.
    pub fn is_comment(&self) -> bool {
        self.content_type == ContentType::Comment
    }

    /// The immediate parent, if ancestors were expanded.
    pub fn parent_id(&self) -> Option<u64> {
        self.ancestors.last().copied()
    }

    /// Builds an unsaved comment whose container is this item.
    pub fn create_comment(&self, comment: impl Into<String>) -> ContentItem {
        ContentItem {
            container: self.as_container(),
            space: self.space.clone(),
            ..ContentItem::comment(comment)
        }
    }

    /// Builds an unsaved page whose container is this item.
    pub fn create_subpage(&self, title: impl Into<String>, body: impl Into<String>) -> ContentItem {
        ContentItem {
            content_type: ContentType::Page,
            title: Some(title.into()),
            space: self.space.clone(),
            body: Some(body.into()),
            container: self.as_container(),
            ..ContentItem::default()
        }
    }

    fn as_container(&self) -> Option<ContainerRef> {
        self.id.map(|id| ContainerRef {
            id,
            content_type: self.content_type,
        })
    }
}

impl Hydratable for ContentItem {
    fn load(data: &Map<String, Value>) -> Result<Self, HydrationError> {
        let content_type = match optional_str(data, "type") {
            Some("page") => ContentType::Page,
            Some("comment") => ContentType::Comment,
            Some(other) => return Err(HydrationError::InvalidContentType(other.to_string())),
            None => return Err(HydrationError::MissingField("type".to_string())),
        };

        let ancestors = match lookup(data, "ancestors") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|ancestor| ancestor.get("id").and_then(as_u64))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| invalid("ancestors", "list of objects with an id"))?,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => return Err(invalid("ancestors", "array")),
        };

        let container = match optional_u64(data, "container.id")? {
            Some(id) => Some(ContainerRef {
                id,
                content_type: optional_str(data, "container.type")
                    .unwrap_or("page")
                    .parse()?,
            }),
            None => None,
        };

        Ok(Self {
            id: Some(require_u64(data, "id")?),
            content_type,
            title: Some(require_str(data, "title")?.to_string()),
            space: optional_str(data, "space.key").map(str::to_string),
            body: optional_str(data, "body.storage.value").map(str::to_string),
            version: optional_u64(data, "version.number")?.unwrap_or(1),
            ancestors,
            container,
            url: Some(require_str(data, "_links.self")?.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn load(value: Value) -> Result<ContentItem, HydrationError> {
        ContentItem::load(value.as_object().unwrap())
    }

    fn page_json() -> Value {
        json!({
            "id": "1234556",
            "type": "page",
            "title": "Test title",
            "space": {"key": "DOCS"},
            "version": {"number": 4},
            "body": {"storage": {"value": "<p>Hi</p>", "representation": "storage"}},
            "ancestors": [{"id": "1"}, {"id": "20"}],
            "_links": {"self": "https://example.com/content/1234556"}
        })
    }

    #[test]
    fn test_load_page() {
        let page = load(page_json()).unwrap();
        assert!(page.is_page());
        assert_eq!(page.id, Some(1234556));
        assert_eq!(page.title.as_deref(), Some("Test title"));
        assert_eq!(page.space.as_deref(), Some("DOCS"));
        assert_eq!(page.body.as_deref(), Some("<p>Hi</p>"));
        assert_eq!(page.version, 4);
        assert_eq!(page.ancestors, vec![1, 20]);
        assert_eq!(page.parent_id(), Some(20));
        assert_eq!(page.url.as_deref(), Some("https://example.com/content/1234556"));
    }

    #[test]
    fn test_load_comment_with_defaults() {
        let comment = load(json!({
            "id": 99,
            "type": "comment",
            "title": "Re: Test title",
            "container": {"id": "1234556", "type": "page"},
            "_links": {"self": "https://example.com/content/99"}
        }))
        .unwrap();

        assert!(comment.is_comment());
        assert_eq!(comment.version, 1);
        assert!(comment.space.is_none());
        assert!(comment.body.is_none());
        assert_eq!(
            comment.container,
            Some(ContainerRef {
                id: 1234556,
                content_type: ContentType::Page
            })
        );
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let mut value = page_json();
        value["type"] = json!("unknown");
        assert!(matches!(
            load(value),
            Err(HydrationError::InvalidContentType(t)) if t == "unknown"
        ));
    }

    #[test]
    fn test_required_fields() {
        for field in ["id", "title", "type"] {
            let mut value = page_json();
            value.as_object_mut().unwrap().remove(field);
            assert!(load(value).is_err(), "{field} should be required");
        }

        let mut value = page_json();
        value["_links"] = json!({});
        assert!(matches!(load(value), Err(HydrationError::MissingField(f)) if f == "_links.self"));
    }

    #[test]
    fn test_create_comment_and_subpage() {
        let page = load(page_json()).unwrap();

        let comment = page.create_comment("<p>nice</p>");
        assert!(comment.id.is_none());
        assert!(comment.is_comment());
        assert_eq!(comment.container.map(|c| c.id), Some(1234556));
        assert_eq!(comment.container.map(|c| c.content_type), Some(ContentType::Page));

        let child = page.create_subpage("Child", "<p>body</p>");
        assert!(child.is_page());
        assert_eq!(child.title.as_deref(), Some("Child"));
        assert_eq!(child.space.as_deref(), Some("DOCS"));
        assert_eq!(child.container.map(|c| c.id), Some(1234556));
    }

    #[test]
    fn test_new_item_defaults() {
        let item = ContentItem::default();
        assert_eq!(item.content_type, ContentType::Global);
        assert_eq!(item.version, 1);
        assert_eq!("attachment".parse::<ContentType>().unwrap(), ContentType::Attachment);
    }
}
