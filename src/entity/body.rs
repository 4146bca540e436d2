//
//  confluence-client
//  entity/body.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Content bodies and their representations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{require_str, HydrationError, Hydratable};
use crate::api::ApiError;

/// The formats a body can be converted between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    /// Confluence storage format (XHTML).
    Storage,
    /// Editor format.
    Editor,
    /// Rendered HTML.
    View,
    /// HTML for export.
    ExportView,
    /// HTML with inline styles.
    StyledView,
    /// Legacy wiki markup.
    Wiki,
}

impl Representation {
    /// Every supported representation.
    pub const ALL: [Representation; 6] = [
        Self::Storage,
        Self::Editor,
        Self::View,
        Self::ExportView,
        Self::StyledView,
        Self::Wiki,
    ];

    /// The wire name, e.g. `"export_view"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::Editor => "editor",
            Self::View => "view",
            Self::ExportView => "export_view",
            Self::StyledView => "styled_view",
            Self::Wiki => "wiki",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Representation {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|repr| repr.as_str() == s)
            .ok_or_else(|| ApiError::Construction(format!("unsupported representation: {s}")))
    }
}

/// A body value with its representation, as returned by a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentBody {
    /// The body text.
    pub value: String,
    /// Its representation, as reported by the server.
    pub representation: String,
}

impl Hydratable for ContentBody {
    fn load(data: &Map<String, Value>) -> Result<Self, HydrationError> {
        Ok(Self {
            value: require_str(data, "value")?.to_string(),
            representation: require_str(data, "representation")?.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_representation_names() {
        for repr in Representation::ALL {
            assert_eq!(repr.as_str().parse::<Representation>().unwrap(), repr);
        }
        assert!(matches!("invalid".parse::<Representation>(), Err(ApiError::Construction(_))));
        assert!("Storage".parse::<Representation>().is_err());
    }

    #[test]
    fn test_load_body() {
        let data = json!({"value": "<p>x</p>", "representation": "view"});
        let body = ContentBody::load(data.as_object().unwrap()).unwrap();
        assert_eq!(body.value, "<p>x</p>");
        assert_eq!(body.representation, "view");
    }

    #[test]
    fn test_body_requires_both_fields() {
        let data = json!({"value": "<p>x</p>"});
        assert!(ContentBody::load(data.as_object().unwrap()).is_err());
    }
}
