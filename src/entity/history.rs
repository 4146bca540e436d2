//
//  confluence-client
//  entity/history.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Content history records.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::{
    invalid, lookup, require_object, require_str, require_u64, HydrationError, Hydratable, User,
};

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%3fZ";

/// Creation and last-update information of a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentHistory {
    /// When the item was created.
    pub created_date: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_date: DateTime<Utc>,
    /// Whether this describes the latest version.
    pub latest: bool,
    /// Creator.
    pub created_by: User,
    /// Last editor.
    pub updated_by: User,
    /// Current version number.
    pub last_version_number: u64,
}

impl Hydratable for ContentHistory {
    fn load(data: &Map<String, Value>) -> Result<Self, HydrationError> {
        let latest = match lookup(data, "latest") {
            None | Some(Value::Null) => false,
            Some(value) => value.as_bool().ok_or_else(|| invalid("latest", "boolean"))?,
        };

        Ok(Self {
            created_date: parse_date(require_str(data, "createdDate")?)?,
            updated_date: parse_date(require_str(data, "lastUpdated.when")?)?,
            latest,
            created_by: User::load(require_object(data, "createdBy")?)?,
            updated_by: User::load(require_object(data, "lastUpdated.by")?)?,
            last_version_number: require_u64(data, "lastUpdated.number")?,
        })
    }
}

/// Parses `YYYY-MM-DDTHH:mm:ss.sssZ`. Any other shape is rejected.
fn parse_date(raw: &str) -> Result<DateTime<Utc>, HydrationError> {
    NaiveDateTime::parse_from_str(raw, DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| HydrationError::InvalidDate(raw.to_string()))
}
