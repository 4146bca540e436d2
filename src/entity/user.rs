//
//  confluence-client
//  entity/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Users as embedded in history records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    invalid, require, require_bool, require_object, require_str, HydrationError, Hydratable,
};

/// A Confluence user. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User type, e.g. `known`.
    #[serde(rename = "type")]
    pub user_type: String,
    /// Atlassian account id.
    pub account_id: String,
    /// Account type, e.g. `atlassian`.
    pub account_type: String,
    /// Email address.
    pub email: String,
    /// Public name.
    pub public_name: String,
    /// Display name.
    pub display_name: String,
    /// Whether the user is an external collaborator.
    pub is_external_collaborator: bool,
    /// Avatar.
    pub profile_picture: UserPicture,
}

/// A user's avatar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPicture {
    /// Relative avatar path.
    pub path: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Whether this is the generated default avatar.
    pub is_default: bool,
}

impl Hydratable for User {
    fn load(data: &Map<String, Value>) -> Result<Self, HydrationError> {
        Ok(Self {
            user_type: require_str(data, "type")?.to_string(),
            account_id: require_str(data, "accountId")?.to_string(),
            account_type: require_str(data, "accountType")?.to_string(),
            email: require_str(data, "email")?.to_string(),
            public_name: require_str(data, "publicName")?.to_string(),
            display_name: require_str(data, "displayName")?.to_string(),
            is_external_collaborator: require_bool(data, "isExternalCollaborator")?,
            profile_picture: UserPicture::load(require_object(data, "profilePicture")?)?,
        })
    }
}

impl Hydratable for UserPicture {
    fn load(data: &Map<String, Value>) -> Result<Self, HydrationError> {
        Ok(Self {
            path: require_str(data, "path")?.to_string(),
            width: dimension(data, "width")?,
            height: dimension(data, "height")?,
            is_default: require_bool(data, "isDefault")?,
        })
    }
}

fn dimension(data: &Map<String, Value>, field: &str) -> Result<u32, HydrationError> {
    require(data, field)?
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| invalid(field, "pixel size"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn user_json() -> Value {
        json!({
            "type": "known",
            "accountId": "598058:5c617f13",
            "accountType": "atlassian",
            "email": "somemail@gmail.com",
            "publicName": "myusername",
            "displayName": "Demo User",
            "isExternalCollaborator": false,
            "profilePicture": {
                "path": "/wiki/aa-avatar/598058",
                "width": 48,
                "height": 48,
                "isDefault": false
            }
        })
    }

    #[test]
    fn test_load_user() {
        let user = User::load(user_json().as_object().unwrap()).unwrap();
        assert_eq!(user.display_name, "Demo User");
        assert_eq!(user.public_name, "myusername");
        assert_eq!(user.profile_picture.width, 48);
        assert!(!user.profile_picture.is_default);
    }

    #[test]
    fn test_every_field_is_required() {
        let fields = [
            "type",
            "accountId",
            "accountType",
            "email",
            "publicName",
            "displayName",
            "isExternalCollaborator",
            "profilePicture",
        ];
        for field in fields {
            let mut value = user_json();
            value.as_object_mut().unwrap().remove(field);
            assert!(User::load(value.as_object().unwrap()).is_err(), "{field} should be required");
        }
    }

    #[test]
    fn test_picture_fields_are_required() {
        let mut value = user_json();
        value["profilePicture"].as_object_mut().unwrap().remove("isDefault");
        assert!(matches!(
            User::load(value.as_object().unwrap()),
            Err(HydrationError::MissingField(f)) if f == "isDefault"
        ));
    }
}
