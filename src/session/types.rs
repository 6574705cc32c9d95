//! Types for authentication and profile management

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user record plus bearer token.
///
/// This is both the wire shape returned by register/login and the record
/// persisted across restarts. `None` in the store means unauthenticated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The user ID
    #[serde(rename = "_id")]
    pub user_id: String,

    /// First name
    pub name: String,

    /// Last name
    pub surname: String,

    /// Email address
    pub email: String,

    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Postal code
    #[serde(rename = "pinCode", default, skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<String>,

    /// Profile photo URL
    #[serde(
        rename = "profilePhoto",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_photo: Option<String>,

    /// Ids of the ideas this user has bookmarked
    #[serde(default)]
    pub bookmarks: Vec<String>,

    /// Account creation time
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// The bearer token attached to authorized requests
    pub token: String,
}

impl Session {
    /// Shallow-merge profile fields returned by the server.
    ///
    /// Fields absent from the response are preserved, not cleared.
    pub(crate) fn merge(&mut self, fields: &ProfileFields) {
        if let Some(name) = &fields.name {
            self.name = name.clone();
        }
        if let Some(surname) = &fields.surname {
            self.surname = surname.clone();
        }
        if let Some(email) = &fields.email {
            self.email = email.clone();
        }
        if let Some(phone) = &fields.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(address) = &fields.address {
            self.address = Some(address.clone());
        }
        if let Some(pin_code) = &fields.pin_code {
            self.pin_code = Some(pin_code.clone());
        }
        if let Some(profile_photo) = &fields.profile_photo {
            self.profile_photo = Some(profile_photo.clone());
        }
        if let Some(bookmarks) = &fields.bookmarks {
            self.bookmarks = bookmarks.clone();
        }
    }
}

/// Profile fields as returned by the profile endpoints.
///
/// Everything is optional so a partial response merges cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileFields {
    /// First name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Last name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,

    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Postal code
    #[serde(rename = "pinCode", default, skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<String>,

    /// Profile photo URL
    #[serde(
        rename = "profilePhoto",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_photo: Option<String>,

    /// Ids of the ideas this user has bookmarked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmarks: Option<Vec<String>>,
}

/// Fields submitted when registering a new account
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// First name
    pub name: String,

    /// Last name
    pub surname: String,

    /// Email address
    pub email: String,

    /// Password
    pub password: String,

    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Postal address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Postal code
    #[serde(rename = "pinCode", skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<String>,
}

/// Email and password for login
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

/// Profile fields that can be updated.
///
/// Email is forwarded when present; keeping the email field read-only is a
/// view-boundary concern, not enforced here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    /// First name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Last name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,

    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Postal address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Postal code
    #[serde(rename = "pinCode", skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<String>,

    /// Profile photo URL
    #[serde(rename = "profilePhoto", skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            user_id: "u1".to_string(),
            name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("555-0100".to_string()),
            address: None,
            pin_code: None,
            profile_photo: None,
            bookmarks: vec!["i1".to_string()],
            created_at: None,
            token: "tok".to_string(),
        }
    }

    #[test]
    fn merge_preserves_absent_fields() {
        let mut session = session();
        let fields = ProfileFields {
            name: Some("Augusta".to_string()),
            ..ProfileFields::default()
        };

        session.merge(&fields);

        assert_eq!(session.name, "Augusta");
        assert_eq!(session.phone.as_deref(), Some("555-0100"));
        assert_eq!(session.bookmarks, vec!["i1".to_string()]);
        assert_eq!(session.token, "tok");
    }

    #[test]
    fn merge_replaces_bookmarks_wholesale() {
        let mut session = session();
        let fields = ProfileFields {
            bookmarks: Some(vec!["i2".to_string(), "i3".to_string()]),
            ..ProfileFields::default()
        };

        session.merge(&fields);
        assert_eq!(session.bookmarks, vec!["i2".to_string(), "i3".to_string()]);
    }
}
