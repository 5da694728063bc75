//! Account record entity as persisted by the web client.

use fa_shared::utils::validation::{validators, Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Account record the web client keeps in storage
///
/// Serialized as camelCase JSON to stay byte-compatible with the records the
/// client already holds. Only `email` and `token` are required; absent
/// optional fields are omitted from the output entirely, so a minimal record
/// round-trips as exactly `{"email":"a@b.com","token":"t1"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Server-assigned identifier, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Given name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Account email address
    pub email: String,

    /// Mobile number, if provided during registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Auth token issued for this account
    pub token: String,
}

impl UserRecord {
    /// Creates a minimal record from the two required fields
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: None,
            last_name: None,
            email: email.into(),
            phone: None,
            token: token.into(),
        }
    }

    /// Sets the server-assigned identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the given and family names
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    /// Sets the mobile number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// A printable name for greetings: full name when known, email otherwise
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            _ => self.email.clone(),
        }
    }
}

impl Validate for UserRecord {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !validators::not_empty(&self.email) {
            errors.add_error("email", "must not be empty", "REQUIRED");
        } else if !validators::is_valid_email(&self.email) {
            errors.add_error("email", "must be a valid address", "FORMAT");
        }

        if !validators::not_empty(&self.token) {
            errors.add_error("token", "must not be empty", "REQUIRED");
        }

        if errors.has_errors() {
            Err(errors)
        } else {
            Ok(())
        }
    }
}
