//! Identity record returned by the "who am I" endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The account behind a token.
///
/// Only the fields read by startup reporting are typed; everything else
/// the upstream sends is kept verbatim in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub id: String,
    pub username: String,
    /// Email address, or `None` when the account has none on file.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number, or `None` when the account has none on file.
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl IdentityRecord {
    /// Whether the account has a non-empty email on file.
    pub fn email_verified(&self) -> bool {
        self.email.as_deref().is_some_and(|e| !e.is_empty())
    }

    /// Whether the account has a non-empty phone number on file.
    pub fn phone_verified(&self) -> bool {
        self.phone.as_deref().is_some_and(|p| !p.is_empty())
    }
}
