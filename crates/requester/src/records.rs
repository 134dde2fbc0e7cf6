//! Remote entity records
//!
//! The upstream payloads are stored in the cache verbatim: only the fields
//! this client reads are typed, everything else rides along in `extra`
//! maps untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Premium tier carried by profile records as a small integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremiumType {
    None,
    Classic,
    Standard,
    Boost,
    /// A code this client does not know about. Kept rather than rejected
    /// so new upstream tiers don't break profile reads.
    Unknown(u64),
}

impl PremiumType {
    pub fn from_code(code: u64) -> Self {
        match code {
            0 => PremiumType::None,
            1 => PremiumType::Classic,
            2 => PremiumType::Standard,
            3 => PremiumType::Boost,
            other => PremiumType::Unknown(other),
        }
    }

    /// Tier label for display.
    pub fn label(&self) -> &'static str {
        match self {
            PremiumType::None => "none",
            PremiumType::Classic => "classic",
            PremiumType::Standard => "standard",
            PremiumType::Boost => "boost",
            PremiumType::Unknown(_) => "unknown",
        }
    }
}

/// Free-form profile details nested inside a profile record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDetails {
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub pronouns: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A user profile record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user: UserInfo,
    #[serde(default)]
    pub premium_type: Option<u64>,
    #[serde(default)]
    pub premium_since: Option<String>,
    #[serde(default)]
    pub user_profile: Option<ProfileDetails>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl UserProfile {
    /// The profile's premium tier; a missing code means no subscription.
    pub fn premium(&self) -> PremiumType {
        self.premium_type
            .map(PremiumType::from_code)
            .unwrap_or(PremiumType::None)
    }

    /// The profile's bio text, if any.
    pub fn bio(&self) -> Option<&str> {
        self.user_profile.as_ref().and_then(|p| p.bio.as_deref())
    }
}

/// Response to a sent message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: String,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
