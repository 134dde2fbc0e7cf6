//! Upstream endpoint paths
//!
//! The remote API surface used by this client is four fixed paths, each
//! parameterized only by an entity identifier. Paths are relative to the
//! configured base URL.

/// Entity key addressing the credential's own identity.
pub const SELF_KEY: &str = "@me";

/// Identity ("who am I") endpoint for a token.
pub fn identity() -> String {
    user(SELF_KEY)
}

/// User record endpoint.
pub fn user(id: &str) -> String {
    format!("/users/{id}")
}

/// User profile endpoint.
pub fn user_profile(id: &str) -> String {
    format!("/users/{id}/profile")
}

/// Channel message-send endpoint.
pub fn channel_messages(channel_id: &str) -> String {
    format!("/channels/{channel_id}/messages")
}
