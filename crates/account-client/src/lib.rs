//! Credential-rotating client for a user-account REST API
//!
//! Holds a pool of bearer tokens, validates them at startup, round-robins
//! them across outgoing requests, and caches per-entity responses with a
//! process-wide TTL so repeated reads for the same entity do not re-hit
//! the network.
//!
//! Startup flow:
//! 1. Owner loads a `Config` (TOML file or programmatic) — zero tokens,
//!    a TTL below the floor, or a malformed token map fail here
//! 2. `Client::new` wires transport, pool, name index, and requester
//! 3. `Client::validate_startup` checks every token concurrently, logs one
//!    line per token (masked), and fails fast on any invalid token
//! 4. Steady state: reads resolve through the requester's cache, sends go
//!    straight through
//!
//! Cache and tokens live for the process lifetime only; nothing persists
//! across restarts.

pub mod client;
pub mod config;
pub mod names;

pub use client::Client;
pub use config::{
    ApiConfig, CacheConfig, Config, DEFAULT_CACHE_DURATION_MS, MIN_CACHE_DURATION_MS, TokenEntry,
};
pub use names::NameIndex;

// Workspace surface re-exported for embedders.
pub use common::{Masked, mask};
pub use requester::{
    CacheTarget, FetchOptions, MessageRecord, PremiumType, Requester, UserInfo, UserProfile,
};
pub use token_pool::{IdentityRecord, TokenCheck, TokenPool};
pub use transport::{ApiResponse, HttpTransport, Transport, endpoints};
