//! Cached read layer for the upstream user-account API
//!
//! Every cacheable read shares one cache-or-fetch algorithm, parameterized
//! by cache namespace and the transport call to perform on a miss. The
//! cache is partitioned into closed, typed namespaces (one per entity
//! kind) with a single process-wide TTL.
//!
//! Read lifecycle per (namespace, key):
//! 1. Absent → forced fetch → Fresh on success (stamped with fetch time)
//! 2. Fresh within the TTL → served from cache, no transport call
//! 3. Age reaches the TTL → treated exactly like Absent, one re-fetch
//! 4. A failed fetch never evicts whatever is already stored
//!
//! The message-send path is write-through: never cached, never retried.

pub mod cache;
pub mod error;
pub mod records;
pub mod requester;

pub use cache::{CacheEntry, CacheTarget, Namespace};
pub use error::{Error, Result};
pub use records::{MessageRecord, PremiumType, ProfileDetails, UserInfo, UserProfile};
pub use requester::{FetchOptions, Requester};
