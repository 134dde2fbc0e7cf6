//! Bearer token pool for the upstream user-account API
//!
//! Holds the ordered set of configured tokens, hands out a uniformly random
//! token for outgoing requests, and validates tokens against the identity
//! endpoint. Insertion order is significant: it is the index space used by
//! name mapping and by `validate_all` result ordering.
//!
//! Token lifecycle:
//! 1. Owner appends tokens via `TokenPool::add` at startup
//! 2. `validate_all` fans out one identity fetch per token concurrently
//! 3. Requests without a pinned token call `random_token`
//! 4. The backing sequence is never mutated after startup

pub mod error;
pub mod identity;
pub mod pool;

pub use error::{Error, Result};
pub use identity::IdentityRecord;
pub use pool::{TokenCheck, TokenPool};
