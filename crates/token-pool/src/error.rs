//! Error types for pool operations

/// Errors from pool operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Selection from a pool with zero tokens. A correctly configured
    /// system never reaches this; configuration rejects empty token maps.
    #[error("token pool is empty")]
    EmptyPool,

    #[error("identity fetch failed: {0}")]
    Upstream(String),
}

/// Result alias for pool operations.
pub type Result<T> = std::result::Result<T, Error>;
