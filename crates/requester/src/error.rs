//! Error types for the cached read and send paths

/// Errors from requester operations.
///
/// Ordinary upstream failure on a read path is not an error: reads degrade
/// to `Ok(None)`. Errors are reserved for precondition violations (empty
/// pool, malformed send arguments) and send-path transport failure, where
/// the caller must distinguish "no data" from "operation failed".
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Pool(#[from] token_pool::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("message send failed: {0}")]
    Upstream(String),
}

/// Result alias for requester operations.
pub type Result<T> = std::result::Result<T, Error>;
