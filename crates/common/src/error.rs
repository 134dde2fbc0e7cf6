//! Configuration error type
//!
//! Construction-time failures (malformed token map, bad TTL, invalid
//! startup credentials) are fatal and surface through this type. Steady
//! state request failures never use it.

use thiserror::Error;

/// Fatal configuration error
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result alias using the configuration Error
pub type Result<T> = std::result::Result<T, Error>;
