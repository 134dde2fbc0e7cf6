//! Transport abstraction for the upstream user-account API
//!
//! Defines the `Transport` trait that decouples the pool and requester from
//! the HTTP layer. `HttpTransport` is the production implementation backed
//! by `reqwest`; tests substitute in-memory implementations to count calls
//! and script responses.
//!
//! A transport call either yields an `ApiResponse` (any status, including
//! non-2xx) or fails with `Error::Http` when no response was obtained at
//! all (connect failure, timeout). Callers decide what a non-2xx status
//! means; this crate never retries.

pub mod endpoints;
pub mod http;

pub use http::HttpTransport;

use std::future::Future;
use std::pin::Pin;

/// Errors from transport operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),
}

/// Result alias for transport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A decoded upstream response: status code plus JSON body.
///
/// The body is kept as raw `serde_json::Value`; callers deserialize into
/// their own record types. Bodies that are not JSON decode to `Null`.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ApiResponse {
    /// Whether the status is 2xx.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstraction over the raw request/response exchange.
///
/// `token` is sent verbatim in the `authorization` header. `path` is
/// relative to the transport's base URL (see `endpoints`).
///
/// Uses `Pin<Box<dyn Future>>` return types for dyn-compatibility
/// (`Arc<dyn Transport>`).
pub trait Transport: Send + Sync {
    /// Issue a GET request.
    fn get<'a>(
        &'a self,
        token: &'a str,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send + 'a>>;

    /// Issue a POST request with a JSON body.
    fn post<'a>(
        &'a self,
        token: &'a str,
        path: &'a str,
        body: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send + 'a>>;
}
