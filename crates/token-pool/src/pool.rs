//! Token storage, selection, and validation
//!
//! The pool owns the token strings; callers only ever see borrowed views.
//! Selection is uniformly random (no affinity between entity and token),
//! and validation fans out one identity fetch per token with no throttling.

use std::sync::Arc;

use common::mask;
use futures_util::future::join_all;
use rand::RngExt;
use tracing::debug;
use transport::{Transport, endpoints};

use crate::error::{Error, Result};
use crate::identity::IdentityRecord;

/// Outcome of validating a single token.
///
/// `message` is display-ready and embeds the masked token, never the raw
/// value; the raw token rides alongside for callers that need to correlate
/// (name lookup, identity re-fetch).
#[derive(Debug, Clone)]
pub struct TokenCheck {
    pub valid: bool,
    pub token: String,
    pub message: String,
}

/// Ordered pool of bearer tokens.
///
/// Effectively read-only after startup configuration: `add` is the only
/// mutation and the owner stops calling it before serving requests, so
/// shared access needs no synchronization beyond `Arc` publication.
pub struct TokenPool {
    tokens: Vec<String>,
    transport: Arc<dyn Transport>,
}

impl TokenPool {
    /// Create an empty pool using the given transport for identity fetches.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            tokens: Vec::new(),
            transport,
        }
    }

    /// Append a token to the pool. No dedup check; insertion order is the
    /// pool's index space. Returns `&mut Self` for chained configuration.
    pub fn add(&mut self, token: impl Into<String>) -> &mut Self {
        self.tokens.push(token.into());
        self
    }

    /// Read-only view of the stored tokens in insertion order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of stored tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the pool holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Select a uniformly random token.
    ///
    /// An empty pool is a precondition violation (configuration rejects
    /// zero tokens) and returns `Error::EmptyPool` rather than panicking.
    pub fn random_token(&self) -> Result<&str> {
        if self.tokens.is_empty() {
            return Err(Error::EmptyPool);
        }
        let idx = rand::rng().random_range(0..self.tokens.len());
        Ok(&self.tokens[idx])
    }

    /// Fetch the identity record behind a token.
    ///
    /// Exactly one GET against the identity endpoint. Any non-2xx response
    /// or transport failure surfaces as `Error::Upstream`; the decoded
    /// payload is returned verbatim otherwise.
    pub async fn fetch_identity(&self, token: &str) -> Result<IdentityRecord> {
        let response = self
            .transport
            .get(token, &endpoints::identity())
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        if !response.ok() {
            return Err(Error::Upstream(format!(
                "identity endpoint returned {}",
                response.status
            )));
        }

        serde_json::from_value(response.body)
            .map_err(|e| Error::Upstream(format!("invalid identity payload: {e}")))
    }

    /// Whether a token authenticates successfully.
    ///
    /// Cannot fail: any `fetch_identity` error means `false`.
    pub async fn is_valid(&self, token: &str) -> bool {
        match self.fetch_identity(token).await {
            Ok(_) => true,
            Err(e) => {
                debug!(token = %mask(token), error = %e, "token failed validation");
                false
            }
        }
    }

    /// Validate every stored token concurrently.
    ///
    /// Fans out one identity fetch per token (maximum concurrency = pool
    /// size, no throttling), waits for all to complete, and returns one
    /// check per token in pool insertion order regardless of completion
    /// order.
    pub async fn validate_all(&self) -> Vec<TokenCheck> {
        let checks = self.tokens.iter().map(|token| async move {
            let valid = self.is_valid(token).await;
            TokenCheck {
                valid,
                token: token.clone(),
                message: format!(
                    "Token [{}] is {}",
                    mask(token),
                    if valid { "valid" } else { "invalid" }
                ),
            }
        });
        join_all(checks).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use transport::ApiResponse;

    /// Transport that accepts every token except those listed, answering
    /// identity fetches with a synthetic record.
    struct ScriptedTransport {
        rejected: HashSet<String>,
        calls: AtomicUsize,
    }

    impl ScriptedTransport {
        fn new(rejected: &[&str]) -> Self {
            Self {
                rejected: rejected.iter().map(|s| s.to_string()).collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Transport for ScriptedTransport {
        fn get<'a>(
            &'a self,
            token: &'a str,
            _path: &'a str,
        ) -> Pin<Box<dyn Future<Output = transport::Result<ApiResponse>> + Send + 'a>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let response = if self.rejected.contains(token) {
                ApiResponse {
                    status: 401,
                    body: serde_json::json!({"message": "401: Unauthorized"}),
                }
            } else {
                ApiResponse {
                    status: 200,
                    body: serde_json::json!({
                        "id": "1",
                        "username": format!("user-{token}"),
                        "email": "user@example.com",
                        "phone": null
                    }),
                }
            };
            Box::pin(async move { Ok(response) })
        }

        fn post<'a>(
            &'a self,
            _token: &'a str,
            _path: &'a str,
            _body: serde_json::Value,
        ) -> Pin<Box<dyn Future<Output = transport::Result<ApiResponse>> + Send + 'a>> {
            unreachable!("pool never posts");
        }
    }

    /// Transport whose requests never reach the network.
    struct DownTransport;

    impl Transport for DownTransport {
        fn get<'a>(
            &'a self,
            _token: &'a str,
            _path: &'a str,
        ) -> Pin<Box<dyn Future<Output = transport::Result<ApiResponse>> + Send + 'a>> {
            Box::pin(async { Err(transport::Error::Http("connection refused".into())) })
        }

        fn post<'a>(
            &'a self,
            _token: &'a str,
            _path: &'a str,
            _body: serde_json::Value,
        ) -> Pin<Box<dyn Future<Output = transport::Result<ApiResponse>> + Send + 'a>> {
            Box::pin(async { Err(transport::Error::Http("connection refused".into())) })
        }
    }

    fn pool_with(transport: Arc<dyn Transport>, tokens: &[&str]) -> TokenPool {
        let mut pool = TokenPool::new(transport);
        for token in tokens {
            pool.add(*token);
        }
        pool
    }

    #[test]
    fn add_preserves_insertion_order_and_chains() {
        let mut pool = TokenPool::new(Arc::new(ScriptedTransport::new(&[])));
        pool.add("first").add("second").add("third");
        assert_eq!(pool.tokens(), ["first", "second", "third"]);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn add_does_not_dedup() {
        let mut pool = TokenPool::new(Arc::new(ScriptedTransport::new(&[])));
        pool.add("same").add("same");
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn random_token_on_empty_pool_is_an_error() {
        let pool = TokenPool::new(Arc::new(ScriptedTransport::new(&[])));
        assert!(matches!(pool.random_token(), Err(Error::EmptyPool)));
    }

    #[test]
    fn random_token_single_entry_always_returns_it() {
        let pool = pool_with(Arc::new(ScriptedTransport::new(&[])), &["only"]);
        for _ in 0..10 {
            assert_eq!(pool.random_token().unwrap(), "only");
        }
    }

    #[test]
    fn random_token_always_a_member() {
        let pool = pool_with(Arc::new(ScriptedTransport::new(&[])), &["a", "b", "c"]);
        for _ in 0..100 {
            let token = pool.random_token().unwrap();
            assert!(pool.tokens().iter().any(|t| t.as_str() == token));
        }
    }

    #[tokio::test]
    async fn fetch_identity_decodes_the_payload() {
        let pool = pool_with(Arc::new(ScriptedTransport::new(&[])), &["tok"]);
        let identity = pool.fetch_identity("tok").await.unwrap();
        assert_eq!(identity.username, "user-tok");
        assert!(identity.email_verified());
        assert!(!identity.phone_verified());
    }

    #[tokio::test]
    async fn fetch_identity_non_2xx_is_upstream_error() {
        let pool = pool_with(Arc::new(ScriptedTransport::new(&["bad"])), &["bad"]);
        let err = pool.fetch_identity("bad").await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
        assert!(err.to_string().contains("401"), "got: {err}");
    }

    #[tokio::test]
    async fn is_valid_swallows_upstream_failures() {
        let pool = pool_with(Arc::new(ScriptedTransport::new(&["bad"])), &["bad", "ok"]);
        assert!(!pool.is_valid("bad").await);
        assert!(pool.is_valid("ok").await);
    }

    #[tokio::test]
    async fn is_valid_swallows_transport_failures() {
        let pool = pool_with(Arc::new(DownTransport), &["tok"]);
        assert!(!pool.is_valid("tok").await);
    }

    #[tokio::test]
    async fn validate_all_reports_in_pool_order() {
        let transport = Arc::new(ScriptedTransport::new(&["token-bbbbbb"]));
        let pool = pool_with(
            transport.clone(),
            &["token-aaaaaa", "token-bbbbbb", "token-cccccc"],
        );

        let checks = pool.validate_all().await;
        assert_eq!(checks.len(), 3);
        assert_eq!(checks[0].token, "token-aaaaaa");
        assert_eq!(checks[1].token, "token-bbbbbb");
        assert_eq!(checks[2].token, "token-cccccc");
        assert!(checks[0].valid);
        assert!(!checks[1].valid);
        assert!(checks[2].valid);
        // One identity fetch per token, no retries
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn validate_all_messages_embed_masked_tokens_only() {
        let pool = pool_with(Arc::new(ScriptedTransport::new(&[])), &["abcdefghij"]);
        let checks = pool.validate_all().await;
        assert_eq!(checks[0].message, "Token [a*******j] is valid");
        assert!(!checks[0].message.contains("abcdefghij"));
    }

    #[tokio::test]
    async fn validate_all_on_empty_pool_is_empty() {
        let pool = TokenPool::new(Arc::new(ScriptedTransport::new(&[])));
        assert!(pool.validate_all().await.is_empty());
    }
}
