//! The cache-or-fetch resolver and the message send path
//!
//! One private `resolve` implements the algorithm every cacheable read
//! shares; the public endpoints differ only in namespace and transport
//! call. Resolution performs at most one transport attempt per call:
//! a miss or expired entry falls through to the forced path directly
//! rather than re-entering.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use token_pool::TokenPool;
use tracing::{debug, warn};
use transport::{ApiResponse, Transport, endpoints};

use crate::cache::{CacheTarget, Namespace};
use crate::error::{Error, Result};
use crate::records::{MessageRecord, PremiumType, UserInfo, UserProfile};

/// Options shared by every cacheable read.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Entity key; `None` addresses the credential's own identity.
    pub id: Option<String>,
    /// Bypass cache freshness and always perform the transport call.
    pub force: bool,
    /// Pinned token for the request; `None` draws a random pool token.
    pub token: Option<String>,
}

impl FetchOptions {
    /// Options addressing a specific entity.
    pub fn for_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Bypass the cache for this read.
    pub fn forced(mut self) -> Self {
        self.force = true;
        self
    }

    /// Pin the request to a specific token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Cached reader and message sender over the upstream API.
pub struct Requester {
    transport: Arc<dyn Transport>,
    pool: Arc<TokenPool>,
    cache_ttl: Duration,
    user_info: Namespace<UserInfo>,
    user_profile: Namespace<UserProfile>,
}

impl Requester {
    /// Create a requester with the given TTL shared by all namespaces.
    ///
    /// The TTL's floor is enforced at configuration time, not here.
    pub fn new(transport: Arc<dyn Transport>, pool: Arc<TokenPool>, cache_ttl: Duration) -> Self {
        Self {
            transport,
            pool,
            cache_ttl,
            user_info: Namespace::new(),
            user_profile: Namespace::new(),
        }
    }

    /// The process-wide cache TTL.
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    /// The pool this requester draws default tokens from.
    pub fn pool(&self) -> &TokenPool {
        &self.pool
    }

    /// Retrieve a user record, serving from cache when fresh.
    pub async fn user_info(&self, opts: FetchOptions) -> Result<Option<UserInfo>> {
        let transport = Arc::clone(&self.transport);
        self.resolve(&self.user_info, opts, "user_info", |token, id| async move {
            match transport.get(&token, &endpoints::user(&id)).await {
                Ok(response) => decode(response, "user_info"),
                Err(e) => {
                    warn!(error = %e, "user info fetch failed");
                    None
                }
            }
        })
        .await
    }

    /// Retrieve a user profile record, serving from cache when fresh.
    pub async fn user_profile(&self, opts: FetchOptions) -> Result<Option<UserProfile>> {
        let transport = Arc::clone(&self.transport);
        self.resolve(
            &self.user_profile,
            opts,
            "user_profile",
            |token, id| async move {
                match transport.get(&token, &endpoints::user_profile(&id)).await {
                    Ok(response) => decode(response, "user_profile"),
                    Err(e) => {
                        warn!(error = %e, "user profile fetch failed");
                        None
                    }
                }
            },
        )
        .await
    }

    /// The premium tier from a user's profile.
    ///
    /// Resolved through the `user_profile` namespace, so it shares that
    /// cache with `user_profile` and `bio`.
    pub async fn premium_type(&self, opts: FetchOptions) -> Result<Option<PremiumType>> {
        Ok(self.user_profile(opts).await?.map(|p| p.premium()))
    }

    /// The bio text from a user's profile.
    pub async fn bio(&self, opts: FetchOptions) -> Result<Option<String>> {
        Ok(self
            .user_profile(opts)
            .await?
            .and_then(|p| p.bio().map(str::to_string)))
    }

    /// Send a message to a channel. Never cached, never deduplicated.
    ///
    /// Arguments are validated before any transport call: the channel id
    /// must be non-empty and the payload a JSON object. A non-2xx response
    /// yields `Ok(None)`; transport failure is an error since the caller
    /// must distinguish it from "nothing sent back".
    pub async fn send_message(
        &self,
        channel_id: &str,
        payload: serde_json::Value,
        token: Option<&str>,
    ) -> Result<Option<MessageRecord>> {
        if channel_id.trim().is_empty() {
            return Err(Error::InvalidArgument("no channel id provided".into()));
        }
        if !payload.is_object() {
            return Err(Error::InvalidArgument(
                "message payload must be a JSON object".into(),
            ));
        }

        let token = match token {
            Some(t) => t.to_string(),
            None => self.pool.random_token()?.to_string(),
        };

        let response = self
            .transport
            .post(&token, &endpoints::channel_messages(channel_id), payload)
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        if !response.ok() {
            metrics::counter!("requester_upstream_errors_total", "namespace" => "send_message")
                .increment(1);
            warn!(status = response.status, channel_id, "message send rejected");
            return Ok(None);
        }

        match serde_json::from_value(response.body) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(error = %e, "failed to decode message response");
                Ok(None)
            }
        }
    }

    /// Empty one namespace's cache, or all of them.
    pub async fn clear_cache(&self, target: CacheTarget) -> &Self {
        match target {
            CacheTarget::All => {
                self.user_info.clear().await;
                self.user_profile.clear().await;
            }
            CacheTarget::UserInfo => self.user_info.clear().await,
            CacheTarget::UserProfile => self.user_profile.clear().await,
        }
        debug!(?target, "cache cleared");
        self
    }

    /// The shared cache-or-fetch algorithm.
    ///
    /// Unless forced, a fresh entry short-circuits without suspending.
    /// Otherwise exactly one transport attempt is made: success replaces
    /// the entry wholesale; failure returns `None` and leaves any prior
    /// entry (fresh or stale) untouched.
    async fn resolve<T, F, Fut>(
        &self,
        namespace: &Namespace<T>,
        opts: FetchOptions,
        label: &'static str,
        fetch: F,
    ) -> Result<Option<T>>
    where
        T: Clone,
        F: FnOnce(String, String) -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        let key = opts.id.unwrap_or_else(|| endpoints::SELF_KEY.to_string());

        if !opts.force {
            if let Some(data) = namespace.fresh(&key, self.cache_ttl).await {
                metrics::counter!("requester_cache_hits_total", "namespace" => label).increment(1);
                return Ok(Some(data));
            }
            metrics::counter!("requester_cache_misses_total", "namespace" => label).increment(1);
        }

        let token = match opts.token {
            Some(t) => t,
            None => self.pool.random_token()?.to_string(),
        };

        match fetch(token, key.clone()).await {
            Some(data) => {
                namespace.store(&key, data.clone()).await;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }
}

/// Decode a response body, treating non-2xx and malformed payloads as
/// "no data" for the read paths.
fn decode<T: DeserializeOwned>(response: ApiResponse, label: &'static str) -> Option<T> {
    if !response.ok() {
        metrics::counter!("requester_upstream_errors_total", "namespace" => label).increment(1);
        warn!(status = response.status, namespace = label, "upstream returned non-success");
        return None;
    }
    match serde_json::from_value(response.body) {
        Ok(data) => Some(data),
        Err(e) => {
            warn!(namespace = label, error = %e, "failed to decode upstream payload");
            None
        }
    }
}
