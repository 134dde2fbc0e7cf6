//! Client facade: wiring and startup validation
//!
//! Owns the pool, the requester, and the name index, and performs the
//! startup validation report: one log line per configured token (always
//! masked), then a fatal configuration error if any token is invalid —
//! the process must not start serving with a dead credential in rotation.

use std::sync::Arc;
use std::time::Duration;

use common::{Error, Result, mask};
use requester::Requester;
use token_pool::TokenPool;
use tracing::{info, warn};
use transport::{HttpTransport, Transport};

use crate::config::Config;
use crate::names::NameIndex;

/// Top-level handle wiring transport, token pool, cache, and name index.
pub struct Client {
    pool: Arc<TokenPool>,
    requester: Requester,
    names: NameIndex,
}

impl Client {
    /// Build a client speaking HTTP(S) to the configured base URL.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&config.api.base_url));
        Self::with_transport(config, transport)
    }

    /// Build a client over an injected transport.
    pub fn with_transport(config: &Config, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;

        let mut names = NameIndex::new();
        let mut pool = TokenPool::new(Arc::clone(&transport));
        for entry in &config.tokens {
            names.push(entry.name.clone());
            pool.add(entry.value.clone());
        }
        let pool = Arc::new(pool);
        let requester = Requester::new(
            transport,
            Arc::clone(&pool),
            Duration::from_millis(config.cache.duration_ms),
        );

        info!(
            tokens = pool.len(),
            cache_duration_ms = config.cache.duration_ms,
            "client configured"
        );

        Ok(Self {
            pool,
            requester,
            names,
        })
    }

    /// The token pool.
    pub fn pool(&self) -> &TokenPool {
        &self.pool
    }

    /// The cached read/send layer.
    pub fn requester(&self) -> &Requester {
        &self.requester
    }

    /// The name index.
    pub fn names(&self) -> &NameIndex {
        &self.names
    }

    /// Token for a configured name.
    pub fn token_by_name(&self, name: &str) -> Option<&str> {
        self.names
            .index_of(name)
            .and_then(|i| self.pool.tokens().get(i))
            .map(String::as_str)
    }

    /// Configured name for a token. O(n) scan of the pool order.
    pub fn name_by_token(&self, token: &str) -> Option<&str> {
        self.pool
            .tokens()
            .iter()
            .position(|t| t.as_str() == token)
            .and_then(|i| self.names.name_at(i))
    }

    /// Validate every configured token and log one line per token.
    ///
    /// Valid tokens log at info with the fetched account details; invalid
    /// ones at warn. If any token is invalid the result is a configuration
    /// error naming the offending token by name and masked value.
    pub async fn validate_startup(&self) -> Result<()> {
        let checks = self.pool.validate_all().await;
        let mut invalid = None;

        for check in &checks {
            let name = self.name_by_token(&check.token).unwrap_or("<unnamed>");
            if check.valid {
                match self.pool.fetch_identity(&check.token).await {
                    Ok(identity) => info!(
                        name,
                        username = %identity.username,
                        email = if identity.email_verified() { "Verified" } else { "Not verified" },
                        phone = if identity.phone_verified() { "Verified" } else { "Not verified" },
                        "{}", check.message
                    ),
                    // The token passed validation moments ago; a failed
                    // detail fetch downgrades the line but not startup.
                    Err(e) => warn!(name, error = %e, "{}", check.message),
                }
            } else {
                warn!(name, "{}", check.message);
                if invalid.is_none() {
                    invalid = Some(format!("{name}: {}", mask(&check.token)));
                }
            }
        }

        match invalid {
            Some(which) => Err(Error::Config(format!("found invalid token [{which}]"))),
            None => Ok(()),
        }
    }
}
