//! Cache entry and namespace plumbing
//!
//! A `Namespace` is one logical cache partition: entity key → timestamped
//! entry. Each namespace owns its lock, so independent read endpoints
//! never contend on a shared map. Entries are immutable once written; a
//! store replaces the prior entry wholesale.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Which cache partitions a clear operation empties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheTarget {
    #[default]
    All,
    UserInfo,
    UserProfile,
}

/// A cached record stamped with its fetch time.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub cached_at: Instant,
}

impl<T> CacheEntry<T> {
    /// Expired once the entry's age reaches the TTL. The boundary instant
    /// itself counts as expired.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() >= ttl
    }
}

/// One cache partition keyed by entity identifier.
pub struct Namespace<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> Namespace<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The cached value for `key` if present and within the TTL.
    pub async fn fresh(&self, key: &str, ttl: Duration) -> Option<T> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired(ttl))
            .map(|entry| entry.data.clone())
    }

    /// Replace the entry for `key`, stamped with the current instant.
    pub async fn store(&self, key: &str, data: T) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                data,
                cached_at: Instant::now(),
            },
        );
    }

    /// Drop every entry in this namespace.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of entries currently held (fresh or expired).
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the namespace holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<T: Clone> Default for Namespace<T> {
    fn default() -> Self {
        Self::new()
    }
}
