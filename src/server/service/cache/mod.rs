//! Cache invalidation for policy and payment views.
//!
//! Consumers of the shared cache hold aggregate views of policies and payments. After a run
//! creates installments those views are stale, so the [`CacheInvalidationPublisher`] bumps a
//! version key and removes the aggregate keys. Invalidation is best effort: a cache outage
//! must never undo or fail a run whose payments are already persisted.

pub mod memory;
pub mod redis;

use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::error::Error;

/// Version key consumers compare to detect stale policy views.
pub const POLICIES_VERSION_KEY: &str = "premium_ledger:policies:version";

/// Time to live of the version key (30 days).
pub const CACHE_VERSION_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Aggregate keys removed whenever installments are created.
pub const STALE_AGGREGATE_KEYS: [&str; 5] = [
    "premium_ledger:policies:all",
    "premium_ledger:policies:status:active",
    "premium_ledger:policies:status:canceled",
    "premium_ledger:policies:status:completed",
    "premium_ledger:payments:all",
];

/// Minimal key/value operations the publisher needs from a cache.
#[async_trait]
pub trait CacheLayer: Send + Sync {
    /// Stores `value` under `key`, expiring after `ttl_seconds`.
    async fn set(&self, key: &str, value: String, ttl_seconds: i64) -> Result<(), Error>;

    /// Removes `key`.
    async fn del(&self, key: &str) -> Result<(), Error>;
}

/// Outcome of an invalidation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidationReport {
    /// Version written to [`POLICIES_VERSION_KEY`], `None` if the write failed.
    pub version: Option<i64>,
    pub keys_cleared: usize,
    /// Operations that failed and were skipped.
    pub failures: usize,
}

/// Signals the shared cache that policy and payment views are stale.
#[derive(Clone)]
pub struct CacheInvalidationPublisher {
    cache: Arc<dyn CacheLayer>,
    last_version: Arc<AtomicI64>,
}

impl CacheInvalidationPublisher {
    pub fn new(cache: Arc<dyn CacheLayer>) -> Self {
        Self {
            cache,
            last_version: Arc::new(AtomicI64::new(0)),
        }
    }

    /// Next version token: `now` in milliseconds, or one past the previous token when the clock
    /// has not moved forward since the last publication.
    fn next_version(&self, now: DateTime<Utc>) -> i64 {
        let now_millis = now.timestamp_millis();
        let previous = self
            .last_version
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now_millis.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);

        now_millis.max(previous.saturating_add(1))
    }

    /// Writes a new policies version and deletes every stale aggregate key.
    ///
    /// The version is the publication instant in milliseconds since the Unix epoch, raised to
    /// one past the previous version of this publisher if the clock stalled or went back. Each
    /// operation is attempted independently; failures are logged and counted but never
    /// returned to the caller.
    ///
    /// Versions only increase within one publisher. Separate processes rely on their clocks
    /// agreeing.
    ///
    /// # Arguments
    /// - `now` - Publication instant, the basis of the new version
    ///
    /// # Returns
    /// An [`InvalidationReport`] describing what was applied.
    pub async fn publish(&self, now: DateTime<Utc>) -> InvalidationReport {
        let version = self.next_version(now);
        let mut report = InvalidationReport {
            version: None,
            keys_cleared: 0,
            failures: 0,
        };

        match self
            .cache
            .set(
                POLICIES_VERSION_KEY,
                version.to_string(),
                CACHE_VERSION_TTL_SECONDS,
            )
            .await
        {
            Ok(()) => report.version = Some(version),
            Err(e) => {
                report.failures += 1;
                tracing::warn!("Failed to bump policies cache version: {}", e);
            }
        }

        for key in STALE_AGGREGATE_KEYS {
            match self.cache.del(key).await {
                Ok(()) => report.keys_cleared += 1,
                Err(e) => {
                    report.failures += 1;
                    tracing::warn!("Failed to clear cache key {}: {}", key, e);
                }
            }
        }

        tracing::debug!(
            "Published policies cache version {:?}, cleared {} key(s)",
            report.version,
            report.keys_cleared
        );

        report
    }
}
