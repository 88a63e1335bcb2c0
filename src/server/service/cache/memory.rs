//! In-process cache layer.
//!
//! Used when no Valkey URL is configured and by tests that need to observe which
//! invalidations a run performed.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;

use crate::server::{error::Error, service::cache::CacheLayer};

/// A single operation applied to a [`MemoryCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOperation {
    Set {
        key: String,
        value: String,
        ttl_seconds: i64,
    },
    Del {
        key: String,
    },
}

#[derive(Default)]
struct MemoryCacheState {
    entries: HashMap<String, String>,
    operations: Vec<CacheOperation>,
}

/// Cache layer keeping entries in process memory and recording every operation.
///
/// Entries do not expire; the TTL is only recorded.
#[derive(Default)]
pub struct MemoryCache {
    state: Mutex<MemoryCacheState>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryCacheState>, Error> {
        self.state
            .lock()
            .map_err(|_| Error::CacheUnavailable("memory cache lock poisoned".to_string()))
    }

    /// Current value of `key`, if set.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().ok()?.entries.get(key).cloned()
    }

    /// Every operation applied so far, oldest first.
    pub fn operations(&self) -> Vec<CacheOperation> {
        self.lock()
            .map(|state| state.operations.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CacheLayer for MemoryCache {
    async fn set(&self, key: &str, value: String, ttl_seconds: i64) -> Result<(), Error> {
        let mut state = self.lock()?;
        state.entries.insert(key.to_string(), value.clone());
        state.operations.push(CacheOperation::Set {
            key: key.to_string(),
            value,
            ttl_seconds,
        });

        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), Error> {
        let mut state = self.lock()?;
        state.entries.remove(key);
        state.operations.push(CacheOperation::Del {
            key: key.to_string(),
        });

        Ok(())
    }
}
