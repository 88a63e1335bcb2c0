//! Valkey/Redis backed cache layer.

use async_trait::async_trait;
use fred::{prelude::*, types::Expiration};

use crate::server::{error::Error, service::cache::CacheLayer};

/// Cache layer writing to the shared Valkey/Redis instance through a `fred` pool.
#[derive(Clone)]
pub struct RedisCache {
    pool: Pool,
}

impl RedisCache {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CacheLayer for RedisCache {
    async fn set(&self, key: &str, value: String, ttl_seconds: i64) -> Result<(), Error> {
        self.pool
            .set::<(), _, _>(key, value, Some(Expiration::EX(ttl_seconds)), None, false)
            .await?;

        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), Error> {
        self.pool.del::<i64, _>(key).await?;

        Ok(())
    }
}
