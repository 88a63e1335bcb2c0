use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    error::Error,
    service::cache::{memory::MemoryCache, redis::RedisCache, CacheLayer},
};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect to Valkey/Redis for cache invalidation, or fall back to an in-process cache
pub async fn connect_to_cache(config: &Config) -> Result<Arc<dyn CacheLayer>, Error> {
    use fred::prelude::*;

    let Some(valkey_url) = &config.valkey_url else {
        tracing::info!("VALKEY_URL not set, cache invalidations stay in-process");
        return Ok(Arc::new(MemoryCache::new()));
    };

    let redis_config = fred::prelude::Config::from_url(valkey_url)?;
    let pool = Pool::new(redis_config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    Ok(Arc::new(RedisCache::new(pool)))
}
