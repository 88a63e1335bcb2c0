use premium_ledger::server::service::cache::{
    memory::CacheOperation, CACHE_VERSION_TTL_SECONDS, POLICIES_VERSION_KEY, STALE_AGGREGATE_KEYS,
};

use super::*;

/// Expect a run that created payments to bump the version and clear aggregate keys
#[tokio::test]
async fn invalidates_after_creating_payments() -> Result<(), TestError> {
    let test = setup().await?;
    let policy = test.ledger().insert_policy(PolicyFixture::default()).await?;
    test.ledger()
        .insert_payment(policy.id, 1, date(2025, 3, 15), money(110000))
        .await?;

    let cache = Arc::new(MemoryCache::new());
    let today = date(2025, 4, 15);
    let summary = orchestrator(&test, cache.clone(), today)
        .run_daily()
        .await
        .unwrap();

    assert!(summary.cache_invalidated);

    let version = Utc
        .from_utc_datetime(&today.and_hms_opt(12, 0, 0).unwrap())
        .timestamp_millis()
        .to_string();
    let mut expected = vec![CacheOperation::Set {
        key: POLICIES_VERSION_KEY.to_string(),
        value: version.clone(),
        ttl_seconds: CACHE_VERSION_TTL_SECONDS,
    }];
    expected.extend(STALE_AGGREGATE_KEYS.iter().map(|key| CacheOperation::Del {
        key: key.to_string(),
    }));

    assert_eq!(cache.operations(), expected);
    assert_eq!(cache.get(POLICIES_VERSION_KEY), Some(version));

    Ok(())
}

/// Expect a run with nothing due to leave the cache untouched
#[tokio::test]
async fn skips_invalidation_when_nothing_created() -> Result<(), TestError> {
    let test = setup().await?;
    let policy = test.ledger().insert_policy(PolicyFixture::default()).await?;
    test.ledger()
        .insert_payment(policy.id, 1, date(2025, 3, 15), money(110000))
        .await?;

    let cache = Arc::new(MemoryCache::new());
    let orchestrator = orchestrator(&test, cache.clone(), date(2025, 4, 15));
    orchestrator.run_daily().await.unwrap();
    let operations_after_first = cache.operations().len();

    let second = orchestrator.run_daily().await.unwrap();

    assert_eq!(second.payments_created, 0);
    assert!(!second.cache_invalidated);
    assert_eq!(cache.operations().len(), operations_after_first);

    Ok(())
}
