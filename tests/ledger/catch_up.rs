use super::*;

/// Expect one payment per missed period, each with a smaller remaining balance
#[tokio::test]
async fn creates_every_overdue_installment() -> Result<(), TestError> {
    let test = setup().await?;
    let policy = test.ledger().insert_policy(PolicyFixture::default()).await?;
    test.ledger()
        .insert_payment(policy.id, 1, date(2025, 1, 15), money(110000))
        .await?;

    let cache = Arc::new(MemoryCache::new());
    let summary = orchestrator(&test, cache, date(2025, 4, 15))
        .run_daily()
        .await
        .unwrap();

    assert_eq!(summary.candidates, 1);
    assert_eq!(summary.policies_processed, 1);
    assert_eq!(summary.payments_created, 3);
    assert_eq!(summary.policies_skipped, 0);
    assert_eq!(summary.policies_failed, 0);

    let payments = test.ledger().payments_for(policy.id).await?;
    let created: Vec<_> = payments
        .iter()
        .skip(1)
        .map(|p| (p.number_payment, p.due_date, p.pending_value.round_dp(2)))
        .collect();
    assert_eq!(
        created,
        vec![
            (2, date(2025, 2, 15), money(100000)),
            (3, date(2025, 3, 15), money(90000)),
            (4, date(2025, 4, 15), money(80000)),
        ]
    );
    assert!(payments
        .iter()
        .all(|p| p.value.round_dp(2) == money(10000) && p.status_payment_id == 1));

    Ok(())
}

/// Expect a second run on the same day to create nothing
#[tokio::test]
async fn second_run_is_idempotent() -> Result<(), TestError> {
    let test = setup().await?;
    let policy = test.ledger().insert_policy(PolicyFixture::default()).await?;
    test.ledger()
        .insert_payment(policy.id, 1, date(2025, 1, 15), money(110000))
        .await?;

    let orchestrator = orchestrator(&test, Arc::new(MemoryCache::new()), date(2025, 4, 15));
    let first = orchestrator.run_daily().await.unwrap();
    let second = orchestrator.run_daily().await.unwrap();

    assert_eq!(first.payments_created, 3);
    assert_eq!(second.payments_created, 0);
    assert_eq!(second.policies_processed, 1);
    assert_eq!(test.ledger().payments_for(policy.id).await?.len(), 4);

    Ok(())
}

/// Expect installment numbers to stay contiguous with strictly increasing due dates
#[tokio::test]
async fn keeps_numbers_contiguous_and_dates_increasing() -> Result<(), TestError> {
    let test = setup().await?;
    let policy = test
        .ledger()
        .insert_policy(PolicyFixture::default().starting(date(2024, 1, 31)))
        .await?;
    test.ledger()
        .insert_payment(policy.id, 1, date(2024, 1, 31), money(110000))
        .await?;

    orchestrator(&test, Arc::new(MemoryCache::new()), date(2024, 6, 30))
        .run_daily()
        .await
        .unwrap();

    let payments = test.ledger().payments_for(policy.id).await?;
    for (index, payment) in payments.iter().enumerate() {
        assert_eq!(payment.number_payment, index as i32 + 1);
    }
    for pair in payments.windows(2) {
        assert!(pair[1].due_date > pair[0].due_date);
    }
    // End-of-month clamping carries forward from February
    assert_eq!(payments[1].due_date, date(2024, 2, 29));
    assert_eq!(payments.last().map(|p| p.due_date), Some(date(2024, 6, 29)));

    Ok(())
}

/// Expect quarterly policies to advance three months per installment
#[tokio::test]
async fn follows_policy_frequency() -> Result<(), TestError> {
    let test = setup().await?;
    let policy = test
        .ledger()
        .insert_policy(PolicyFixture::default().frequency(2).installments(4))
        .await?;
    test.ledger()
        .insert_payment(policy.id, 1, date(2025, 1, 15), money(90000))
        .await?;

    let summary = orchestrator(&test, Arc::new(MemoryCache::new()), date(2025, 9, 1))
        .run_daily()
        .await
        .unwrap();

    assert_eq!(summary.payments_created, 2);
    let payments = test.ledger().payments_for(policy.id).await?;
    assert_eq!(payments[1].due_date, date(2025, 4, 15));
    assert_eq!(payments[2].due_date, date(2025, 7, 15));
    assert_eq!(payments[2].value.round_dp(2), money(30000));
    assert_eq!(payments[2].pending_value.round_dp(2), money(30000));

    Ok(())
}

/// Expect at most 100 payments per policy in a single run
#[tokio::test]
async fn stops_at_iteration_ceiling() -> Result<(), TestError> {
    let test = setup().await?;
    let policy = test
        .ledger()
        .insert_policy(PolicyFixture::default().installments(1000))
        .await?;
    test.ledger()
        .insert_payment(policy.id, 1, date(2000, 1, 15), money(119880))
        .await?;

    let orchestrator = orchestrator(&test, Arc::new(MemoryCache::new()), date(2025, 4, 15));
    let first = orchestrator.run_daily().await.unwrap();
    let second = orchestrator.run_daily().await.unwrap();

    assert_eq!(first.payments_created, 100);
    assert_eq!(first.policies_processed, 1);
    assert_eq!(second.payments_created, 100);
    assert_eq!(test.ledger().payments_for(policy.id).await?.len(), 201);

    Ok(())
}

/// Expect every candidate to be processed when they span several batches
#[tokio::test]
async fn processes_candidates_across_batches() -> Result<(), TestError> {
    let test = setup().await?;
    for _ in 0..25 {
        let policy = test.ledger().insert_policy(PolicyFixture::default()).await?;
        test.ledger()
            .insert_payment(policy.id, 1, date(2025, 3, 15), money(110000))
            .await?;
    }

    let summary = orchestrator(&test, Arc::new(MemoryCache::new()), date(2025, 4, 15))
        .run_daily()
        .await
        .unwrap();

    // 25 candidates on a basic host are processed in batches of 10
    assert_eq!(summary.candidates, 25);
    assert_eq!(summary.batches, 3);
    assert_eq!(summary.policies_processed, 25);
    assert_eq!(summary.payments_created, 25);

    Ok(())
}

/// Expect a run over an empty ledger to plan no batches
#[tokio::test]
async fn handles_empty_ledger() -> Result<(), TestError> {
    let test = setup().await?;

    let summary = orchestrator(&test, Arc::new(MemoryCache::new()), date(2025, 4, 15))
        .run_daily()
        .await
        .unwrap();

    assert_eq!(summary.candidates, 0);
    assert_eq!(summary.batches, 0);
    assert_eq!(summary.payments_created, 0);
    assert!(!summary.cache_invalidated);

    Ok(())
}
