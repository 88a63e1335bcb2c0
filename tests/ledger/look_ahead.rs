use premium_ledger::server::model::run::RunMode;

use super::*;

/// Inserts a 12 installment policy whose sixth payment already reports a zero balance
async fn insert_paid_out_policy(test: &TestContext) -> Result<i32, TestError> {
    let policy = test.ledger().insert_policy(PolicyFixture::default()).await?;
    for number in 1..=6u32 {
        let pending = if number == 6 {
            money(0)
        } else {
            money(10000 * (12 - i64::from(number)))
        };
        test.ledger()
            .insert_payment(policy.id, number as i32, date(2025, number, 15), pending)
            .await?;
    }

    Ok(policy.id)
}

/// Expect catch-up to wait for a renewal once the base payment reports no balance left
#[tokio::test]
async fn catch_up_waits_on_zero_balance() -> Result<(), TestError> {
    let test = setup().await?;
    let policy_id = insert_paid_out_policy(&test).await?;

    let summary = orchestrator(&test, Arc::new(MemoryCache::new()), date(2025, 8, 1))
        .run_daily()
        .await
        .unwrap();

    assert_eq!(summary.payments_created, 0);
    assert_eq!(summary.skips.awaiting_renewal, 1);
    assert_eq!(test.ledger().payments_for(policy_id).await?.len(), 6);

    Ok(())
}

/// Expect a renewal on file not to release a zero balance in the middle of a cycle
#[tokio::test]
async fn catch_up_waits_on_mid_cycle_zero_balance_despite_renewal() -> Result<(), TestError> {
    let test = setup().await?;
    let policy_id = insert_paid_out_policy(&test).await?;
    test.ledger().insert_renewal(policy_id, 1).await?;

    let summary = orchestrator(&test, Arc::new(MemoryCache::new()), date(2025, 8, 1))
        .run_daily()
        .await
        .unwrap();

    assert_eq!(summary.payments_created, 0);
    assert_eq!(summary.skips.awaiting_renewal, 1);
    assert_eq!(test.ledger().payments_for(policy_id).await?.len(), 6);

    Ok(())
}

/// Expect look-ahead to create exactly one installment one period after the base
#[tokio::test]
async fn look_ahead_overrides_zero_balance() -> Result<(), TestError> {
    let test = setup().await?;
    let policy_id = insert_paid_out_policy(&test).await?;

    let summary = orchestrator(&test, Arc::new(MemoryCache::new()), date(2025, 8, 1))
        .run_manual(true)
        .await
        .unwrap();

    assert_eq!(summary.mode, RunMode::LookAhead);
    assert_eq!(summary.payments_created, 1);
    let payments = test.ledger().payments_for(policy_id).await?;
    assert_eq!(payments.len(), 7);
    assert_eq!(payments[6].number_payment, 7);
    assert_eq!(payments[6].due_date, date(2025, 7, 15));

    Ok(())
}

/// Expect look-ahead to create the next installment even when it is not yet due
#[tokio::test]
async fn look_ahead_creates_future_installment() -> Result<(), TestError> {
    let test = setup().await?;
    let policy = test.ledger().insert_policy(PolicyFixture::default()).await?;
    test.ledger()
        .insert_payment(policy.id, 1, date(2025, 4, 15), money(110000))
        .await?;

    let orchestrator = orchestrator(&test, Arc::new(MemoryCache::new()), date(2025, 4, 15));
    let catch_up = orchestrator.run_manual(false).await.unwrap();
    let look_ahead = orchestrator.run_manual(true).await.unwrap();

    assert_eq!(catch_up.mode, RunMode::CatchUp);
    assert_eq!(catch_up.payments_created, 0);
    assert_eq!(look_ahead.payments_created, 1);

    let payments = test.ledger().payments_for(policy.id).await?;
    assert_eq!(payments[1].due_date, date(2025, 5, 15));
    assert_eq!(payments[1].pending_value.round_dp(2), money(100000));

    Ok(())
}

/// Expect look-ahead to create a single installment even for policies far behind
#[tokio::test]
async fn look_ahead_creates_one_per_policy() -> Result<(), TestError> {
    let test = setup().await?;
    let policy = test.ledger().insert_policy(PolicyFixture::default()).await?;
    test.ledger()
        .insert_payment(policy.id, 1, date(2025, 1, 15), money(110000))
        .await?;

    let summary = orchestrator(&test, Arc::new(MemoryCache::new()), date(2025, 6, 1))
        .run_manual(true)
        .await
        .unwrap();

    assert_eq!(summary.payments_created, 1);
    assert_eq!(test.ledger().payments_for(policy.id).await?.len(), 2);

    Ok(())
}

/// Expect look-ahead to still respect the cycle budget
#[tokio::test]
async fn look_ahead_respects_exhausted_cycle() -> Result<(), TestError> {
    let test = setup().await?;
    let policy = test
        .ledger()
        .insert_policy(PolicyFixture::default().installments(1))
        .await?;
    test.ledger()
        .insert_payment(policy.id, 1, date(2025, 1, 15), money(0))
        .await?;

    let summary = orchestrator(&test, Arc::new(MemoryCache::new()), date(2025, 1, 20))
        .run_manual(true)
        .await
        .unwrap();

    assert_eq!(summary.payments_created, 0);
    assert_eq!(summary.skips.cycle_exhausted, 1);

    Ok(())
}
