use premium_ledger::server::model::ledger::{NewPayment, PolicyStatus, PAYMENT_STATUS_PENDING};

use super::*;

/// Expect only active policies with at least one payment to be candidates
#[tokio::test]
async fn counts_policies_with_outstanding_balance() -> Result<(), TestError> {
    let test = setup().await?;
    let active = test.ledger().insert_policy(PolicyFixture::default()).await?;
    let other_status = test
        .ledger()
        .insert_policy(PolicyFixture::default().status(7))
        .await?;
    let canceled = test
        .ledger()
        .insert_policy(PolicyFixture::default().status(PolicyStatus::CANCELED_ID))
        .await?;
    // No payments yet
    test.ledger().insert_policy(PolicyFixture::default()).await?;
    for policy_id in [active.id, other_status.id, canceled.id] {
        test.ledger()
            .insert_payment(policy_id, 1, date(2025, 1, 15), money(110000))
            .await?;
    }

    let store = SeaOrmLedgerStore::new(test.db.clone());

    assert_eq!(store.count_pending_policies().await.unwrap(), 2);

    Ok(())
}

/// Expect each page entry to carry the latest payment of its policy, ordered by policy
#[tokio::test]
async fn pages_latest_payment_per_policy() -> Result<(), TestError> {
    let test = setup().await?;
    let mut policy_ids = Vec::new();
    for _ in 0..3 {
        let policy = test.ledger().insert_policy(PolicyFixture::default()).await?;
        test.ledger()
            .insert_payment(policy.id, 1, date(2025, 1, 15), money(110000))
            .await?;
        test.ledger()
            .insert_payment(policy.id, 2, date(2025, 2, 15), money(100000))
            .await?;
        policy_ids.push(policy.id);
    }

    let store = SeaOrmLedgerStore::new(test.db.clone());
    let first_page = store.page_pending_payments(2, 0).await.unwrap();
    let second_page = store.page_pending_payments(2, 2).await.unwrap();

    assert_eq!(
        first_page.iter().map(|p| p.policy_id).collect::<Vec<_>>(),
        policy_ids[..2].to_vec()
    );
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].policy_id, policy_ids[2]);
    assert!(first_page
        .iter()
        .all(|p| p.number_payment == 2 && p.due_date == date(2025, 2, 15)));
    assert_eq!(first_page[0].pending_value, money(100000));

    Ok(())
}

/// Expect a ledger with renewals and ordered payments, or None for unknown policies
#[tokio::test]
async fn loads_policy_ledger() -> Result<(), TestError> {
    let test = setup().await?;
    let policy = test.ledger().insert_policy(PolicyFixture::default()).await?;
    test.ledger()
        .insert_payment(policy.id, 2, date(2025, 2, 15), money(100000))
        .await?;
    test.ledger()
        .insert_payment(policy.id, 1, date(2025, 1, 15), money(110000))
        .await?;
    test.ledger().insert_renewal(policy.id, 1).await?;

    let store = SeaOrmLedgerStore::new(test.db.clone());
    let ledger = store.load_policy_ledger(policy.id).await.unwrap().unwrap();

    assert_eq!(ledger.policy.status, PolicyStatus::Active);
    assert_eq!(ledger.policy.policy_value, money(120000));
    assert_eq!(ledger.renewals.len(), 1);
    assert_eq!(
        ledger.payments.iter().map(|p| p.number_payment).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(ledger.latest_payment().map(|p| p.number_payment), Some(2));

    assert!(store.load_policy_ledger(policy.id + 100).await.unwrap().is_none());

    Ok(())
}

/// Expect the unique index to reject a second payment on the same due date
#[tokio::test]
async fn rejects_duplicate_due_date() -> Result<(), TestError> {
    let test = setup().await?;
    let policy = test.ledger().insert_policy(PolicyFixture::default()).await?;
    test.ledger()
        .insert_payment(policy.id, 1, date(2025, 1, 15), money(110000))
        .await?;

    let store = SeaOrmLedgerStore::new(test.db.clone());
    let result = store
        .save_payment(NewPayment {
            policy_id: policy.id,
            number_payment: 2,
            value: money(10000),
            pending_value: money(100000),
            due_date: date(2025, 1, 15),
            status_payment_id: PAYMENT_STATUS_PENDING,
        })
        .await;

    assert!(result.is_err());
    assert_eq!(test.ledger().payments_for(policy.id).await?.len(), 1);

    Ok(())
}
