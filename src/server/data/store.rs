//! Persistence seam of the ledger engine.
//!
//! The orchestrator and payment generator only see the [`LedgerStore`] trait, which exposes
//! the four operations a run needs. [`SeaOrmLedgerStore`] implements it over the sea-orm
//! repositories and converts entity models into the domain types of
//! [`crate::server::model::ledger`].

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::ledger::{
        payment::PaymentRepository, policy::PolicyRepository, renewal::PolicyRenewalRepository,
    },
    error::Error,
    model::ledger::{NewPayment, Payment, PendingPayment, PolicyLedger},
};

/// Storage operations used by a ledger run.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Counts policies with an outstanding balance: not canceled or completed, with at least
    /// one payment.
    async fn count_pending_policies(&self) -> Result<u64, Error>;

    /// Returns the latest payment of each candidate policy in the page, ordered by policy id.
    async fn page_pending_payments(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<PendingPayment>, Error>;

    /// Loads a policy with its renewals and payments, `None` if the policy does not exist.
    async fn load_policy_ledger(&self, policy_id: i32) -> Result<Option<PolicyLedger>, Error>;

    /// Inserts a new installment and returns it as persisted.
    async fn save_payment(&self, payment: NewPayment) -> Result<Payment, Error>;
}

/// [`LedgerStore`] backed by a sea-orm database connection.
#[derive(Clone)]
pub struct SeaOrmLedgerStore {
    db: DatabaseConnection,
}

impl SeaOrmLedgerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LedgerStore for SeaOrmLedgerStore {
    async fn count_pending_policies(&self) -> Result<u64, Error> {
        Ok(PolicyRepository::new(&self.db).count_pending().await?)
    }

    async fn page_pending_payments(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<PendingPayment>, Error> {
        let policies = PolicyRepository::new(&self.db)
            .page_pending(limit, offset)
            .await?;
        let policy_ids: Vec<i32> = policies.iter().map(|p| p.id).collect();

        let latest = PaymentRepository::new(&self.db)
            .latest_for_policies(&policy_ids)
            .await?;

        Ok(latest
            .into_iter()
            .map(|model| {
                let payment = Payment::from(model);
                PendingPayment {
                    policy_id: payment.policy_id,
                    number_payment: payment.number_payment,
                    due_date: payment.due_date,
                    pending_value: payment.pending_value,
                }
            })
            .collect())
    }

    async fn load_policy_ledger(&self, policy_id: i32) -> Result<Option<PolicyLedger>, Error> {
        let Some(policy) = PolicyRepository::new(&self.db).get_by_id(policy_id).await? else {
            return Ok(None);
        };

        let renewals = PolicyRenewalRepository::new(&self.db)
            .get_by_policy_id(policy_id)
            .await?;
        let payments = PaymentRepository::new(&self.db)
            .get_by_policy_id(policy_id)
            .await?;

        Ok(Some(PolicyLedger::new(
            policy.into(),
            renewals.into_iter().map(Into::into).collect(),
            payments.into_iter().map(Into::into).collect(),
        )))
    }

    async fn save_payment(&self, payment: NewPayment) -> Result<Payment, Error> {
        let model = PaymentRepository::new(&self.db).create(payment).await?;

        Ok(model.into())
    }
}
