//! Policy ledger fixture utilities.
//!
//! Inserts policies, renewals and payments directly through sea-orm so tests can lay out any
//! ledger state, including states the engine itself would never produce.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::error::TestError;

/// Shorthand for a calendar date in fixtures.
///
/// # Panics
/// Panics if the date does not exist.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// Policy attributes for [`LedgerFixtures::insert_policy`].
///
/// Defaults to an active monthly policy worth 1200.00 paid in 12 installments.
#[derive(Debug, Clone)]
pub struct PolicyFixture {
    pub policy_number: String,
    pub policy_value: Decimal,
    pub number_of_payments: i32,
    pub payment_frequency_id: i32,
    pub start_date: NaiveDate,
    pub status_id: i32,
}

impl Default for PolicyFixture {
    fn default() -> Self {
        Self {
            policy_number: String::new(),
            policy_value: Decimal::new(120000, 2),
            number_of_payments: 12,
            payment_frequency_id: 1,
            start_date: date(2025, 1, 15),
            status_id: 1,
        }
    }
}

impl PolicyFixture {
    pub fn status(mut self, status_id: i32) -> Self {
        self.status_id = status_id;
        self
    }

    pub fn frequency(mut self, payment_frequency_id: i32) -> Self {
        self.payment_frequency_id = payment_frequency_id;
        self
    }

    pub fn installments(mut self, number_of_payments: i32) -> Self {
        self.number_of_payments = number_of_payments;
        self
    }

    pub fn value(mut self, policy_value: Decimal) -> Self {
        self.policy_value = policy_value;
        self
    }

    pub fn starting(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }
}

/// Fixture helpers bound to a test database.
pub struct LedgerFixtures<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LedgerFixtures<'a> {
    pub(crate) fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a policy; an empty policy number is replaced by a unique generated one.
    pub async fn insert_policy(
        &self,
        fixture: PolicyFixture,
    ) -> Result<entity::policy::Model, TestError> {
        let now = Utc::now().naive_utc();
        let policy_number = if fixture.policy_number.is_empty() {
            let existing = entity::prelude::Policy::find().all(self.db).await?.len();
            format!("POL-{:05}", existing + 1)
        } else {
            fixture.policy_number
        };

        Ok(
            entity::prelude::Policy::insert(entity::policy::ActiveModel {
                policy_number: ActiveValue::Set(policy_number),
                policy_value: ActiveValue::Set(fixture.policy_value),
                number_of_payments: ActiveValue::Set(fixture.number_of_payments),
                payment_frequency_id: ActiveValue::Set(fixture.payment_frequency_id),
                start_date: ActiveValue::Set(fixture.start_date),
                status_id: ActiveValue::Set(fixture.status_id),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(self.db)
            .await?,
        )
    }

    /// Insert a pending payment of 100.00 with the given number, due date and pending value.
    pub async fn insert_payment(
        &self,
        policy_id: i32,
        number_payment: i32,
        due_date: NaiveDate,
        pending_value: Decimal,
    ) -> Result<entity::payment::Model, TestError> {
        Ok(
            entity::prelude::Payment::insert(entity::payment::ActiveModel {
                policy_id: ActiveValue::Set(policy_id),
                number_payment: ActiveValue::Set(number_payment),
                value: ActiveValue::Set(Decimal::new(10000, 2)),
                pending_value: ActiveValue::Set(pending_value),
                due_date: ActiveValue::Set(due_date),
                status_payment_id: ActiveValue::Set(1),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(self.db)
            .await?,
        )
    }

    /// Insert a renewal of the policy.
    pub async fn insert_renewal(
        &self,
        policy_id: i32,
        renewal_number: i32,
    ) -> Result<entity::policy_renewal::Model, TestError> {
        Ok(
            entity::prelude::PolicyRenewal::insert(entity::policy_renewal::ActiveModel {
                policy_id: ActiveValue::Set(policy_id),
                renewal_number: ActiveValue::Set(renewal_number),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(self.db)
            .await?,
        )
    }

    /// Every payment of the policy ordered by installment number.
    pub async fn payments_for(
        &self,
        policy_id: i32,
    ) -> Result<Vec<entity::payment::Model>, TestError> {
        Ok(entity::prelude::Payment::find()
            .filter(entity::payment::Column::PolicyId.eq(policy_id))
            .order_by_asc(entity::payment::Column::NumberPayment)
            .all(self.db)
            .await?)
    }
}
