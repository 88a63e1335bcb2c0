use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::ledger::NewPayment;

pub struct PaymentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PaymentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, payment: NewPayment) -> Result<entity::payment::Model, DbErr> {
        let payment = entity::payment::ActiveModel {
            policy_id: ActiveValue::Set(payment.policy_id),
            number_payment: ActiveValue::Set(payment.number_payment),
            value: ActiveValue::Set(payment.value),
            pending_value: ActiveValue::Set(payment.pending_value),
            due_date: ActiveValue::Set(payment.due_date),
            status_payment_id: ActiveValue::Set(payment.status_payment_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        payment.insert(self.db).await
    }

    pub async fn get_by_policy_id(
        &self,
        policy_id: i32,
    ) -> Result<Vec<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::PolicyId.eq(policy_id))
            .order_by_asc(entity::payment::Column::NumberPayment)
            .all(self.db)
            .await
    }

    /// Returns the highest-numbered payment of each of the given policies, ordered by policy id
    ///
    /// Only one row per policy is read: the latest installment numbers are resolved with a
    /// grouped `MAX(number_payment)` query first. Policies without payments are absent from the
    /// result.
    pub async fn latest_for_policies(
        &self,
        policy_ids: &[i32],
    ) -> Result<Vec<entity::payment::Model>, DbErr> {
        if policy_ids.is_empty() {
            return Ok(Vec::new());
        }

        let latest_numbers = entity::prelude::Payment::find()
            .select_only()
            .column(entity::payment::Column::PolicyId)
            .column_as(entity::payment::Column::NumberPayment.max(), "number_payment")
            .filter(entity::payment::Column::PolicyId.is_in(policy_ids.iter().copied()))
            .group_by(entity::payment::Column::PolicyId)
            .into_tuple::<(i32, i32)>()
            .all(self.db)
            .await?;

        if latest_numbers.is_empty() {
            return Ok(Vec::new());
        }

        let latest = latest_numbers
            .into_iter()
            .fold(Condition::any(), |condition, (policy_id, number_payment)| {
                condition.add(
                    Condition::all()
                        .add(entity::payment::Column::PolicyId.eq(policy_id))
                        .add(entity::payment::Column::NumberPayment.eq(number_payment)),
                )
            });

        entity::prelude::Payment::find()
            .filter(latest)
            .order_by_asc(entity::payment::Column::PolicyId)
            .all(self.db)
            .await
    }
}
