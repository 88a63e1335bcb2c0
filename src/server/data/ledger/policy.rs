use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, Select,
};

use crate::server::model::ledger::PolicyStatus;

pub struct PolicyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PolicyRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Policies that are neither canceled nor completed and have at least one payment
    fn pending_query() -> Select<entity::policy::Entity> {
        let with_payments = entity::prelude::Payment::find()
            .select_only()
            .column(entity::payment::Column::PolicyId)
            .into_query();

        entity::prelude::Policy::find()
            .filter(
                entity::policy::Column::StatusId
                    .is_not_in([PolicyStatus::CANCELED_ID, PolicyStatus::COMPLETED_ID]),
            )
            .filter(entity::policy::Column::Id.in_subquery(with_payments))
    }

    pub async fn count_pending(&self) -> Result<u64, DbErr> {
        Self::pending_query().count(self.db).await
    }

    pub async fn page_pending(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<entity::policy::Model>, DbErr> {
        Self::pending_query()
            .order_by_asc(entity::policy::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.db)
            .await
    }

    pub async fn get_by_id(&self, policy_id: i32) -> Result<Option<entity::policy::Model>, DbErr> {
        entity::prelude::Policy::find_by_id(policy_id)
            .one(self.db)
            .await
    }
}
