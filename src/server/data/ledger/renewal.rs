use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

pub struct PolicyRenewalRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PolicyRenewalRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_policy_id(
        &self,
        policy_id: i32,
    ) -> Result<Vec<entity::policy_renewal::Model>, DbErr> {
        entity::prelude::PolicyRenewal::find()
            .filter(entity::policy_renewal::Column::PolicyId.eq(policy_id))
            .order_by_asc(entity::policy_renewal::Column::RenewalNumber)
            .all(self.db)
            .await
    }
}
