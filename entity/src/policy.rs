use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "policy")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub policy_number: String,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub policy_value: Decimal,
    pub number_of_payments: i32,
    pub payment_frequency_id: i32,
    pub start_date: Date,
    pub status_id: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
    #[sea_orm(has_many = "super::policy_renewal::Entity")]
    PolicyRenewal,
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl Related<super::policy_renewal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PolicyRenewal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
