use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251017_000001_policy::Policy;

static IDX_POLICY_RENEWAL_POLICY_ID_NUMBER: &str = "idx-policy_renewal-policy_id-renewal_number";
static FK_POLICY_RENEWAL_POLICY_ID: &str = "fk-policy_renewal-policy_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PolicyRenewal::Table)
                    .if_not_exists()
                    .col(pk_auto(PolicyRenewal::Id))
                    .col(integer(PolicyRenewal::PolicyId))
                    .col(integer(PolicyRenewal::RenewalNumber))
                    .col(timestamp(PolicyRenewal::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_POLICY_RENEWAL_POLICY_ID_NUMBER)
                    .table(PolicyRenewal::Table)
                    .col(PolicyRenewal::PolicyId)
                    .col(PolicyRenewal::RenewalNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_POLICY_RENEWAL_POLICY_ID)
                    .from_tbl(PolicyRenewal::Table)
                    .from_col(PolicyRenewal::PolicyId)
                    .to_tbl(Policy::Table)
                    .to_col(Policy::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_POLICY_RENEWAL_POLICY_ID)
                    .table(PolicyRenewal::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_POLICY_RENEWAL_POLICY_ID_NUMBER)
                    .table(PolicyRenewal::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PolicyRenewal::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PolicyRenewal {
    Table,
    Id,
    PolicyId,
    RenewalNumber,
    CreatedAt,
}
