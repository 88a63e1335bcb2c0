use sea_orm_migration::{prelude::*, schema::*};

static IDX_POLICY_STATUS_ID: &str = "idx-policy-status_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Policy::Table)
                    .if_not_exists()
                    .col(pk_auto(Policy::Id))
                    .col(string_uniq(Policy::PolicyNumber))
                    .col(decimal_len(Policy::PolicyValue, 14, 2))
                    .col(integer(Policy::NumberOfPayments))
                    .col(integer(Policy::PaymentFrequencyId))
                    .col(date(Policy::StartDate))
                    .col(integer(Policy::StatusId))
                    .col(timestamp(Policy::CreatedAt))
                    .col(timestamp(Policy::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_POLICY_STATUS_ID)
                    .table(Policy::Table)
                    .col(Policy::StatusId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_POLICY_STATUS_ID)
                    .table(Policy::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Policy::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Policy {
    Table,
    Id,
    PolicyNumber,
    PolicyValue,
    NumberOfPayments,
    PaymentFrequencyId,
    StartDate,
    StatusId,
    CreatedAt,
    UpdatedAt,
}
