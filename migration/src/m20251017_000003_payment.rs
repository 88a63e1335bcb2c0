use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251017_000001_policy::Policy;

// Both unique indexes back the ledger's dedup rules: one installment per due date and a
// contiguous, non-repeating installment number per policy.
static IDX_PAYMENT_POLICY_ID_DUE_DATE: &str = "idx-payment-policy_id-due_date";
static IDX_PAYMENT_POLICY_ID_NUMBER: &str = "idx-payment-policy_id-number_payment";
static FK_PAYMENT_POLICY_ID: &str = "fk-payment-policy_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(pk_auto(Payment::Id))
                    .col(integer(Payment::PolicyId))
                    .col(integer(Payment::NumberPayment))
                    .col(decimal_len(Payment::Value, 14, 2))
                    .col(decimal_len(Payment::PendingValue, 14, 2))
                    .col(date(Payment::DueDate))
                    .col(integer(Payment::StatusPaymentId))
                    .col(timestamp(Payment::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PAYMENT_POLICY_ID_DUE_DATE)
                    .table(Payment::Table)
                    .col(Payment::PolicyId)
                    .col(Payment::DueDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PAYMENT_POLICY_ID_NUMBER)
                    .table(Payment::Table)
                    .col(Payment::PolicyId)
                    .col(Payment::NumberPayment)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PAYMENT_POLICY_ID)
                    .from_tbl(Payment::Table)
                    .from_col(Payment::PolicyId)
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
                    .name(FK_PAYMENT_POLICY_ID)
                    .table(Payment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PAYMENT_POLICY_ID_NUMBER)
                    .table(Payment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PAYMENT_POLICY_ID_DUE_DATE)
                    .table(Payment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    Table,
    Id,
    PolicyId,
    NumberPayment,
    Value,
    PendingValue,
    DueDate,
    StatusPaymentId,
    CreatedAt,
}
