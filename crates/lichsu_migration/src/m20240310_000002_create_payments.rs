use sea_orm_migration::prelude::*;

use crate::m20240310_000001_create_orders::Orders;

#[derive(DeriveMigrationName)]
pub struct Migration;

const IDX_PAYMENTS_ORDER: &str = "idx_payments_order_id";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::OrderId).integer().not_null())
                    .col(ColumnDef::new(Payments::Method).string_len(20).not_null())
                    .col(ColumnDef::new(Payments::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Payments::Status).string_len(20).not_null().default("pending"))
                    .col(ColumnDef::new(Payments::TransactionRef).string().null())
                    .col(ColumnDef::new(Payments::PaidAt).timestamp().null())
                    .col(
                        ColumnDef::new(Payments::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_order")
                            .from(Payments::Table, Payments::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        if !manager.has_index("payments", IDX_PAYMENTS_ORDER).await? {
            manager
                .create_index(
                    Index::create()
                        .name(IDX_PAYMENTS_ORDER)
                        .table(Payments::Table)
                        .col(Payments::OrderId)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Payments {
    Table,
    Id,
    OrderId,
    Method,
    Amount,
    Status,
    TransactionRef,
    PaidAt,
    CreatedAt,
}
