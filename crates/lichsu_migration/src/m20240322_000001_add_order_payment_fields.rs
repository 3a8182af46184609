use sea_orm_migration::prelude::*;

use crate::m20240310_000001_create_orders::Orders;
use crate::schema::{add_column_if_missing, drop_column_if_present};

/// 订单补充支付方式、支付状态与备注
///
/// 线上库有一部分已经手工加过这些列，逐列判断后再 ALTER。
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        add_column_if_missing(
            manager,
            "orders",
            ColumnDef::new(Orders::PaymentMethod).string_len(20).null(),
        )
        .await?;

        add_column_if_missing(
            manager,
            "orders",
            ColumnDef::new(Orders::PaymentStatus)
                .string_len(20)
                .not_null()
                .default("pending"),
        )
        .await?;

        add_column_if_missing(manager, "orders", ColumnDef::new(Orders::Note).text().null()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_column_if_present(manager, "orders", "payment_method").await?;
        drop_column_if_present(manager, "orders", "payment_status").await?;
        drop_column_if_present(manager, "orders", "note").await?;
        Ok(())
    }
}
