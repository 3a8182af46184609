use sea_orm_migration::prelude::*;

use crate::m20240301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

const IDX_TOKENS_EXPIRES: &str = "idx_password_reset_tokens_expires_at";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PasswordResetTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PasswordResetTokens::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PasswordResetTokens::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(PasswordResetTokens::Token)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PasswordResetTokens::ExpiresAt).timestamp().not_null())
                    .col(
                        ColumnDef::new(PasswordResetTokens::Used)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PasswordResetTokens::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_password_reset_tokens_user")
                            .from(PasswordResetTokens::Table, PasswordResetTokens::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 清理过期令牌时按过期时间扫描
        if !manager
            .has_index("password_reset_tokens", IDX_TOKENS_EXPIRES)
            .await?
        {
            manager
                .create_index(
                    Index::create()
                        .name(IDX_TOKENS_EXPIRES)
                        .table(PasswordResetTokens::Table)
                        .col(PasswordResetTokens::ExpiresAt)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PasswordResetTokens::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PasswordResetTokens {
    Table,
    Id,
    UserId,
    Token,
    ExpiresAt,
    Used,
    CreatedAt,
}
