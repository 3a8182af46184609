use sea_orm_migration::prelude::*;

use crate::m20240301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

const IDX_POSTS_STATUS: &str = "idx_posts_status_created_at";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Posts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Posts::Title).string().not_null())
                    .col(ColumnDef::new(Posts::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Posts::Excerpt).text().null())
                    .col(ColumnDef::new(Posts::Content).text().not_null())
                    .col(ColumnDef::new(Posts::AuthorId).integer().null())
                    .col(ColumnDef::new(Posts::Status).string_len(20).not_null().default("draft"))
                    .col(ColumnDef::new(Posts::Views).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Posts::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_author")
                            .from(Posts::Table, Posts::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 列表页按状态 + 时间倒序查询
        if !manager.has_index("posts", IDX_POSTS_STATUS).await? {
            manager
                .create_index(
                    Index::create()
                        .name(IDX_POSTS_STATUS)
                        .table(Posts::Table)
                        .col(Posts::Status)
                        .col(Posts::CreatedAt)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Posts {
    Table,
    Id,
    Title,
    Slug,
    Excerpt,
    Content,
    Thumbnail,
    AuthorId,
    Status,
    Views,
    CreatedAt,
    UpdatedAt,
}
