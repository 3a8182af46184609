use sea_orm_migration::prelude::*;

use crate::m20240301_000001_create_users::Users;
use crate::m20240305_000001_create_posts::Posts;
use crate::schema::{add_column_if_missing, drop_column_if_present};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户头像
        add_column_if_missing(manager, "users", ColumnDef::new(Users::Avatar).string().null()).await?;

        // 文章封面
        add_column_if_missing(manager, "posts", ColumnDef::new(Posts::Thumbnail).string().null()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_column_if_present(manager, "users", "avatar").await?;
        drop_column_if_present(manager, "posts", "thumbnail").await?;
        Ok(())
    }
}
