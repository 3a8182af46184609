//! 把媒体列改成可以存放 base64 data URI 的大文本类型
//!
//! 图片改为直接以 `data:image/...;base64,` 写入库中，原来的 VARCHAR(255) 放不下。
//! - MySQL：MODIFY 为 LONGTEXT
//! - Postgres：改为 TEXT
//! - SQLite：TEXT 亲和性本身不限长度，无需处理

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

use crate::schema::column_type;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (表, 列)
pub const MEDIA_COLUMNS: [(&str, &str); 5] = [
    ("users", "avatar"),
    ("posts", "thumbnail"),
    ("products", "image"),
    ("quiz_categories", "image"),
    ("quiz_questions", "image"),
];

/// 生成把单个媒体列放宽的 ALTER 语句；已经是目标类型或 SQLite 时返回 `None`
pub(crate) fn widen_statement(
    backend: DatabaseBackend,
    table: &str,
    column: &str,
    current: &str,
) -> Option<TableAlterStatement> {
    let mut def = ColumnDef::new(Alias::new(column));
    match backend {
        DatabaseBackend::MySql => {
            if current == "longtext" {
                return None;
            }
            def.custom(Alias::new("LONGTEXT")).null();
        }
        DatabaseBackend::Postgres => {
            if current == "text" {
                return None;
            }
            def.text().null();
        }
        DatabaseBackend::Sqlite => return None,
    }

    Some(
        Table::alter()
            .table(Alias::new(table))
            .modify_column(&mut def)
            .to_owned(),
    )
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        if backend == DatabaseBackend::Sqlite {
            return Ok(());
        }

        for (table, column) in MEDIA_COLUMNS {
            let Some(current) = column_type(manager, table, column).await? else {
                // 列不存在时跳过，交给前面的迁移补齐
                continue;
            };
            if let Some(stmt) = widen_statement(backend, table, column, &current) {
                manager.alter_table(stmt).await?;
            }
        }

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // 已写入的 base64 数据无法截回 VARCHAR(255)，不做回滚
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen_statement_mysql() {
        let stmt = widen_statement(DatabaseBackend::MySql, "posts", "thumbnail", "varchar").unwrap();
        let sql = stmt.to_string(MysqlQueryBuilder);
        assert!(sql.contains("MODIFY COLUMN `thumbnail` LONGTEXT NULL"), "{}", sql);
        assert!(sql.starts_with("ALTER TABLE `posts`"), "{}", sql);
    }

    #[test]
    fn test_widen_statement_postgres() {
        let stmt = widen_statement(DatabaseBackend::Postgres, "products", "image", "character varying").unwrap();
        let sql = stmt.to_string(PostgresQueryBuilder);
        assert!(sql.contains(r#"ALTER COLUMN "image" TYPE text"#), "{}", sql);
    }

    #[test]
    fn test_widen_statement_skips_wide_columns() {
        assert!(widen_statement(DatabaseBackend::MySql, "users", "avatar", "longtext").is_none());
        assert!(widen_statement(DatabaseBackend::Postgres, "users", "avatar", "text").is_none());
        assert!(widen_statement(DatabaseBackend::Sqlite, "users", "avatar", "varchar").is_none());
        // MySQL 上的 TEXT 只有 64KB，仍然要放宽
        assert!(widen_statement(DatabaseBackend::MySql, "users", "avatar", "text").is_some());
    }
}
