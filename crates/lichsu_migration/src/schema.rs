//! 迁移共用的表结构探测工具

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{DatabaseBackend, Statement};

/// 读取列的声明类型（小写），列或表不存在时返回 `None`
pub async fn column_type(manager: &SchemaManager<'_>, table: &str, column: &str) -> Result<Option<String>, DbErr> {
    let db = manager.get_connection();
    let backend = db.get_database_backend();

    let stmt = match backend {
        DatabaseBackend::Sqlite => Statement::from_string(
            backend,
            format!(
                "SELECT type FROM pragma_table_info('{}') WHERE name = '{}'",
                table.replace('\'', "''"),
                column.replace('\'', "''")
            ),
        ),
        DatabaseBackend::MySql => Statement::from_sql_and_values(
            backend,
            "SELECT DATA_TYPE FROM information_schema.COLUMNS \
             WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? AND COLUMN_NAME = ?",
            vec![table.into(), column.into()],
        ),
        DatabaseBackend::Postgres => Statement::from_sql_and_values(
            backend,
            "SELECT data_type FROM information_schema.columns \
             WHERE table_schema = current_schema() AND table_name = $1 AND column_name = $2",
            vec![table.into(), column.into()],
        ),
    };

    let ty = db
        .query_one(stmt)
        .await?
        .map(|row| row.try_get_by_index::<String>(0))
        .transpose()?;
    Ok(ty.map(|ty| ty.to_lowercase()))
}

/// 列不存在时添加；返回是否真的执行了 ALTER
pub async fn add_column_if_missing(manager: &SchemaManager<'_>, table: &str, column: &mut ColumnDef) -> Result<bool, DbErr> {
    let column_name = column.get_column_name();
    if manager.has_column(table, &column_name).await? {
        return Ok(false);
    }

    manager
        .alter_table(Table::alter().table(Alias::new(table)).add_column(column).to_owned())
        .await?;
    Ok(true)
}

/// 列存在时删除；返回是否真的执行了 ALTER
pub async fn drop_column_if_present(manager: &SchemaManager<'_>, table: &str, column: &str) -> Result<bool, DbErr> {
    if !manager.has_column(table, column).await? {
        return Ok(false);
    }

    manager
        .alter_table(Table::alter().table(Alias::new(table)).drop_column(Alias::new(column)).to_owned())
        .await?;
    Ok(true)
}
