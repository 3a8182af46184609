use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use lichsu_migration::{Migrator, MigratorTrait};
use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, SqlxSqliteConnector};
use tracing::{debug, info};

use crate::config::{MigrateCommand, CONFIG_DIR};

/// SQLite 连接选项；文件库开启 WAL，内存库保持默认
fn create_sqlite_options(url: &str) -> Result<SqliteConnectOptions> {
    let options = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("无法解析 SQLite 连接串: {}", url))?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(30));

    if url.contains(":memory:") {
        return Ok(options);
    }

    Ok(options
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal))
}

/// 每次调用只开一个连接，用完由调用方关闭
pub async fn connect(url: &str) -> Result<DatabaseConnection> {
    if url.starts_with("sqlite:") {
        // 默认库位于配置目录，先保证目录存在
        if url.contains(&*CONFIG_DIR.to_string_lossy()) && !CONFIG_DIR.exists() {
            std::fs::create_dir_all(&*CONFIG_DIR).context("创建配置目录失败")?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(create_sqlite_options(url)?)
            .await
            .context("连接 SQLite 数据库失败")?;
        debug!("已打开 SQLite 单连接");
        return Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool));
    }

    let mut options = ConnectOptions::new(url.to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(30))
        .sqlx_logging(false);
    let connection = Database::connect(options).await.context("连接数据库失败")?;
    debug!("已打开数据库单连接");
    Ok(connection)
}

pub async fn run_migrate(db: &DatabaseConnection, command: &MigrateCommand) -> Result<()> {
    match command {
        MigrateCommand::Up { steps } => {
            let pending = Migrator::get_pending_migrations(db).await?;
            if pending.is_empty() {
                info!("没有待执行的迁移");
                return Ok(());
            }
            info!("待执行迁移 {} 个", pending.len());
            Migrator::up(db, *steps).await?;
            info!("迁移完成");
        }
        MigrateCommand::Down { steps } => {
            Migrator::down(db, Some(*steps)).await?;
            info!("已回滚 {} 个迁移", steps);
        }
        MigrateCommand::Status => {
            for migration in Migrator::get_applied_migrations(db).await? {
                info!("已执行  {}", migration.name());
            }
            for migration in Migrator::get_pending_migrations(db).await? {
                info!("待执行  {}", migration.name());
            }
        }
        MigrateCommand::Fresh => {
            Migrator::fresh(db).await?;
            info!("已重建全部表");
        }
    }
    Ok(())
}

/// 测试用：已执行全部迁移的内存库
#[cfg(test)]
pub async fn test_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrate_up_twice() {
        let db = connect("sqlite::memory:").await.unwrap();
        run_migrate(&db, &MigrateCommand::Up { steps: None }).await.unwrap();
        run_migrate(&db, &MigrateCommand::Up { steps: None }).await.unwrap();
        assert!(Migrator::get_pending_migrations(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_migrate_down_then_up() {
        let db = test_db().await;
        run_migrate(&db, &MigrateCommand::Down { steps: 2 }).await.unwrap();
        assert_eq!(Migrator::get_pending_migrations(&db).await.unwrap().len(), 2);

        run_migrate(&db, &MigrateCommand::Status).await.unwrap();
        run_migrate(&db, &MigrateCommand::Up { steps: Some(1) }).await.unwrap();
        assert_eq!(Migrator::get_pending_migrations(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_file_database_is_created() {
        let dir = std::env::temp_dir().join(format!("lichsu-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("data.sqlite");
        let url = format!("sqlite://{}", path.display());

        let db = connect(&url).await.unwrap();
        run_migrate(&db, &MigrateCommand::Up { steps: None }).await.unwrap();
        db.close().await.unwrap();

        assert!(path.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
