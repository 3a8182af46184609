mod admin;
mod config;
mod database;
mod error;
mod media;
mod seed;
mod tokens;
mod utils;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::config::{Args, Command};

async fn run_command(db: &DatabaseConnection, command: &Command) -> Result<()> {
    match command {
        Command::Migrate(migrate) => database::run_migrate(db, migrate).await,
        Command::Seed { only } => seed::run(db, only).await.map(|_| ()),
        Command::CreateAdmin(args) => admin::create_admin(db, &args.name, &args.email, &args.password)
            .await
            .map(|_| ()),
        Command::AttachImage { target, key, file } => media::attach_image(db, *target, key, file).await.map(|_| ()),
        Command::PruneTokens => tokens::prune_reset_tokens(db, chrono::Utc::now()).await.map(|_| ()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = utils::init_logger(&args.log_level) {
        eprintln!("初始化日志失败: {:#}", e);
        return ExitCode::FAILURE;
    }

    let database_url = args.database_url();
    let db = match database::connect(&database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = run_command(&db, &args.command).await;

    // 无论成功与否都关闭连接
    if let Err(e) = db.close().await {
        warn!("关闭数据库连接失败: {}", e);
    }

    match result {
        Ok(()) => {
            info!("执行完成");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("执行失败: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
