use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use once_cell::sync::Lazy;

/// 每个用户的配置目录，默认 SQLite 数据库放在这里
pub static CONFIG_DIR: Lazy<PathBuf> = Lazy::new(|| {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lichsu")
});

pub fn default_database_url() -> String {
    format!("sqlite://{}", CONFIG_DIR.join("data.sqlite").display())
}

#[derive(Parser, Debug)]
#[command(name = "lichsu-db", version, about = "lichsu 站点的数据库迁移与数据初始化工具")]
pub struct Args {
    /// 数据库连接串，支持 sqlite:// 与 mysql://
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn database_url(&self) -> String {
        self.database_url.clone().unwrap_or_else(default_database_url)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 执行或回滚表结构迁移
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// 写入示例数据，已存在的行会跳过
    Seed {
        /// 只执行指定部分，可重复；缺省执行全部
        #[arg(long = "only", value_enum)]
        only: Vec<SeedSection>,
    },
    /// 创建管理员，邮箱已存在时重置密码并提升为管理员
    CreateAdmin(CreateAdminArgs),
    /// 把图片文件以 base64 data URI 写入媒体列
    AttachImage {
        #[arg(value_enum)]
        target: MediaTarget,
        /// slug，目标为 users 时为邮箱
        key: String,
        file: PathBuf,
    },
    /// 删除已使用或已过期的密码重置令牌
    PruneTokens,
}

#[derive(Subcommand, Debug)]
pub enum MigrateCommand {
    Up {
        #[arg(long)]
        steps: Option<u32>,
    },
    Down {
        #[arg(long, default_value_t = 1)]
        steps: u32,
    },
    Status,
    /// 删除所有表后重新执行全部迁移
    Fresh,
}

#[derive(ClapArgs, Debug)]
pub struct CreateAdminArgs {
    #[arg(long, env = "ADMIN_EMAIL")]
    pub email: String,
    #[arg(long, env = "ADMIN_NAME", default_value = "Quản trị viên")]
    pub name: String,
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SeedSection {
    Quiz,
    Posts,
    Products,
    Orders,
}

impl SeedSection {
    pub const ALL: [SeedSection; 4] = [
        SeedSection::Quiz,
        SeedSection::Posts,
        SeedSection::Products,
        SeedSection::Orders,
    ];
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaTarget {
    Users,
    Posts,
    Products,
    QuizCategories,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_sections() {
        let args = Args::try_parse_from(["lichsu-db", "seed", "--only", "posts", "--only", "quiz"]).unwrap();
        match args.command {
            Command::Seed { only } => assert_eq!(only, vec![SeedSection::Posts, SeedSection::Quiz]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_migrate_down_default_steps() {
        let args = Args::try_parse_from(["lichsu-db", "migrate", "down"]).unwrap();
        assert!(matches!(args.command, Command::Migrate(MigrateCommand::Down { steps: 1 })));
    }

    #[test]
    fn test_explicit_database_url() {
        let args = Args::try_parse_from(["lichsu-db", "--database-url", "mysql://root@localhost/lichsu", "prune-tokens"])
            .unwrap();
        assert_eq!(args.database_url(), "mysql://root@localhost/lichsu");
    }

    #[test]
    fn test_attach_image_target() {
        let args = Args::try_parse_from(["lichsu-db", "attach-image", "quiz-categories", "nha-ly", "ly.png"]).unwrap();
        match args.command {
            Command::AttachImage { target, key, file } => {
                assert_eq!(target, MediaTarget::QuizCategories);
                assert_eq!(key, "nha-ly");
                assert_eq!(file, PathBuf::from("ly.png"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
