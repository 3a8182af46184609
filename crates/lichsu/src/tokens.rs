use anyhow::Result;
use chrono::{DateTime, Utc};
use lichsu_entity::entities::password_reset_token;
use lichsu_entity::entities::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, Condition, EntityTrait, QueryFilter};
use tracing::info;

/// 删除已用过或在 `now` 之前过期的密码重置令牌，返回删除条数
pub async fn prune_reset_tokens<C: ConnectionTrait>(db: &C, now: DateTime<Utc>) -> Result<u64> {
    let result = PasswordResetToken::delete_many()
        .filter(
            Condition::any()
                .add(password_reset_token::Column::Used.eq(true))
                .add(password_reset_token::Column::ExpiresAt.lt(now)),
        )
        .exec(db)
        .await?;
    info!("已清理 {} 个密码重置令牌", result.rows_affected);
    Ok(result.rows_affected)
}
