use anyhow::Result;
use chrono::Utc;
use lichsu_entity::entities::prelude::*;
use lichsu_entity::entities::sea_orm_active_enums::Role;
use lichsu_entity::entities::user;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use tracing::info;

use crate::error::ToolError;
use crate::utils::password::{hash_password, validate_password, verify_password};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOutcome {
    Created,
    Updated,
}

/// 只做最基本的格式检查：恰好一个 `@`，两侧非空
pub fn validate_email(email: &str) -> Result<(), ToolError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ToolError::InvalidEmail(email.to_string()))
    }
}

/// 按邮箱 upsert 管理员账号
pub async fn create_admin<C: ConnectionTrait>(db: &C, name: &str, email: &str, password: &str) -> Result<AdminOutcome> {
    let email = email.trim().to_lowercase();
    validate_email(&email)?;
    validate_password(password)?;
    let now = Utc::now();

    let existing = User::find()
        .filter(user::Column::Email.eq(&email))
        .one(db)
        .await?;

    if let Some(existing) = existing {
        // 密码未变时保留原哈希
        let password_hash = if verify_password(password, &existing.password_hash) {
            existing.password_hash.clone()
        } else {
            hash_password(password)?
        };
        let mut active_model: user::ActiveModel = existing.into();
        active_model.name = Set(name.to_string());
        active_model.password_hash = Set(password_hash);
        active_model.role = Set(Role::Admin);
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
        info!("管理员 {} 已存在，已重置密码", email);
        return Ok(AdminOutcome::Updated);
    }

    user::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.clone()),
        password_hash: Set(hash_password(password)?),
        role: Set(Role::Admin),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;
    info!("已创建管理员 {}", email);
    Ok(AdminOutcome::Created)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use sea_orm::PaginatorTrait;

    use super::*;
    use crate::database::test_db;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("admin@lichsu.vn").is_ok());
        assert!(validate_email("a.b+c@mail.example.com").is_ok());
        assert!(validate_email("admin").is_err());
        assert!(validate_email("@lichsu.vn").is_err());
        assert!(validate_email("admin@").is_err());
        assert!(validate_email("admin@localhost").is_ok());
        assert!(validate_email("a@b@c.vn").is_err());
        assert!(validate_email("ad min@lichsu.vn").is_err());
    }

    #[tokio::test]
    async fn test_create_then_update_admin() {
        let db = test_db().await;

        let outcome = create_admin(&db, "Quản trị", "Admin@LichSu.vn", "matkhau-cu-123").await.unwrap();
        assert_eq!(outcome, AdminOutcome::Created);

        let outcome = create_admin(&db, "Quản trị viên", "admin@lichsu.vn", "matkhau-moi-456").await.unwrap();
        assert_eq!(outcome, AdminOutcome::Updated);

        assert_eq!(User::find().count(&db).await.unwrap(), 1);
        let stored = User::find().one(&db).await.unwrap().unwrap();
        assert_eq!(stored.email, "admin@lichsu.vn");
        assert_eq!(stored.name, "Quản trị viên");
        assert_eq!(stored.role, Role::Admin);
        assert!(verify_password("matkhau-moi-456", &stored.password_hash));
        assert!(!verify_password("matkhau-cu-123", &stored.password_hash));
    }

    #[tokio::test]
    async fn test_same_password_keeps_hash() {
        let db = test_db().await;
        create_admin(&db, "Quản trị", "admin@lichsu.vn", "khong-doi-123").await.unwrap();
        let before = User::find().one(&db).await.unwrap().unwrap().password_hash;

        create_admin(&db, "Quản trị", "admin@lichsu.vn", "khong-doi-123").await.unwrap();
        let after = User::find().one(&db).await.unwrap().unwrap().password_hash;
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_promotes_existing_user() {
        let db = test_db().await;
        let now = Utc::now();
        user::ActiveModel {
            name: Set("Độc giả".to_string()),
            email: Set("docgia@lichsu.vn".to_string()),
            password_hash: Set("x".to_string()),
            role: Set(Role::User),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        create_admin(&db, "Độc giả", "docgia@lichsu.vn", "12345678").await.unwrap();
        let stored = User::find().one(&db).await.unwrap().unwrap();
        assert_eq!(stored.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_single_label_domain() {
        let db = test_db().await;
        let outcome = create_admin(&db, "x", "admin@localhost", "12345678").await.unwrap();
        assert_eq!(outcome, AdminOutcome::Created);
        let stored = User::find().one(&db).await.unwrap().unwrap();
        assert_eq!(stored.email, "admin@localhost");
    }

    #[tokio::test]
    async fn test_rejects_bad_input() {
        let db = test_db().await;
        let err = create_admin(&db, "x", "not-an-email", "12345678").await.unwrap_err();
        assert_matches!(err.downcast_ref::<ToolError>(), Some(ToolError::InvalidEmail(_)));

        let err = create_admin(&db, "x", "x@lichsu.vn", "short").await.unwrap_err();
        assert_matches!(err.downcast_ref::<ToolError>(), Some(ToolError::PasswordTooShort(8)));
        assert_eq!(User::find().count(&db).await.unwrap(), 0);
    }
}
