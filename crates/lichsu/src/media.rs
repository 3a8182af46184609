//! 把本地图片以 base64 data URI 写进媒体列

use std::path::Path;

use anyhow::{Context, Result};
use base64::Engine;
use chrono::Utc;
use lichsu_entity::entities::prelude::*;
use lichsu_entity::entities::{post, product, quiz_category, user};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use tracing::info;

use crate::config::MediaTarget;
use crate::error::ToolError;

pub fn encode_data_uri(bytes: &[u8], mime: &str) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// 根据扩展名判断 MIME，只接受 image/*
pub fn image_mime(path: &Path) -> Result<String, ToolError> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(ToolError::UnsupportedMedia {
            path: path.display().to_string(),
            mime: mime.essence_str().to_string(),
        });
    }
    Ok(mime.essence_str().to_string())
}

/// 更新目标行的媒体列，返回写入的 data URI 长度
pub async fn attach_image<C: ConnectionTrait>(db: &C, target: MediaTarget, key: &str, path: &Path) -> Result<usize> {
    let mime = image_mime(path)?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("读取图片失败: {}", path.display()))?;
    let data_uri = encode_data_uri(&bytes, &mime);
    let len = data_uri.len();

    let (table, rows_affected) = match target {
        MediaTarget::Users => (
            "users",
            User::update_many()
                .col_expr(user::Column::Avatar, Expr::value(data_uri))
                .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(user::Column::Email.eq(key.trim().to_lowercase()))
                .exec(db)
                .await?
                .rows_affected,
        ),
        MediaTarget::Posts => (
            "posts",
            Post::update_many()
                .col_expr(post::Column::Thumbnail, Expr::value(data_uri))
                .col_expr(post::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(post::Column::Slug.eq(key))
                .exec(db)
                .await?
                .rows_affected,
        ),
        MediaTarget::Products => (
            "products",
            Product::update_many()
                .col_expr(product::Column::Image, Expr::value(data_uri))
                .col_expr(product::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(product::Column::Slug.eq(key))
                .exec(db)
                .await?
                .rows_affected,
        ),
        MediaTarget::QuizCategories => (
            "quiz_categories",
            QuizCategory::update_many()
                .col_expr(quiz_category::Column::Image, Expr::value(data_uri))
                .filter(quiz_category::Column::Slug.eq(key))
                .exec(db)
                .await?
                .rows_affected,
        ),
    };

    if rows_affected == 0 {
        return Err(ToolError::RowNotFound {
            table,
            key: key.to_string(),
        }
        .into());
    }

    info!("已写入 {} {} 的图片（{} 字节 data URI）", table, key, len);
    Ok(len)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use sea_orm::{ActiveModelTrait, Set};

    use super::*;
    use crate::database::test_db;

    #[test]
    fn test_encode_data_uri() {
        assert_eq!(encode_data_uri(b"GIF89a", "image/gif"), "data:image/gif;base64,R0lGODlh");
        assert_eq!(encode_data_uri(b"", "image/png"), "data:image/png;base64,");
    }

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime(Path::new("trong-dong.png")).unwrap(), "image/png");
        assert_eq!(image_mime(Path::new("a/b/anh.JPG")).unwrap(), "image/jpeg");
        assert_matches!(
            image_mime(Path::new("notes.txt")),
            Err(ToolError::UnsupportedMedia { .. })
        );
        assert_matches!(image_mime(Path::new("no-extension")), Err(ToolError::UnsupportedMedia { .. }));
    }

    fn temp_image(name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("lichsu-{}-{}", std::process::id(), name));
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[tokio::test]
    async fn test_attach_image_to_product() {
        let db = test_db().await;
        let now = Utc::now();
        product::ActiveModel {
            name: Set("Tranh Hàng Trống".to_string()),
            slug: Set("tranh-hang-trong".to_string()),
            price: Set(200000),
            stock: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let path = temp_image("hang-trong.png", &[0x89, b'P', b'N', b'G']);
        let len = attach_image(&db, MediaTarget::Products, "tranh-hang-trong", &path).await.unwrap();

        let stored = Product::find().one(&db).await.unwrap().unwrap();
        let image = stored.image.unwrap();
        assert_eq!(image.len(), len);
        assert_eq!(image, "data:image/png;base64,iVBORw==");
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_attach_image_missing_file() {
        let db = test_db().await;
        let path = std::env::temp_dir().join(format!("lichsu-{}-khong-co.png", std::process::id()));
        let err = attach_image(&db, MediaTarget::Posts, "khong-co", &path).await.unwrap_err();
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }

    #[tokio::test]
    async fn test_attach_image_missing_row() {
        let db = test_db().await;
        let path = temp_image("missing.webp", b"RIFF");
        let err = attach_image(&db, MediaTarget::Posts, "khong-co", &path).await.unwrap_err();
        assert_matches!(
            err.downcast_ref::<ToolError>(),
            Some(ToolError::RowNotFound { table: "posts", .. })
        );
        let _ = std::fs::remove_file(path);
    }
}
