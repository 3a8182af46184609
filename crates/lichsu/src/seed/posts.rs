use anyhow::Result;
use chrono::Utc;
use lichsu_entity::entities::prelude::*;
use lichsu_entity::entities::sea_orm_active_enums::Role;
use lichsu_entity::entities::{post, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;

use super::fixtures::PostFixture;
use super::SectionReport;
use crate::utils::slug::require_slug;

/// 最早创建的管理员作为示例文章作者
async fn default_author<C: ConnectionTrait>(db: &C) -> Result<Option<i32>> {
    let admin = User::find()
        .filter(user::Column::Role.eq(Role::Admin))
        .order_by_asc(user::Column::Id)
        .one(db)
        .await?;
    Ok(admin.map(|u| u.id))
}

pub async fn seed_posts<C: ConnectionTrait>(db: &C, posts: &[PostFixture]) -> Result<SectionReport> {
    let mut report = SectionReport::default();
    let author_id = default_author(db).await?;

    for fixture in posts {
        let slug = match &fixture.slug {
            Some(slug) => require_slug(slug)?,
            None => require_slug(&fixture.title)?,
        };

        let exists = Post::find()
            .filter(post::Column::Slug.eq(&slug))
            .one(db)
            .await?
            .is_some();
        if exists {
            report.skipped += 1;
            continue;
        }

        let now = Utc::now();
        post::ActiveModel {
            title: Set(fixture.title.clone()),
            slug: Set(slug.clone()),
            excerpt: Set(fixture.excerpt.clone()),
            content: Set(fixture.content.clone()),
            author_id: Set(author_id),
            status: Set(fixture.status),
            views: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
        debug!("新增文章 {}", slug);
        report.inserted += 1;
    }

    Ok(report)
}
