use anyhow::Result;
use chrono::Utc;
use lichsu_entity::entities::prelude::*;
use lichsu_entity::entities::product;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use tracing::debug;

use super::fixtures::ProductFixture;
use super::SectionReport;
use crate::error::ToolError;
use crate::utils::slug::require_slug;

pub async fn seed_products<C: ConnectionTrait>(db: &C, products: &[ProductFixture]) -> Result<SectionReport> {
    let mut report = SectionReport::default();

    for fixture in products {
        if fixture.price <= 0 || fixture.stock < 0 {
            return Err(ToolError::InvalidFixture {
                file: "products.json".to_string(),
                reason: format!("{}: 价格或库存不合法", fixture.name),
            }
            .into());
        }

        let slug = require_slug(&fixture.name)?;
        let exists = Product::find()
            .filter(product::Column::Slug.eq(&slug))
            .one(db)
            .await?
            .is_some();
        if exists {
            report.skipped += 1;
            continue;
        }

        let now = Utc::now();
        product::ActiveModel {
            name: Set(fixture.name.clone()),
            slug: Set(slug.clone()),
            description: Set(fixture.description.clone()),
            price: Set(fixture.price),
            stock: Set(fixture.stock),
            category: Set(fixture.category.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
        debug!("新增商品 {}", slug);
        report.inserted += 1;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::database::test_db;

    fn fixture(name: &str, price: i64) -> ProductFixture {
        ProductFixture {
            name: name.to_string(),
            description: None,
            price,
            stock: 5,
            category: Some("Sách".to_string()),
        }
    }

    #[tokio::test]
    async fn test_seed_products() {
        let db = test_db().await;
        let fixtures = [fixture("Lịch sử Việt Nam bằng tranh", 35000), fixture("Bản đồ Đại Nam", 90000)];

        assert_eq!(
            seed_products(&db, &fixtures).await.unwrap(),
            SectionReport { inserted: 2, skipped: 0 }
        );
        assert_eq!(
            seed_products(&db, &fixtures).await.unwrap(),
            SectionReport { inserted: 0, skipped: 2 }
        );

        let stored = Product::find()
            .filter(product::Column::Slug.eq("ban-do-dai-nam"))
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.price, 90000);
        assert_eq!(stored.image, None);
    }

    #[tokio::test]
    async fn test_seed_products_rejects_zero_price() {
        let db = test_db().await;
        let err = seed_products(&db, &[fixture("Quà tặng", 0)]).await.unwrap_err();
        assert_matches!(err.downcast_ref::<ToolError>(), Some(ToolError::InvalidFixture { .. }));
    }
}
