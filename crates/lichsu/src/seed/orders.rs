use anyhow::Result;
use chrono::Utc;
use lichsu_entity::entities::prelude::*;
use lichsu_entity::entities::sea_orm_active_enums::PaymentStatus;
use lichsu_entity::entities::{order, order_item, payment, product, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use tracing::debug;

use super::fixtures::OrderFixture;
use super::SectionReport;
use crate::error::ToolError;

/// 解析订单明细：按 slug 找商品，单价取商品当前价格
async fn resolve_items<C: ConnectionTrait>(db: &C, fixture: &OrderFixture) -> Result<Vec<(product::Model, i32)>> {
    let mut items = Vec::with_capacity(fixture.items.len());
    for item in &fixture.items {
        if item.quantity <= 0 {
            return Err(ToolError::InvalidFixture {
                file: "orders.json".to_string(),
                reason: format!("{}: {} 数量必须大于 0", fixture.code, item.product_slug),
            }
            .into());
        }
        let product = Product::find()
            .filter(product::Column::Slug.eq(&item.product_slug))
            .one(db)
            .await?
            .ok_or_else(|| ToolError::RowNotFound {
                table: "products",
                key: item.product_slug.clone(),
            })?;
        items.push((product, item.quantity));
    }
    Ok(items)
}

/// 订单金额 = Σ 单价 × 数量，溢出视为数据错误
pub fn order_total(code: &str, items: &[(product::Model, i32)]) -> Result<i64, ToolError> {
    items.iter().try_fold(0i64, |total, (product, quantity)| {
        product
            .price
            .checked_mul(i64::from(*quantity))
            .and_then(|line| total.checked_add(line))
            .ok_or_else(|| ToolError::InvalidFixture {
                file: "orders.json".to_string(),
                reason: format!("{}: 订单金额溢出", code),
            })
    })
}

pub async fn seed_orders<C: ConnectionTrait>(db: &C, orders: &[OrderFixture]) -> Result<SectionReport> {
    let mut report = SectionReport::default();

    for fixture in orders {
        let exists = Order::find()
            .filter(order::Column::Code.eq(&fixture.code))
            .one(db)
            .await?
            .is_some();
        if exists {
            report.skipped += 1;
            continue;
        }

        let items = resolve_items(db, fixture).await?;
        let total = order_total(&fixture.code, &items)?;

        // 顾客邮箱已注册时关联到用户
        let user_id = User::find()
            .filter(user::Column::Email.eq(&fixture.customer_email))
            .one(db)
            .await?
            .map(|u| u.id);

        let now = Utc::now();
        let order = order::ActiveModel {
            code: Set(fixture.code.clone()),
            user_id: Set(user_id),
            customer_name: Set(fixture.customer_name.clone()),
            customer_email: Set(fixture.customer_email.clone()),
            customer_phone: Set(fixture.customer_phone.clone()),
            shipping_address: Set(fixture.shipping_address.clone()),
            total_amount: Set(total),
            status: Set(fixture.status),
            payment_method: Set(Some(fixture.payment.method)),
            payment_status: Set(fixture.payment.status),
            note: Set(fixture.note.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        for (product, quantity) in &items {
            order_item::ActiveModel {
                order_id: Set(order.id),
                product_id: Set(product.id),
                quantity: Set(*quantity),
                unit_price: Set(product.price),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        let paid_at = (fixture.payment.status == PaymentStatus::Paid).then_some(now);
        payment::ActiveModel {
            order_id: Set(order.id),
            method: Set(fixture.payment.method),
            amount: Set(total),
            status: Set(fixture.payment.status),
            transaction_ref: Set(fixture.payment.transaction_ref.clone()),
            paid_at: Set(paid_at),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        debug!("新增订单 {}，金额 {} VND", fixture.code, total);
        report.inserted += 1;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use lichsu_entity::entities::sea_orm_active_enums::{OrderStatus, PaymentMethod};
    use sea_orm::{ModelTrait, PaginatorTrait};

    use super::*;
    use crate::database::test_db;
    use crate::seed::fixtures::{OrderItemFixture, PaymentFixture, ProductFixture};
    use crate::seed::products::seed_products;

    fn fixture(code: &str, items: &[(&str, i32)], status: PaymentStatus) -> OrderFixture {
        OrderFixture {
            code: code.to_string(),
            customer_name: "Lê Văn Tám".to_string(),
            customer_email: "tam@example.com".to_string(),
            customer_phone: "0987654321".to_string(),
            shipping_address: "1 Tràng Tiền, Hà Nội".to_string(),
            status: OrderStatus::Pending,
            note: None,
            items: items
                .iter()
                .map(|(slug, quantity)| OrderItemFixture {
                    product_slug: slug.to_string(),
                    quantity: *quantity,
                })
                .collect(),
            payment: PaymentFixture {
                method: PaymentMethod::Momo,
                status,
                transaction_ref: None,
            },
        }
    }

    async fn seed_catalog<C: ConnectionTrait>(db: &C) {
        let products = [("Sách Lê Lợi", 100000), ("Nón lá", 50000)].map(|(name, price)| ProductFixture {
            name: name.to_string(),
            description: None,
            price,
            stock: 10,
            category: None,
        });
        seed_products(db, &products).await.unwrap();
    }

    #[tokio::test]
    async fn test_seed_orders_computes_total() {
        let db = test_db().await;
        seed_catalog(&db).await;

        let report = seed_orders(&db, &[fixture("DH1", &[("sach-le-loi", 2), ("non-la", 3)], PaymentStatus::Paid)])
            .await
            .unwrap();
        assert_eq!(report.inserted, 1);

        let stored = Order::find().one(&db).await.unwrap().unwrap();
        assert_eq!(stored.total_amount, 350000);
        assert_eq!(stored.payment_method, Some(PaymentMethod::Momo));
        assert_eq!(stored.user_id, None);

        let items = stored.find_related(OrderItem).all(&db).await.unwrap();
        assert_eq!(items.len(), 2);

        let payment = stored.find_related(Payment).one(&db).await.unwrap().unwrap();
        assert_eq!(payment.amount, 350000);
        assert!(payment.paid_at.is_some());
    }

    #[tokio::test]
    async fn test_seed_orders_skips_existing_code() {
        let db = test_db().await;
        seed_catalog(&db).await;
        let orders = [fixture("DH2", &[("non-la", 1)], PaymentStatus::Pending)];

        seed_orders(&db, &orders).await.unwrap();
        let report = seed_orders(&db, &orders).await.unwrap();
        assert_eq!(report, SectionReport { inserted: 0, skipped: 1 });
        assert_eq!(Payment::find().count(&db).await.unwrap(), 1);

        let payment = Payment::find().one(&db).await.unwrap().unwrap();
        assert_eq!(payment.paid_at, None);
    }

    #[tokio::test]
    async fn test_seed_orders_unknown_product() {
        let db = test_db().await;
        let err = seed_orders(&db, &[fixture("DH3", &[("khong-ton-tai", 1)], PaymentStatus::Pending)])
            .await
            .unwrap_err();
        assert_matches!(
            err.downcast_ref::<ToolError>(),
            Some(ToolError::RowNotFound { table: "products", .. })
        );
    }

    fn priced(price: i64) -> product::Model {
        let now = Utc::now();
        product::Model {
            id: 1,
            name: "Tranh".to_string(),
            slug: "tranh".to_string(),
            description: None,
            price,
            stock: 1,
            category: None,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_order_total() {
        assert_eq!(order_total("DH5", &[(priced(120000), 2), (priced(5000), 3)]).unwrap(), 255000);
        assert_eq!(order_total("DH5", &[]).unwrap(), 0);

        assert_matches!(
            order_total("DH6", &[(priced(i64::MAX / 2), 3)]),
            Err(ToolError::InvalidFixture { .. })
        );
        assert_matches!(
            order_total("DH7", &[(priced(i64::MAX - 1), 1), (priced(2), 1)]),
            Err(ToolError::InvalidFixture { .. })
        );
    }

    #[tokio::test]
    async fn test_seed_orders_rejects_zero_quantity() {
        let db = test_db().await;
        seed_catalog(&db).await;
        let err = seed_orders(&db, &[fixture("DH4", &[("non-la", 0)], PaymentStatus::Pending)])
            .await
            .unwrap_err();
        assert_matches!(err.downcast_ref::<ToolError>(), Some(ToolError::InvalidFixture { .. }));
    }
}
