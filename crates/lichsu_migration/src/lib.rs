pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_users;
mod m20240301_000002_create_quiz_tables;
mod m20240305_000001_create_posts;
mod m20240305_000002_create_products;
mod m20240310_000001_create_orders;
mod m20240310_000002_create_payments;
mod m20240318_000001_create_password_reset_tokens;
mod m20240322_000001_add_order_payment_fields;
mod m20240325_000001_add_media_columns;
mod m20240402_000001_widen_media_columns;
pub mod schema;

pub use m20240402_000001_widen_media_columns::MEDIA_COLUMNS;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_users::Migration),
            Box::new(m20240301_000002_create_quiz_tables::Migration),
            Box::new(m20240305_000001_create_posts::Migration),
            Box::new(m20240305_000002_create_products::Migration),
            Box::new(m20240310_000001_create_orders::Migration),
            Box::new(m20240310_000002_create_payments::Migration),
            Box::new(m20240318_000001_create_password_reset_tokens::Migration),
            Box::new(m20240322_000001_add_order_payment_fields::Migration),
            Box::new(m20240325_000001_add_media_columns::Migration),
            Box::new(m20240402_000001_widen_media_columns::Migration),
        ]
    }
}
