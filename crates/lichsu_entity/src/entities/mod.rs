pub mod prelude;

pub mod order;
pub mod order_item;
pub mod password_reset_token;
pub mod payment;
pub mod post;
pub mod product;
pub mod quiz_category;
pub mod quiz_question;
pub mod sea_orm_active_enums;
pub mod user;
