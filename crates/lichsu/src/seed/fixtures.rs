//! 内嵌在二进制中的示例数据（crates/lichsu/seeds/*.json）

use anyhow::Result;
use lichsu_entity::entities::sea_orm_active_enums::{
    Difficulty, OrderStatus, PaymentMethod, PaymentStatus, PostStatus,
};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ToolError;

#[derive(RustEmbed)]
#[folder = "seeds/"]
struct SeedAssets;

pub fn load<T: DeserializeOwned>(file: &str) -> Result<T> {
    let asset = SeedAssets::get(file).ok_or_else(|| ToolError::MissingFixture(file.to_string()))?;
    let value = serde_json::from_slice(&asset.data).map_err(|e| ToolError::InvalidFixture {
        file: file.to_string(),
        reason: e.to_string(),
    })?;
    Ok(value)
}

#[derive(Debug, Deserialize)]
pub struct QuizCategoryFixture {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuizQuestionFixture>,
}

#[derive(Debug, Deserialize)]
pub struct QuizQuestionFixture {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Deserialize)]
pub struct PostFixture {
    pub title: String,
    /// 缺省时由标题生成
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default = "default_post_status")]
    pub status: PostStatus,
}

fn default_post_status() -> PostStatus {
    PostStatus::Published
}

#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: i64,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    pub code: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub shipping_address: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub note: Option<String>,
    pub items: Vec<OrderItemFixture>,
    pub payment: PaymentFixture,
}

#[derive(Debug, Deserialize)]
pub struct OrderItemFixture {
    pub product_slug: String,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct PaymentFixture {
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    #[serde(default)]
    pub transaction_ref: Option<String>,
}
