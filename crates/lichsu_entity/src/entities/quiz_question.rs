use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::Difficulty;

/// 单选题，`options` 为 JSON 字符串数组，`correct_index` 指向其中的正确答案
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "quiz_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category_id: i32,
    #[sea_orm(column_type = "Text")]
    pub question: String,
    #[sea_orm(column_type = "Text")]
    pub options: String,
    pub correct_index: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub explanation: Option<String>,
    pub difficulty: Difficulty,
    #[sea_orm(column_type = "Text", nullable)]
    pub image: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quiz_category::Entity",
        from = "Column::CategoryId",
        to = "super::quiz_category::Column::Id",
        on_delete = "Cascade"
    )]
    QuizCategory,
}

impl Related<super::quiz_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuizCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
