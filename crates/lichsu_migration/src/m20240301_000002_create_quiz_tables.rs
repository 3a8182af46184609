use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const IDX_QUESTION_CATEGORY: &str = "idx_quiz_questions_category_id";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 题目分类
        manager
            .create_table(
                Table::create()
                    .table(QuizCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuizCategories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuizCategories::Name).string().not_null())
                    .col(ColumnDef::new(QuizCategories::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(QuizCategories::Description).text().null())
                    .col(ColumnDef::new(QuizCategories::Image).string().null())
                    .col(
                        ColumnDef::new(QuizCategories::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 题目，options 以 JSON 数组保存
        manager
            .create_table(
                Table::create()
                    .table(QuizQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuizQuestions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuizQuestions::CategoryId).integer().not_null())
                    .col(ColumnDef::new(QuizQuestions::Question).text().not_null())
                    .col(ColumnDef::new(QuizQuestions::Options).text().not_null())
                    .col(ColumnDef::new(QuizQuestions::CorrectIndex).integer().not_null())
                    .col(ColumnDef::new(QuizQuestions::Explanation).text().null())
                    .col(
                        ColumnDef::new(QuizQuestions::Difficulty)
                            .string_len(20)
                            .not_null()
                            .default("medium"),
                    )
                    .col(ColumnDef::new(QuizQuestions::Image).string().null())
                    .col(
                        ColumnDef::new(QuizQuestions::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quiz_questions_category")
                            .from(QuizQuestions::Table, QuizQuestions::CategoryId)
                            .to(QuizCategories::Table, QuizCategories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        if !manager.has_index("quiz_questions", IDX_QUESTION_CATEGORY).await? {
            manager
                .create_index(
                    Index::create()
                        .name(IDX_QUESTION_CATEGORY)
                        .table(QuizQuestions::Table)
                        .col(QuizQuestions::CategoryId)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QuizQuestions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuizCategories::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum QuizCategories {
    Table,
    Id,
    Name,
    Slug,
    Description,
    Image,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum QuizQuestions {
    Table,
    Id,
    CategoryId,
    Question,
    Options,
    CorrectIndex,
    Explanation,
    Difficulty,
    Image,
    CreatedAt,
}
