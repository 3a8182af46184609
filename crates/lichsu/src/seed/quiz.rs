use anyhow::Result;
use chrono::Utc;
use lichsu_entity::entities::prelude::*;
use lichsu_entity::entities::{quiz_category, quiz_question};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use tracing::debug;

use super::fixtures::{QuizCategoryFixture, QuizQuestionFixture};
use super::SectionReport;
use crate::error::ToolError;
use crate::utils::slug::require_slug;

fn validate_question(category: &str, question: &QuizQuestionFixture) -> Result<i32, ToolError> {
    if question.options.len() < 2 || question.correct_index >= question.options.len() {
        return Err(ToolError::InvalidFixture {
            file: "quiz.json".to_string(),
            reason: format!(
                "{} / {}: 正确答案下标 {} 超出 {} 个选项",
                category,
                question.question,
                question.correct_index,
                question.options.len()
            ),
        });
    }
    // 前面已保证下标小于选项数
    Ok(question.correct_index as i32)
}

pub async fn seed_quiz<C: ConnectionTrait>(db: &C, categories: &[QuizCategoryFixture]) -> Result<SectionReport> {
    let mut report = SectionReport::default();

    for fixture in categories {
        let slug = require_slug(&fixture.name)?;
        let existing = QuizCategory::find()
            .filter(quiz_category::Column::Slug.eq(&slug))
            .one(db)
            .await?;

        let category_id = match existing {
            Some(category) => {
                report.skipped += 1;
                category.id
            }
            None => {
                let category = quiz_category::ActiveModel {
                    name: Set(fixture.name.clone()),
                    slug: Set(slug.clone()),
                    description: Set(fixture.description.clone()),
                    created_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(db)
                .await?;
                debug!("新增题目分类 {}", slug);
                report.inserted += 1;
                category.id
            }
        };

        for question in &fixture.questions {
            let correct_index = validate_question(&fixture.name, question)?;

            let exists = QuizQuestion::find()
                .filter(quiz_question::Column::CategoryId.eq(category_id))
                .filter(quiz_question::Column::Question.eq(&question.question))
                .one(db)
                .await?
                .is_some();
            if exists {
                report.skipped += 1;
                continue;
            }

            quiz_question::ActiveModel {
                category_id: Set(category_id),
                question: Set(question.question.clone()),
                options: Set(serde_json::to_string(&question.options)?),
                correct_index: Set(correct_index),
                explanation: Set(question.explanation.clone()),
                difficulty: Set(question.difficulty),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(db)
            .await?;
            report.inserted += 1;
        }
    }

    Ok(report)
}
