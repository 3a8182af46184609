pub mod fixtures;
mod orders;
mod posts;
mod products;
mod quiz;

use anyhow::Result;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;

use self::fixtures::{OrderFixture, PostFixture, ProductFixture, QuizCategoryFixture};
use crate::config::SeedSection;

/// 单个部分的写入统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SectionReport {
    pub inserted: usize,
    pub skipped: usize,
}

#[derive(Debug, Default)]
pub struct SeedReport {
    pub sections: Vec<(SeedSection, SectionReport)>,
}

impl SeedReport {
    #[cfg(test)]
    pub fn get(&self, section: SeedSection) -> Option<SectionReport> {
        self.sections
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, report)| *report)
    }

    pub fn total_inserted(&self) -> usize {
        self.sections.iter().map(|(_, r)| r.inserted).sum()
    }
}

/// 按 quiz → posts → products → orders 的顺序写入，整体放在一个事务里
pub async fn run(db: &DatabaseConnection, sections: &[SeedSection]) -> Result<SeedReport> {
    let mut selected = if sections.is_empty() {
        SeedSection::ALL.to_vec()
    } else {
        sections.to_vec()
    };
    selected.sort();
    selected.dedup();

    let txn = db.begin().await?;
    let mut report = SeedReport::default();

    for section in selected {
        let section_report = match section {
            SeedSection::Quiz => quiz::seed_quiz(&txn, &fixtures::load::<Vec<QuizCategoryFixture>>("quiz.json")?).await?,
            SeedSection::Posts => posts::seed_posts(&txn, &fixtures::load::<Vec<PostFixture>>("posts.json")?).await?,
            SeedSection::Products => products::seed_products(&txn, &fixtures::load::<Vec<ProductFixture>>("products.json")?).await?,
            SeedSection::Orders => orders::seed_orders(&txn, &fixtures::load::<Vec<OrderFixture>>("orders.json")?).await?,
        };
        info!(
            "{:?}: 新增 {} 行，跳过 {} 行",
            section, section_report.inserted, section_report.skipped
        );
        report.sections.push((section, section_report));
    }

    txn.commit().await?;
    info!("示例数据写入完成，共新增 {} 行", report.total_inserted());
    Ok(report)
}
