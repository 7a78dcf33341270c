//! Promotion catalog (brand-wide)

use super::format::{list, money, opt_date, text, yes_no};
use super::{DatasetGenerator, GenerationContext};
use crate::adapters::store::DataStore;
use crate::domain::records::PromotionRecord;
use crate::domain::{DatasetKind, Result};
use async_trait::async_trait;

const HEADER: &[&str] = &[
    "Promotion ID",
    "Name",
    "Description",
    "Starts On",
    "Ends On",
    "Discount",
    "Minimum Purchase",
    "Active",
    "Target Tiers",
];

pub struct PromotionsGenerator;

fn row(promotion: &PromotionRecord) -> Vec<String> {
    vec![
        promotion.id.clone(),
        promotion.name.clone(),
        text(promotion.description.as_ref()),
        opt_date(promotion.starts_on),
        opt_date(promotion.ends_on),
        money(promotion.discount_amount),
        money(promotion.min_purchase),
        yes_no(promotion.active),
        list(&promotion.target_tiers),
    ]
}

#[async_trait]
impl DatasetGenerator for PromotionsGenerator {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Promotions
    }

    fn header(&self) -> &'static [&'static str] {
        HEADER
    }

    async fn fetch_rows(
        &self,
        store: &dyn DataStore,
        ctx: &GenerationContext<'_>,
    ) -> Result<Vec<Vec<String>>> {
        let promotions = store.promotions(ctx.brand).await?;
        Ok(promotions.iter().map(row).collect())
    }
}
