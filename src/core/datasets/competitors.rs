//! Competitor sightings at the brand's clients

use super::format::{money, opt_date, text, yes_no};
use super::{DatasetGenerator, GenerationContext};
use crate::adapters::store::DataStore;
use crate::domain::records::CompetitorRecord;
use crate::domain::{DatasetKind, Result};
use async_trait::async_trait;

const HEADER: &[&str] = &[
    "Sighting ID",
    "Client ID",
    "Competitor",
    "Product",
    "Observed Price",
    "Observed On",
    "Exclusive Display",
    "Notes",
];

pub struct CompetitorsGenerator;

fn row(sighting: &CompetitorRecord) -> Vec<String> {
    vec![
        sighting.id.clone(),
        sighting.client_id.to_string(),
        sighting.competitor.clone(),
        text(sighting.product.as_ref()),
        money(sighting.observed_price),
        opt_date(sighting.observed_on),
        yes_no(sighting.exclusive_display),
        text(sighting.notes.as_ref()),
    ]
}

#[async_trait]
impl DatasetGenerator for CompetitorsGenerator {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Competitors
    }

    fn header(&self) -> &'static [&'static str] {
        HEADER
    }

    async fn fetch_rows(
        &self,
        store: &dyn DataStore,
        ctx: &GenerationContext<'_>,
    ) -> Result<Vec<Vec<String>>> {
        let sightings = store.competitors(ctx.brand, ctx.candidates).await?;
        Ok(sightings.iter().map(row).collect())
    }
}
