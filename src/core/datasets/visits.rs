//! Visit log
//!
//! The only time-bounded dataset: the reporting period, when present,
//! bounds the visit date (inclusive).

use super::format::{date, list, money, text, yes_no};
use super::{DatasetGenerator, GenerationContext};
use crate::adapters::store::DataStore;
use crate::domain::records::VisitRecord;
use crate::domain::{DatasetKind, Result};
use async_trait::async_trait;

const HEADER: &[&str] = &[
    "Visit ID",
    "Client ID",
    "Agent ID",
    "Date",
    "Type",
    "Outcome",
    "Order Amount",
    "Products Discussed",
    "Follow Up",
    "Notes",
];

pub struct VisitsGenerator;

fn row(visit: &VisitRecord) -> Vec<String> {
    vec![
        visit.id.clone(),
        visit.client_id.to_string(),
        visit.agent_id.clone(),
        date(visit.visited_on),
        visit.visit_type.clone(),
        text(visit.outcome.as_ref()),
        money(visit.order_amount),
        list(&visit.products_discussed),
        yes_no(visit.follow_up),
        text(visit.notes.as_ref()),
    ]
}

#[async_trait]
impl DatasetGenerator for VisitsGenerator {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Visits
    }

    fn header(&self) -> &'static [&'static str] {
        HEADER
    }

    async fn fetch_rows(
        &self,
        store: &dyn DataStore,
        ctx: &GenerationContext<'_>,
    ) -> Result<Vec<Vec<String>>> {
        let visits = store.visits(ctx.brand, ctx.candidates, ctx.period).await?;
        Ok(visits.iter().map(row).collect())
    }
}
