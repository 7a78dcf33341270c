//! Membership roster

use super::format::{money, opt_date, text};
use super::{DatasetGenerator, GenerationContext};
use crate::adapters::store::DataStore;
use crate::domain::records::MembershipRecord;
use crate::domain::{DatasetKind, Result};
use async_trait::async_trait;

const HEADER: &[&str] = &[
    "Client ID",
    "Status",
    "Tier",
    "Points Balance",
    "Lifetime Points",
    "Joined On",
    "Last Purchase",
    "Total Spent",
];

pub struct MembershipsGenerator;

fn row(membership: &MembershipRecord) -> Vec<String> {
    vec![
        membership.client_id.to_string(),
        membership.status.clone(),
        text(membership.tier.as_ref()),
        membership.points_balance.to_string(),
        membership.lifetime_points.to_string(),
        opt_date(membership.joined_on),
        opt_date(membership.last_purchase_on),
        money(membership.total_spent),
    ]
}

#[async_trait]
impl DatasetGenerator for MembershipsGenerator {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Memberships
    }

    fn header(&self) -> &'static [&'static str] {
        HEADER
    }

    async fn fetch_rows(
        &self,
        store: &dyn DataStore,
        ctx: &GenerationContext<'_>,
    ) -> Result<Vec<Vec<String>>> {
        let memberships = store.memberships(ctx.brand, ctx.candidates).await?;
        Ok(memberships.iter().map(row).collect())
    }
}
