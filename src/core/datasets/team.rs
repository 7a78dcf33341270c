//! Team roster (brand-wide)

use super::format::{list, opt_date, text, yes_no};
use super::{DatasetGenerator, GenerationContext};
use crate::adapters::store::DataStore;
use crate::domain::records::TeamMemberRecord;
use crate::domain::{DatasetKind, Result};
use async_trait::async_trait;

const HEADER: &[&str] = &[
    "Member ID",
    "Name",
    "Role",
    "Email",
    "Phone",
    "Zone",
    "Active",
    "Hired On",
    "Assigned Markets",
];

pub struct TeamGenerator;

fn row(member: &TeamMemberRecord) -> Vec<String> {
    vec![
        member.id.clone(),
        member.name.clone(),
        member.role.clone(),
        text(member.email.as_ref()),
        text(member.phone.as_ref()),
        text(member.zone.as_ref()),
        yes_no(member.active),
        opt_date(member.hired_on),
        list(&member.assigned_markets),
    ]
}

#[async_trait]
impl DatasetGenerator for TeamGenerator {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Team
    }

    fn header(&self) -> &'static [&'static str] {
        HEADER
    }

    async fn fetch_rows(
        &self,
        store: &dyn DataStore,
        ctx: &GenerationContext<'_>,
    ) -> Result<Vec<Vec<String>>> {
        let team = store.team(ctx.brand).await?;
        Ok(team.iter().map(row).collect())
    }
}
