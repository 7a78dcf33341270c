//! Dataset generators
//!
//! One generator per [`DatasetKind`]. A generator queries a single data
//! domain through the [`DataStore`] and renders the rows into a
//! [`TabularBlob`] with the canonical cell formatters in [`format`].
//!
//! Population-scoped kinds honor the resolved [`CandidateSet`]; brand-wide
//! kinds ignore it. Failures never propagate: a generator that cannot
//! produce its dataset logs the cause and yields `None`.

pub mod clients;
pub mod competitors;
pub mod format;
pub mod memberships;
pub mod pos_materials;
pub mod products;
pub mod promotions;
pub mod surveys;
pub mod team;
pub mod visits;

use crate::adapters::store::DataStore;
use crate::domain::{BrandId, CandidateSet, DatasetKind, DateRange, Result, Scoping, TabularBlob};
use crate::log_dataset_skipped;
use async_trait::async_trait;

pub use clients::ClientsGenerator;
pub use competitors::CompetitorsGenerator;
pub use memberships::MembershipsGenerator;
pub use pos_materials::PosMaterialsGenerator;
pub use products::ProductsGenerator;
pub use promotions::PromotionsGenerator;
pub use surveys::SurveysGenerator;
pub use team::TeamGenerator;
pub use visits::VisitsGenerator;

/// Inputs shared by every generator of one export call
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub brand: &'a BrandId,
    pub candidates: &'a CandidateSet,
    /// Reporting period bounding time-based datasets
    pub period: Option<&'a DateRange>,
}

/// Produces the tabular dataset of one kind
#[async_trait]
pub trait DatasetGenerator: Send + Sync {
    fn kind(&self) -> DatasetKind;

    /// Column names, in output order
    fn header(&self) -> &'static [&'static str];

    /// Query the store and format every row
    ///
    /// Only called with a non-empty population for population-scoped kinds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    async fn fetch_rows(
        &self,
        store: &dyn DataStore,
        ctx: &GenerationContext<'_>,
    ) -> Result<Vec<Vec<String>>>;

    /// Generate the dataset, or `None` if it could not be produced
    async fn generate(
        &self,
        store: &dyn DataStore,
        ctx: &GenerationContext<'_>,
    ) -> Option<TabularBlob> {
        let kind = self.kind();
        let header: Vec<String> = self.header().iter().map(|h| h.to_string()).collect();

        let result = if kind.scoping() == Scoping::Population && ctx.candidates.is_empty() {
            tracing::debug!(kind = %kind, "Empty population, emitting header only");
            TabularBlob::header_only(kind, header)
        } else {
            self.fetch_rows(store, ctx)
                .await
                .and_then(|rows| TabularBlob::new(kind, header, rows))
        };

        match result {
            Ok(blob) => {
                tracing::debug!(kind = %kind, rows = blob.row_count(), "Dataset generated");
                Some(blob)
            }
            Err(e) => {
                log_dataset_skipped!(kind, e);
                None
            }
        }
    }
}

/// The generator for `kind`
pub fn generator_for(kind: DatasetKind) -> Box<dyn DatasetGenerator> {
    match kind {
        DatasetKind::Clients => Box::new(ClientsGenerator),
        DatasetKind::Visits => Box::new(VisitsGenerator),
        DatasetKind::Memberships => Box::new(MembershipsGenerator),
        DatasetKind::Promotions => Box::new(PromotionsGenerator),
        DatasetKind::Surveys => Box::new(SurveysGenerator),
        DatasetKind::Products => Box::new(ProductsGenerator),
        DatasetKind::Team => Box::new(TeamGenerator),
        DatasetKind::Competitors => Box::new(CompetitorsGenerator),
        DatasetKind::PosMaterials => Box::new(PosMaterialsGenerator),
    }
}
