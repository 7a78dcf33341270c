//! Survey catalog (brand-wide)

use super::format::{list, opt_date, yes_no};
use super::{DatasetGenerator, GenerationContext};
use crate::adapters::store::DataStore;
use crate::domain::records::SurveyRecord;
use crate::domain::{DatasetKind, Result};
use async_trait::async_trait;

const HEADER: &[&str] = &[
    "Survey ID",
    "Title",
    "Created On",
    "Closes On",
    "Questions",
    "Responses",
    "Active",
    "Target Tiers",
];

pub struct SurveysGenerator;

fn row(survey: &SurveyRecord) -> Vec<String> {
    vec![
        survey.id.clone(),
        survey.title.clone(),
        opt_date(survey.created_on),
        opt_date(survey.closes_on),
        survey.question_count.to_string(),
        survey.response_count.to_string(),
        yes_no(survey.active),
        list(&survey.target_tiers),
    ]
}

#[async_trait]
impl DatasetGenerator for SurveysGenerator {
    fn kind(&self) -> DatasetKind {
        DatasetKind::Surveys
    }

    fn header(&self) -> &'static [&'static str] {
        HEADER
    }

    async fn fetch_rows(
        &self,
        store: &dyn DataStore,
        ctx: &GenerationContext<'_>,
    ) -> Result<Vec<Vec<String>>> {
        let surveys = store.surveys(ctx.brand).await?;
        Ok(surveys.iter().map(row).collect())
    }
}
