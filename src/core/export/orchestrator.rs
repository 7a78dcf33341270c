//! Export orchestrator - runs one export call end to end
//!
//! validate → resolve the population once → generate the requested datasets
//! concurrently → encode → deliver a single CSV or a ZIP archive.

use crate::adapters::store::DataStore;
use crate::config::ExportConfig;
use crate::core::archive::ArchivePackager;
use crate::core::datasets::{generator_for, GenerationContext};
use crate::core::encode::{EncoderOptions, TabularEncoder};
use crate::core::export::summary::ExportSummary;
use crate::core::resolve::CandidateResolver;
use crate::domain::{
    BrandId, CadreError, DatasetKind, EncodedBlob, ExportResult, FilterSpec, Result, TabularBlob,
};
use crate::{log_dataset_skipped, log_export_start};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// One export call: brand scope, requested kinds and the shared filter
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub brand: BrandId,
    pub kinds: Vec<DatasetKind>,
    pub filter: FilterSpec,
}

impl ExportRequest {
    /// Request with an empty filter
    pub fn new(brand: BrandId, kinds: Vec<DatasetKind>) -> Self {
        Self {
            brand,
            kinds,
            filter: FilterSpec::default(),
        }
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self
    }
}

/// Per-orchestrator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    /// Upper bound on datasets generated at the same time
    pub max_concurrency: usize,
    pub encoder: EncoderOptions,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            encoder: EncoderOptions::default(),
        }
    }
}

impl ExportSettings {
    /// Settings from the `[export]` section
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV dialect is invalid.
    pub fn from_config(config: &ExportConfig) -> Result<Self> {
        Ok(Self {
            max_concurrency: config.max_concurrency.max(1),
            encoder: EncoderOptions::from_config(config)?,
        })
    }
}

/// Runs export calls against one data store
pub struct ExportOrchestrator {
    store: Arc<dyn DataStore>,
    resolver: CandidateResolver,
    settings: ExportSettings,
}

impl ExportOrchestrator {
    pub fn new(store: Arc<dyn DataStore>, settings: ExportSettings) -> Self {
        let resolver = CandidateResolver::new(Arc::clone(&store));
        Self {
            store,
            resolver,
            settings,
        }
    }

    /// Run one export call
    ///
    /// Datasets that fail to generate or encode are dropped from the result
    /// and reported in the logged [`ExportSummary`] only.
    ///
    /// # Errors
    ///
    /// - [`CadreError::Validation`] for an empty kind list or an inverted range
    /// - [`CadreError::Resolution`] if the population cannot be resolved
    /// - [`CadreError::NothingToExport`] if no dataset could be produced
    /// - [`CadreError::Archive`] if packing several datasets fails
    pub async fn run(&self, request: &ExportRequest) -> Result<ExportResult> {
        let start_time = Instant::now();

        let kinds = collapse_kinds(&request.kinds)?;
        request.filter.validate()?;

        log_export_start!(request.brand, kinds);

        let candidates = self
            .resolver
            .resolve(&request.brand, &request.filter)
            .await?;

        let ctx = GenerationContext {
            brand: &request.brand,
            candidates: &candidates,
            period: request.filter.period(),
        };
        let store = self.store.as_ref();

        // `buffered` keeps request order while bounding concurrency
        let outcomes: Vec<(DatasetKind, Option<TabularBlob>)> = stream::iter(kinds.iter().copied())
            .map(|kind| async move { (kind, generator_for(kind).generate(store, &ctx).await) })
            .buffered(self.settings.max_concurrency.max(1))
            .collect()
            .await;

        let mut summary = ExportSummary::new(request.brand.clone(), kinds);
        summary.candidate_count = candidates.len();

        let encoder = TabularEncoder::new(self.settings.encoder);
        let mut encoded = Vec::with_capacity(outcomes.len());
        for (kind, blob) in outcomes {
            let Some(blob) = blob else {
                summary.record_skipped(kind);
                continue;
            };
            match encoder.encode(&blob) {
                Ok(text) => {
                    summary.record_produced(kind, blob.row_count());
                    encoded.push(text);
                }
                Err(e) => {
                    log_dataset_skipped!(kind, e);
                    summary.record_skipped(kind);
                }
            }
        }

        let result = deliver(encoded);

        summary.with_duration(start_time.elapsed()).log_summary();

        result
    }
}

/// Reject an empty request and collapse duplicates, keeping first occurrences
fn collapse_kinds(kinds: &[DatasetKind]) -> Result<Vec<DatasetKind>> {
    if kinds.is_empty() {
        return Err(CadreError::Validation(
            "at least one dataset kind must be requested".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    Ok(kinds.iter().copied().filter(|kind| seen.insert(*kind)).collect())
}

fn deliver(mut encoded: Vec<EncodedBlob>) -> Result<ExportResult> {
    match encoded.len() {
        0 => Err(CadreError::NothingToExport),
        1 => {
            let blob = encoded.remove(0);
            Ok(ExportResult::Single {
                kind: blob.kind,
                csv: blob.text,
            })
        }
        _ => {
            let bytes = ArchivePackager::new().pack(&encoded)?;
            Ok(ExportResult::Archive {
                kinds: encoded.iter().map(|blob| blob.kind).collect(),
                bytes,
            })
        }
    }
}
