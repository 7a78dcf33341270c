//! Export summary and reporting
//!
//! One summary per export call, logged when the call ends. Partial success is
//! silent towards the caller; the summary is where skipped datasets show up.

use crate::domain::{BrandId, DatasetKind};
use std::time::Duration;

/// Summary of one export call
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub brand: BrandId,

    /// Requested kinds after duplicates were collapsed
    pub requested: Vec<DatasetKind>,

    /// Produced kinds with their body row counts, in request order
    pub produced: Vec<(DatasetKind, usize)>,

    /// Kinds that failed to generate or encode
    pub skipped: Vec<DatasetKind>,

    /// Size of the resolved population, `None` when unrestricted
    pub candidate_count: Option<usize>,

    pub duration: Duration,
}

impl ExportSummary {
    pub fn new(brand: BrandId, requested: Vec<DatasetKind>) -> Self {
        Self {
            brand,
            requested,
            produced: Vec::new(),
            skipped: Vec::new(),
            candidate_count: None,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn record_produced(&mut self, kind: DatasetKind, rows: usize) {
        self.produced.push((kind, rows));
    }

    pub fn record_skipped(&mut self, kind: DatasetKind) {
        self.skipped.push(kind);
    }

    /// True when every requested dataset was produced
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.produced.len() == self.requested.len()
    }

    pub fn total_rows(&self) -> usize {
        self.produced.iter().map(|(_, rows)| rows).sum()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        let produced: Vec<&str> = self.produced.iter().map(|(k, _)| k.as_str()).collect();

        tracing::info!(
            brand = %self.brand,
            requested = self.requested.len(),
            produced = ?produced,
            candidates = ?self.candidate_count,
            total_rows = self.total_rows(),
            duration_ms = self.duration.as_millis() as u64,
            complete = self.is_complete(),
            "Export completed"
        );

        if !self.is_complete() {
            tracing::warn!(
                brand = %self.brand,
                skipped = ?self.skipped,
                "Export completed without some requested datasets"
            );
        }
    }
}
