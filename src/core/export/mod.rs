//! Export orchestration
//!
//! - [`orchestrator`] - the per-call pipeline from request to result
//! - [`summary`] - per-call summary, logged when the call ends

pub mod orchestrator;
pub mod summary;

pub use orchestrator::{ExportOrchestrator, ExportRequest, ExportSettings};
pub use summary::ExportSummary;
