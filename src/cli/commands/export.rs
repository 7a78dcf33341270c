//! Export command implementation
//!
//! Runs one export call and writes the result into the output directory as
//! `<kind>_<YYYYMMDD>.csv` or `export_<YYYYMMDD>.zip`.

use crate::adapters::store::create_data_store;
use crate::config::load_config;
use crate::core::export::{ExportOrchestrator, ExportRequest, ExportSettings};
use crate::domain::{BrandId, CadreError, DatasetKind, FilterSpec, Result};
use crate::log_error_with_context;
use chrono::NaiveDate;
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Brand whose data is exported
    #[arg(short, long)]
    pub brand: String,

    /// Dataset kinds to export (comma-separated, see `cadre kinds`)
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub kinds: Vec<String>,

    /// JSON file holding the segmentation filter
    #[arg(short, long, value_name = "FILE")]
    pub filter: Option<PathBuf>,

    /// Start of the reporting period (YYYY-MM-DD), overrides the filter file
    #[arg(long, value_name = "DATE")]
    pub period_from: Option<NaiveDate>,

    /// End of the reporting period (YYYY-MM-DD), overrides the filter file
    #[arg(long, value_name = "DATE")]
    pub period_to: Option<NaiveDate>,

    /// Output directory, overrides `export.output_dir`
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl ExportArgs {
    /// Build the export request from the arguments
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank brand, an unknown kind or an
    /// unreadable filter file.
    pub fn to_request(&self) -> Result<ExportRequest> {
        let brand = BrandId::new(self.brand.as_str()).map_err(CadreError::Validation)?;
        let kinds = self
            .kinds
            .iter()
            .map(|kind| kind.parse())
            .collect::<Result<Vec<DatasetKind>>>()?;

        let mut filter = match &self.filter {
            Some(path) => read_filter(path)?,
            None => FilterSpec::default(),
        };
        if self.period_from.is_some() {
            filter.period.from = self.period_from;
        }
        if self.period_to.is_some() {
            filter.period.to = self.period_to;
        }

        Ok(ExportRequest::new(brand, kinds).with_filter(filter))
    }

    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(e.exit_code());
            }
        };

        let request = match self.to_request() {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Invalid export request: {e}");
                return Ok(e.exit_code());
            }
        };

        let settings = match ExportSettings::from_config(&config.export) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Invalid export settings: {e}");
                return Ok(e.exit_code());
            }
        };

        let store = match create_data_store(&config) {
            Ok(s) => s,
            Err(e) => {
                log_error_with_context!(&e, "Failed to create data store");
                eprintln!("Failed to initialize data store: {e}");
                return Ok(4);
            }
        };

        let orchestrator = ExportOrchestrator::new(store, settings);

        let outcome = tokio::select! {
            outcome = orchestrator.run(&request) => outcome,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received SIGINT (Ctrl+C), abandoning export");
                eprintln!("Export cancelled.");
                return Ok(130);
            }
        };

        let result = match outcome {
            Ok(r) => r,
            Err(e) => {
                log_error_with_context!(&e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(e.exit_code());
            }
        };

        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| config.export.output_dir.clone());
        std::fs::create_dir_all(&output_dir)?;

        let today = chrono::Local::now().date_naive();
        let path = output_dir.join(result.file_name(today));
        let produced = result.kinds();
        let content_type = result.content_type();
        std::fs::write(&path, result.into_bytes())?;

        tracing::info!(path = %path.display(), content_type, "Export written");

        print_outcome(&path, &request.kinds, &produced);
        Ok(0)
    }
}

fn read_filter(path: &Path) -> Result<FilterSpec> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        CadreError::Validation(format!("Cannot read filter file {}: {e}", path.display()))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        CadreError::Validation(format!("Invalid filter file {}: {e}", path.display()))
    })
}

fn print_outcome(path: &Path, requested: &[DatasetKind], produced: &[DatasetKind]) {
    println!("Export written to {}", path.display());
    for kind in produced {
        println!("  {kind}");
    }

    let mut skipped: Vec<DatasetKind> = Vec::new();
    for kind in requested {
        if !produced.contains(kind) && !skipped.contains(kind) {
            skipped.push(*kind);
        }
    }
    if !skipped.is_empty() {
        let names: Vec<&str> = skipped.iter().map(DatasetKind::as_str).collect();
        println!("Not included (see log for details): {}", names.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(kinds: &[&str]) -> ExportArgs {
        ExportArgs {
            brand: "acme".to_string(),
            kinds: kinds.iter().map(|k| k.to_string()).collect(),
            filter: None,
            period_from: None,
            period_to: None,
            output_dir: None,
        }
    }

    #[test]
    fn test_to_request() {
        let request = args(&["clients", "pos-materials"]).to_request().unwrap();
        assert_eq!(request.brand.as_str(), "acme");
        assert_eq!(
            request.kinds,
            vec![DatasetKind::Clients, DatasetKind::PosMaterials]
        );
        assert!(request.filter.is_empty());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = args(&["clients", "kpis"]).to_request().unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_filter_file_and_period_override() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"zone": ["north"], "period": {"from": "2024-01-01", "to": "2024-03-31"}}"#)
            .unwrap();
        file.flush().unwrap();

        let mut args = args(&["visits"]);
        args.filter = Some(file.path().to_path_buf());
        args.period_to = NaiveDate::from_ymd_opt(2024, 1, 31);

        let request = args.to_request().unwrap();
        assert!(request.filter.zone.contains("north"));
        assert_eq!(
            request.filter.period.from,
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(request.filter.period.to, NaiveDate::from_ymd_opt(2024, 1, 31));
    }

    #[test]
    fn test_invalid_filter_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"colour": ["red"]}"#).unwrap();
        file.flush().unwrap();

        let mut args = args(&["clients"]);
        args.filter = Some(file.path().to_path_buf());
        assert!(matches!(
            args.to_request(),
            Err(CadreError::Validation(_))
        ));
    }
}
